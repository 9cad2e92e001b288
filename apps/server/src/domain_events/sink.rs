//! Web domain event sink implementation.
//!
//! Receives domain events and sends them to a background queue worker.

use std::sync::{Arc, Mutex};

use paragliding_core::{
    events::{DomainEvent, DomainEventSink},
    notifications::NotificationServiceTrait,
};
use tokio::sync::mpsc;

use super::queue_worker::event_queue_worker;

/// Domain event sink for the web server runtime.
///
/// # Two-Phase Initialization
///
/// The track service needs the sink, and the worker needs the notification
/// dispatcher, which in turn needs the track service:
///
/// 1. Create the sink with `new()` - this just creates the channel
/// 2. Call `start_worker()` after all services are created - this spawns the worker
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    /// Creates a new WebDomainEventSink.
    ///
    /// The sink is immediately ready to receive events, but they will be
    /// buffered until `start_worker()` is called.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Starts the background worker that processes events.
    ///
    /// Events received before this call are buffered and processed once the
    /// worker starts. Later calls are ignored.
    pub fn start_worker(&self, notification_service: Arc<dyn NotificationServiceTrait>) {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(rx) = rx else {
            tracing::warn!("Domain event worker already started");
            return;
        };

        tokio::spawn(event_queue_worker(rx, notification_service));
    }

    /// Creates a WebDomainEventSink with just the sender.
    #[cfg(test)]
    pub fn with_sender(tx: mpsc::UnboundedSender<DomainEvent>) -> Self {
        Self {
            tx,
            rx: Mutex::new(None),
        }
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        // Events are best-effort; a closed channel only loses the notification.
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Failed to emit domain event: {}", e);
        }
    }
}
