//! Event queue worker for processing domain events.

use std::sync::Arc;

use paragliding_core::{events::DomainEvent, notifications::NotificationServiceTrait};
use tokio::sync::mpsc;

/// Runs the event queue worker until every sender is dropped.
pub async fn event_queue_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    notification_service: Arc<dyn NotificationServiceTrait>,
) {
    tracing::info!("Domain event queue worker started");

    while let Some(event) = rx.recv().await {
        process_event(&event, notification_service.as_ref()).await;
    }

    tracing::info!("Domain event queue worker shutting down");
}

async fn process_event(event: &DomainEvent, notification_service: &dyn NotificationServiceTrait) {
    match event {
        DomainEvent::TrackAdded {
            simple_id,
            timestamp,
        } => {
            tracing::debug!("Track {} added at {}, dispatching webhooks", simple_id, timestamp);
            match notification_service.dispatch().await {
                Ok(report) => tracing::info!(
                    "Webhooks after track {}: {} evaluated, {} notified, {} failed",
                    simple_id,
                    report.evaluated,
                    report.notified,
                    report.failed
                ),
                Err(e) => tracing::warn!("Webhook dispatch after track {} failed: {}", simple_id, e),
            }
        }
        DomainEvent::TracksCleared { deleted } => {
            tracing::info!("Track store cleared ({} track(s) removed)", deleted);
        }
    }
}
