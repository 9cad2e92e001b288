//! Hand-off point between committed track mutations and whatever reacts to them.

use super::DomainEvent;

/// Receives events from `TrackService` once the repository write returned.
///
/// An event is only emitted for a mutation that is already durable, so a
/// consumer reading the store after `TrackAdded` always sees the new track.
/// `emit` runs on the request path: it must not block or fail the caller.
/// The server queues events for the webhook dispatcher.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Sink used when no consumer is wired, e.g. tooling that only reads tracks.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}
