//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via DomainEventSink and runs the webhook
//! notification dispatcher off the request path, one event at a time in
//! arrival order.

mod queue_worker;
mod sink;

pub use sink::WebDomainEventSink;
