//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events
//! after successful domain mutations. The server runtime implements the sink
//! to drive webhook notification off the request path.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
