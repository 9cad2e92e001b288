//! Paragliding Core - Domain entities, services, and traits.
//!
//! This crate contains the track store contract, ticker paging, the webhook
//! registry and notification dispatcher, and IGC extraction.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod events;
pub mod igc;
pub mod notifications;
pub mod ticker;
pub mod tracks;
pub mod utils;
pub mod webhooks;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
