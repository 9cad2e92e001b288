//! Ticker module - paginated, arrival-ordered views over stored tracks.

mod ticker_model;
mod ticker_service;

pub use ticker_model::TickerWindow;
pub(crate) use ticker_model::{deserialize_millis, serialize_millis};
pub use ticker_service::{page, TickerService, TickerServiceTrait};
