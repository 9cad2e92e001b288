//! Tracks module - domain models, services, and traits.

mod tracks_model;
mod tracks_service;
mod tracks_traits;


pub use tracks_model::{NewTrack, Track, TrackField};
pub use tracks_service::TrackService;
pub use tracks_traits::{TrackRepositoryTrait, TrackServiceTrait};
