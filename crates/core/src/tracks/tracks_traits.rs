use async_trait::async_trait;

use super::tracks_model::{NewTrack, Track};
use crate::errors::Result;

/// Trait for track repository operations
#[async_trait]
pub trait TrackRepositoryTrait: Send + Sync {
    /// Assigns the next sequence value and persists the track in one step.
    async fn insert(&self, new_track: NewTrack) -> Result<Track>;
    fn count(&self) -> Result<i64>;
    fn get_by_id(&self, simple_id: i64) -> Result<Option<Track>>;
    /// All tracks in insertion order.
    fn list(&self) -> Result<Vec<Track>>;
    fn list_ids(&self) -> Result<Vec<i64>>;
    /// Tracks with a timestamp strictly greater than `timestamp`, oldest first.
    fn list_after(&self, timestamp: i64) -> Result<Vec<Track>>;
    /// Timestamp of the most recently inserted track.
    fn latest_timestamp(&self) -> Result<Option<i64>>;
    /// Deletes every track and resets the sequence to zero.
    async fn delete_all(&self) -> Result<usize>;
}

/// Trait for track service operations
#[async_trait]
pub trait TrackServiceTrait: Send + Sync {
    async fn add_track(&self, new_track: NewTrack) -> Result<Track>;
    async fn ingest_from_url(&self, source_url: &str) -> Result<Track>;
    fn count_tracks(&self) -> Result<i64>;
    fn get_track(&self, simple_id: i64) -> Result<Option<Track>>;
    fn get_all_tracks(&self) -> Result<Vec<Track>>;
    fn get_track_ids(&self) -> Result<Vec<i64>>;
    fn get_tracks_after(&self, timestamp: i64) -> Result<Vec<Track>>;
    fn latest_timestamp(&self) -> Result<Option<i64>>;
    async fn clear_tracks(&self) -> Result<usize>;
}
