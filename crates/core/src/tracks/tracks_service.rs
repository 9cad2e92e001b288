use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::tracks_model::{NewTrack, Track};
use super::tracks_traits::{TrackRepositoryTrait, TrackServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::igc::{validate_source_url, TrackExtractorTrait};

/// Service owning the track store contract: ID assignment, lookups and
/// bulk clear.
#[derive(Clone)]
pub struct TrackService {
    repository: Arc<dyn TrackRepositoryTrait>,
    extractor: Arc<dyn TrackExtractorTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl TrackService {
    pub fn new(
        repository: Arc<dyn TrackRepositoryTrait>,
        extractor: Arc<dyn TrackExtractorTrait>,
    ) -> Self {
        Self {
            repository,
            extractor,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }
}

#[async_trait]
impl TrackServiceTrait for TrackService {
    /// Persists a track and announces it once the insert has committed.
    async fn add_track(&self, new_track: NewTrack) -> Result<Track> {
        let track = self.repository.insert(new_track).await?;
        info!(
            "Track {} stored with timestamp {}",
            track.simple_id, track.timestamp
        );

        self.event_sink
            .emit(DomainEvent::track_added(track.simple_id, track.timestamp));

        Ok(track)
    }

    /// Validates the source URL, extracts the flight and stores it.
    ///
    /// Nothing is persisted and no ID is consumed when validation or
    /// extraction fails.
    async fn ingest_from_url(&self, source_url: &str) -> Result<Track> {
        let source_url = source_url.trim();
        validate_source_url(source_url)?;
        debug!("Extracting track from {}", source_url);
        let extracted = self.extractor.extract(source_url).await?;
        self.add_track(NewTrack::from_extracted(extracted, source_url))
            .await
    }

    fn count_tracks(&self) -> Result<i64> {
        self.repository.count()
    }

    fn get_track(&self, simple_id: i64) -> Result<Option<Track>> {
        if simple_id < 0 {
            return Ok(None);
        }
        self.repository.get_by_id(simple_id)
    }

    fn get_all_tracks(&self) -> Result<Vec<Track>> {
        self.repository.list()
    }

    fn get_track_ids(&self) -> Result<Vec<i64>> {
        self.repository.list_ids()
    }

    fn get_tracks_after(&self, timestamp: i64) -> Result<Vec<Track>> {
        self.repository.list_after(timestamp)
    }

    fn latest_timestamp(&self) -> Result<Option<i64>> {
        self.repository.latest_timestamp()
    }

    async fn clear_tracks(&self) -> Result<usize> {
        let deleted = self.repository.delete_all().await?;
        info!("Cleared {} track(s), ID sequence reset", deleted);
        self.event_sink.emit(DomainEvent::tracks_cleared(deleted));
        Ok(deleted)
    }
}
