//! In-memory doubles shared by the service tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::igc::{ExtractedTrack, TrackExtractorTrait};
use crate::notifications::{NotifierTrait, WebhookMessage};
use crate::tracks::{NewTrack, Track, TrackRepositoryTrait};
use crate::webhooks::{NewWebhook, Webhook, WebhookRepositoryTrait};

#[derive(Default)]
struct TrackTable {
    next_id: i64,
    rows: Vec<Track>,
}

/// Track repository backed by a vector.
#[derive(Default)]
pub struct InMemoryTrackRepository {
    table: Mutex<TrackTable>,
    /// Timestamp used when a `NewTrack` carries no override.
    clock: Mutex<i64>,
}

impl InMemoryTrackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_clock(&self, timestamp: i64) {
        *self.clock.lock().unwrap() = timestamp;
    }

    pub fn next_id(&self) -> i64 {
        self.table.lock().unwrap().next_id
    }
}

#[async_trait]
impl TrackRepositoryTrait for InMemoryTrackRepository {
    async fn insert(&self, new_track: NewTrack) -> Result<Track> {
        let timestamp = new_track
            .timestamp_override
            .unwrap_or(*self.clock.lock().unwrap());
        let mut table = self.table.lock().unwrap();
        let track = Track {
            simple_id: table.next_id,
            timestamp,
            h_date: new_track.h_date,
            pilot: new_track.pilot,
            glider: new_track.glider,
            glider_id: new_track.glider_id,
            track_length: new_track.track_length,
            source_url: new_track.source_url,
        };
        table.next_id += 1;
        table.rows.push(track.clone());
        Ok(track)
    }

    fn count(&self) -> Result<i64> {
        Ok(self.table.lock().unwrap().rows.len() as i64)
    }

    fn get_by_id(&self, simple_id: i64) -> Result<Option<Track>> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|t| t.simple_id == simple_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Track>> {
        Ok(self.table.lock().unwrap().rows.clone())
    }

    fn list_ids(&self) -> Result<Vec<i64>> {
        Ok(self.list()?.iter().map(|t| t.simple_id).collect())
    }

    fn list_after(&self, timestamp: i64) -> Result<Vec<Track>> {
        let mut tracks: Vec<Track> = self
            .list()?
            .into_iter()
            .filter(|t| t.timestamp > timestamp)
            .collect();
        tracks.sort_by_key(|t| (t.timestamp, t.simple_id));
        Ok(tracks)
    }

    fn latest_timestamp(&self) -> Result<Option<i64>> {
        Ok(self.table.lock().unwrap().rows.last().map(|t| t.timestamp))
    }

    async fn delete_all(&self) -> Result<usize> {
        let mut table = self.table.lock().unwrap();
        let deleted = table.rows.len();
        table.rows.clear();
        table.next_id = 0;
        Ok(deleted)
    }
}

/// Webhook repository backed by a vector. Updates to ids listed in
/// `failing_updates` return a database error.
#[derive(Default)]
pub struct InMemoryWebhookRepository {
    rows: Mutex<Vec<Webhook>>,
    counter: Mutex<u32>,
    pub failing_updates: Mutex<Vec<String>>,
}

impl InMemoryWebhookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_check(&self, webhook_id: &str) -> Option<i64> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == webhook_id)
            .map(|w| w.last_check)
    }
}

#[async_trait]
impl WebhookRepositoryTrait for InMemoryWebhookRepository {
    async fn create(&self, new_webhook: NewWebhook, last_check: i64) -> Result<Webhook> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        let webhook = Webhook {
            id: format!("hook-{}", *counter),
            url: new_webhook.url,
            min_trigger_value: new_webhook.min_trigger_value,
            last_check,
        };
        self.rows.lock().unwrap().push(webhook.clone());
        Ok(webhook)
    }

    fn get_by_id(&self, webhook_id: &str) -> Result<Option<Webhook>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == webhook_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Webhook>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn delete(&self, webhook_id: &str) -> Result<Option<Webhook>> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|w| w.id == webhook_id);
        Ok(position.map(|idx| rows.remove(idx)))
    }

    async fn update_last_check(&self, webhook_id: &str, last_check: i64) -> Result<()> {
        if self
            .failing_updates
            .lock()
            .unwrap()
            .iter()
            .any(|id| id == webhook_id)
        {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "update rejected".to_string(),
            )));
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|w| w.id == webhook_id) {
            Some(webhook) => {
                webhook.last_check = last_check;
                Ok(())
            }
            None => Err(Error::Database(DatabaseError::NotFound(
                webhook_id.to_string(),
            ))),
        }
    }
}

/// Extractor that returns a fixed flight for every URL, or fails.
pub struct StaticExtractor {
    result: Option<ExtractedTrack>,
}

impl StaticExtractor {
    pub fn returning(pilot: &str) -> Self {
        Self {
            result: Some(ExtractedTrack {
                h_date: "2016-02-19T00:00:00+00:00".to_string(),
                pilot: pilot.to_string(),
                glider: "RV8".to_string(),
                glider_id: "EC-XLL".to_string(),
                track_length: 443.25,
            }),
        }
    }

    pub fn failing() -> Self {
        Self { result: None }
    }
}

#[async_trait]
impl TrackExtractorTrait for StaticExtractor {
    async fn extract(&self, source_url: &str) -> Result<ExtractedTrack> {
        self.result
            .clone()
            .ok_or_else(|| Error::Extraction(format!("cannot read {}", source_url)))
    }
}

/// Notifier that records every delivery. URLs listed in `failing_urls`
/// produce a delivery error (after being recorded).
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, WebhookMessage)>>,
    pub failing_urls: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(String, WebhookMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifierTrait for RecordingNotifier {
    async fn notify(&self, url: &str, message: &WebhookMessage) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((url.to_string(), message.clone()));
        if self.failing_urls.lock().unwrap().iter().any(|u| u == url) {
            return Err(Error::Delivery(format!("{} unreachable", url)));
        }
        Ok(())
    }
}

pub fn new_track(pilot: &str) -> NewTrack {
    NewTrack {
        h_date: "2016-02-19T00:00:00+00:00".to_string(),
        pilot: pilot.to_string(),
        glider: "RV8".to_string(),
        glider_id: "EC-XLL".to_string(),
        track_length: 443.25,
        source_url: format!("http://tracks.local/{}.igc", pilot),
        timestamp_override: None,
    }
}

/// Event sink that keeps everything it is handed, in order.
#[derive(Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl DomainEventSink for RecordingEventSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}
