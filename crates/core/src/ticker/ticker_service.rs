use std::sync::Arc;
use std::time::Instant;

use super::ticker_model::TickerWindow;
use crate::constants::DEFAULT_TICKER_CAP;
use crate::errors::Result;
use crate::tracks::{Track, TrackServiceTrait};

/// Pages a time-ordered track sequence into a ticker window.
///
/// Returns `None` for an empty sequence. A `cap` of zero is treated as one so
/// that `stop` always refers to an included track.
pub fn page(tracks: &[Track], cap: usize) -> Option<TickerWindow> {
    let started = Instant::now();

    let first = tracks.first()?;
    let last = tracks.last()?;
    let included = &tracks[..tracks.len().min(cap.max(1))];
    let stop = included.last()?.timestamp;

    Some(TickerWindow {
        latest: last.timestamp,
        start: first.timestamp,
        stop,
        tracks: included.iter().map(|t| t.simple_id).collect(),
        processing: started.elapsed(),
    })
}

/// Trait for ticker operations
pub trait TickerServiceTrait: Send + Sync {
    /// Window over every stored track.
    fn ticker(&self) -> Result<Option<TickerWindow>>;
    /// Window over the tracks that arrived after `timestamp`.
    fn ticker_after(&self, timestamp: i64) -> Result<Option<TickerWindow>>;
    fn latest_timestamp(&self) -> Result<Option<i64>>;
}

pub struct TickerService {
    track_service: Arc<dyn TrackServiceTrait>,
    cap: usize,
}

impl TickerService {
    pub fn new(track_service: Arc<dyn TrackServiceTrait>) -> Self {
        Self {
            track_service,
            cap: DEFAULT_TICKER_CAP,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap.max(1);
        self
    }
}

impl TickerServiceTrait for TickerService {
    fn ticker(&self) -> Result<Option<TickerWindow>> {
        let tracks = self.track_service.get_all_tracks()?;
        Ok(page(&tracks, self.cap))
    }

    fn ticker_after(&self, timestamp: i64) -> Result<Option<TickerWindow>> {
        let tracks = self.track_service.get_tracks_after(timestamp)?;
        Ok(page(&tracks, self.cap))
    }

    fn latest_timestamp(&self) -> Result<Option<i64>> {
        self.track_service.latest_timestamp()
    }
}
