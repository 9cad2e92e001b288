//! Notification payloads and dispatch bookkeeping.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ticker::{deserialize_millis, serialize_millis};

/// Message POSTed to a webhook subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookMessage {
    pub content: String,
    #[serde(rename = "t_latest")]
    pub latest: i64,
    pub tracks: Vec<i64>,
    #[serde(
        serialize_with = "serialize_millis",
        deserialize_with = "deserialize_millis"
    )]
    pub processing: Duration,
}

impl WebhookMessage {
    pub fn new(latest: i64, tracks: Vec<i64>, processing: Duration) -> Self {
        let millis = processing.as_millis();
        let content = format!(
            "Latest timestamp: {}, {} new tracks are: {}. (processing: {}s {}ms)",
            latest,
            tracks.len(),
            format_track_ids(&tracks),
            millis / 1000,
            millis % 1000
        );
        Self {
            content,
            latest,
            tracks,
            processing,
        }
    }
}

/// `[1, 2, 3]` -> `"1, 2, 3"`.
pub fn format_track_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of one dispatcher pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Subscribers looked at.
    pub evaluated: usize,
    /// Subscribers whose threshold matched and whose delivery succeeded.
    pub notified: usize,
    /// Subscribers that hit a storage or delivery error.
    pub failed: usize,
}
