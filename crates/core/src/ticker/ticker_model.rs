//! Ticker domain models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// A bounded, time-ordered window over stored tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerWindow {
    /// Timestamp of the last track in the underlying sequence.
    #[serde(rename = "t_latest")]
    pub latest: i64,
    /// Timestamp of the first track in the underlying sequence.
    #[serde(rename = "t_start")]
    pub start: i64,
    /// Timestamp of the last track included in `tracks`.
    #[serde(rename = "t_stop")]
    pub stop: i64,
    pub tracks: Vec<i64>,
    #[serde(
        serialize_with = "serialize_millis",
        deserialize_with = "deserialize_millis"
    )]
    pub processing: Duration,
}

pub(crate) fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

pub(crate) fn deserialize_millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Duration, D::Error> {
    let millis = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(millis))
}
