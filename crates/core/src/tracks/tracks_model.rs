//! Track domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};
use crate::igc::ExtractedTrack;

/// Domain model representing a persisted flight track.
///
/// `simple_id` and `timestamp` are assigned by the track store and stay out of
/// the public JSON representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    #[serde(skip)]
    pub simple_id: i64,
    #[serde(skip)]
    pub timestamp: i64,
    #[serde(rename = "H_date")]
    pub h_date: String,
    pub pilot: String,
    pub glider: String,
    pub glider_id: String,
    pub track_length: f64,
    #[serde(rename = "track_src_url")]
    pub source_url: String,
}

/// Input model for adding a track to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrack {
    pub h_date: String,
    pub pilot: String,
    pub glider: String,
    pub glider_id: String,
    pub track_length: f64,
    pub source_url: String,
    /// Arrival time to store instead of the clock. Only tests and tooling set
    /// this; ingestion always leaves it empty.
    pub timestamp_override: Option<i64>,
}

impl NewTrack {
    pub fn from_extracted(extracted: ExtractedTrack, source_url: impl Into<String>) -> Self {
        Self {
            h_date: extracted.h_date,
            pilot: extracted.pilot,
            glider: extracted.glider,
            glider_id: extracted.glider_id,
            track_length: extracted.track_length,
            source_url: source_url.into(),
            timestamp_override: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp_override = Some(timestamp);
        self
    }
}

/// Single track attribute addressable through `track/{id}/{field}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Pilot,
    Glider,
    GliderId,
    TrackLength,
    HDate,
    TrackSrcUrl,
}

impl TrackField {
    pub const ALL: [TrackField; 6] = [
        TrackField::Pilot,
        TrackField::Glider,
        TrackField::GliderId,
        TrackField::TrackLength,
        TrackField::HDate,
        TrackField::TrackSrcUrl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackField::Pilot => "pilot",
            TrackField::Glider => "glider",
            TrackField::GliderId => "glider_id",
            TrackField::TrackLength => "track_length",
            TrackField::HDate => "h_date",
            TrackField::TrackSrcUrl => "track_src_url",
        }
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_ascii_lowercase();
        TrackField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == lowered)
            .ok_or_else(|| {
                let options: Vec<&str> = TrackField::ALL.iter().map(|f| f.as_str()).collect();
                Error::NotFound(format!(
                    "Unknown track field '{}'. Options are {}",
                    s,
                    options.join(", ")
                ))
            })
    }
}

impl Track {
    /// Plain-text value of a single field.
    pub fn field_value(&self, field: TrackField) -> String {
        match field {
            TrackField::Pilot => self.pilot.clone(),
            TrackField::Glider => self.glider.clone(),
            TrackField::GliderId => self.glider_id.clone(),
            TrackField::TrackLength => self.track_length.to_string(),
            TrackField::HDate => self.h_date.clone(),
            TrackField::TrackSrcUrl => self.source_url.clone(),
        }
    }
}
