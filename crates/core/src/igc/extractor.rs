//! Track extraction from remote IGC files.

use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;
use url::Url;

use super::parser::parse_igc;
use crate::constants::IGC_FILE_EXTENSION;
use crate::errors::{Error, Result, ValidationError};

/// Flight metadata extracted from a track source.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTrack {
    pub h_date: String,
    pub pilot: String,
    pub glider: String,
    pub glider_id: String,
    /// Kilometres along the recorded fixes.
    pub track_length: f64,
}

/// Turns a track source URL into flight metadata.
#[async_trait]
pub trait TrackExtractorTrait: Send + Sync {
    async fn extract(&self, source_url: &str) -> Result<ExtractedTrack>;
}

/// Checks that a source URL is absolute and names an `.igc` file.
pub fn validate_source_url(source_url: &str) -> Result<Url> {
    let trimmed = source_url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("url".to_string()).into());
    }
    if !trimmed.ends_with(IGC_FILE_EXTENSION) {
        return Err(ValidationError::UnsupportedUrl(format!(
            "'{}' does not point at an {} file",
            trimmed, IGC_FILE_EXTENSION
        ))
        .into());
    }
    Url::parse(trimmed)
        .map_err(|e| ValidationError::UnsupportedUrl(format!("'{}': {}", trimmed, e)).into())
}

/// Downloads IGC files over HTTP and parses them.
pub struct HttpTrackExtractor {
    client: reqwest::Client,
}

impl HttpTrackExtractor {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TrackExtractorTrait for HttpTrackExtractor {
    async fn extract(&self, source_url: &str) -> Result<ExtractedTrack> {
        debug!("[IGC] GET {}", source_url);
        let response = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("Request to {} failed: {}", source_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("[IGC] {} answered {}", source_url, status);
            return Err(Error::Extraction(format!(
                "{} answered with status {}",
                source_url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to read {}: {}", source_url, e)))?;

        let flight = parse_igc(&body)?;
        Ok(ExtractedTrack {
            h_date: flight.header_date().unwrap_or_default(),
            track_length: flight.track_length(),
            pilot: flight.pilot,
            glider: flight.glider_type,
            glider_id: flight.glider_id,
        })
    }
}
