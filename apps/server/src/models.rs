//! Request and response bodies that only exist at the HTTP edge.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NewTrackRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackIdResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub uptime: String,
    pub info: String,
    pub version: String,
}
