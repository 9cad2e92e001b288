//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about persisted track data. Runtime adapters
/// translate them into follow-up work such as webhook notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A track was persisted and received its sequential ID.
    TrackAdded { simple_id: i64, timestamp: i64 },

    /// All tracks were deleted and the ID sequence was reset.
    TracksCleared { deleted: usize },
}

impl DomainEvent {
    /// Creates a TrackAdded event.
    pub fn track_added(simple_id: i64, timestamp: i64) -> Self {
        Self::TrackAdded {
            simple_id,
            timestamp,
        }
    }

    /// Creates a TracksCleared event.
    pub fn tracks_cleared(deleted: usize) -> Self {
        Self::TracksCleared { deleted }
    }
}
