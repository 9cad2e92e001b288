//! Database models for tracks.

use diesel::prelude::*;
use paragliding_core::tracks::{NewTrack, Track};

/// Database model for tracks
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::tracks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TrackDB {
    pub simpleid: i64,
    pub timestamp: i64,
    pub h_date: String,
    pub pilot: String,
    pub glider: String,
    pub glider_id: String,
    pub track_length: f64,
    pub track_src_url: String,
}

impl TrackDB {
    pub fn from_new(new_track: NewTrack, simpleid: i64, timestamp: i64) -> Self {
        Self {
            simpleid,
            timestamp,
            h_date: new_track.h_date,
            pilot: new_track.pilot,
            glider: new_track.glider,
            glider_id: new_track.glider_id,
            track_length: new_track.track_length,
            track_src_url: new_track.source_url,
        }
    }
}

impl From<TrackDB> for Track {
    fn from(db: TrackDB) -> Self {
        Self {
            simple_id: db.simpleid,
            timestamp: db.timestamp,
            h_date: db.h_date,
            pilot: db.pilot,
            glider: db.glider,
            glider_id: db.glider_id,
            track_length: db.track_length,
            source_url: db.track_src_url,
        }
    }
}
