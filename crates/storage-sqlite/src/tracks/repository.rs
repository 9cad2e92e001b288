use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use paragliding_core::tracks::{NewTrack, Track, TrackRepositoryTrait};
use paragliding_core::utils::time_utils::now_timestamp;
use paragliding_core::Result;

use super::model::TrackDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::track_sequence;
use crate::schema::tracks;
use crate::schema::tracks::dsl::*;

/// Primary key of the single sequence row.
const SEQUENCE_ROW: i32 = 1;

pub struct TrackRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TrackRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TrackRepository { pool, writer }
    }
}

#[async_trait]
impl TrackRepositoryTrait for TrackRepository {
    async fn insert(&self, new_track: NewTrack) -> Result<Track> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Track> {
                let next_id = track_sequence::table
                    .find(SEQUENCE_ROW)
                    .select(track_sequence::next_value)
                    .first::<i64>(conn)
                    .map_err(StorageError::from)?;
                let arrived_at = new_track.timestamp_override.unwrap_or_else(now_timestamp);

                let row = TrackDB::from_new(new_track, next_id, arrived_at);
                diesel::insert_into(tracks::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::update(track_sequence::table.find(SEQUENCE_ROW))
                    .set(track_sequence::next_value.eq(next_id + 1))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Track::from(row))
            })
            .await
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        tracks.count().get_result::<i64>(&mut conn).into_core()
    }

    fn get_by_id(&self, track_id: i64) -> Result<Option<Track>> {
        let mut conn = get_connection(&self.pool)?;
        let row = tracks
            .find(track_id)
            .select(TrackDB::as_select())
            .first::<TrackDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Track::from))
    }

    fn list(&self) -> Result<Vec<Track>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tracks
            .order(simpleid.asc())
            .select(TrackDB::as_select())
            .load::<TrackDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Track::from).collect())
    }

    fn list_ids(&self) -> Result<Vec<i64>> {
        let mut conn = get_connection(&self.pool)?;
        tracks
            .select(simpleid)
            .order(simpleid.asc())
            .load::<i64>(&mut conn)
            .into_core()
    }

    fn list_after(&self, after: i64) -> Result<Vec<Track>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = tracks
            .filter(timestamp.gt(after))
            .order((timestamp.asc(), simpleid.asc()))
            .select(TrackDB::as_select())
            .load::<TrackDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Track::from).collect())
    }

    fn latest_timestamp(&self) -> Result<Option<i64>> {
        let mut conn = get_connection(&self.pool)?;
        tracks
            .select(timestamp)
            .order(simpleid.desc())
            .first::<i64>(&mut conn)
            .optional()
            .into_core()
    }

    async fn delete_all(&self) -> Result<usize> {
        self.writer
            .exec(|conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(tracks::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::update(track_sequence::table.find(SEQUENCE_ROW))
                    .set(track_sequence::next_value.eq(0))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }
}
