use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use paragliding_core::tracks::{Track, TrackField};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{NewTrackRequest, TrackIdResponse},
};

/// Unknown and malformed ids are both reported as missing tracks.
fn lookup_track(state: &AppState, raw_id: &str) -> ApiResult<Track> {
    let not_found = || ApiError::NotFound(format!("Track '{}' not found", raw_id));
    let id: i64 = raw_id.trim().parse().map_err(|_| not_found())?;
    state.track_service.get_track(id)?.ok_or_else(not_found)
}

async fn register_track(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTrackRequest>, JsonRejection>,
) -> ApiResult<Json<TrackIdResponse>> {
    let Json(request) = payload?;
    let track = state.track_service.ingest_from_url(&request.url).await?;
    Ok(Json(TrackIdResponse {
        id: track.simple_id,
    }))
}

async fn list_track_ids(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<i64>>> {
    Ok(Json(state.track_service.get_track_ids()?))
}

async fn get_track(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Track>> {
    Ok(Json(lookup_track(&state, &id)?))
}

async fn get_track_field(
    Path((id, field)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<String> {
    let track = lookup_track(&state, &id)?;
    let field: TrackField = field.parse()?;
    Ok(track.field_value(field))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/track", get(list_track_ids).post(register_track))
        .route("/track/{id}", get(get_track))
        .route("/track/{id}/{field}", get(get_track_field))
}
