use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Router,
};

use crate::{error::ApiResult, main_lib::AppState};

async fn tracks_count(State(state): State<Arc<AppState>>) -> ApiResult<String> {
    Ok(state.track_service.count_tracks()?.to_string())
}

async fn clear_tracks(State(state): State<Arc<AppState>>) -> ApiResult<String> {
    let deleted = state.track_service.clear_tracks().await?;
    tracing::warn!("Admin cleared {} track(s)", deleted);
    Ok(deleted.to_string())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/tracks_count", get(tracks_count))
        .route("/admin/tracks", delete(clear_tracks))
}
