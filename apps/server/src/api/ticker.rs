use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use paragliding_core::ticker::TickerWindow;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

fn no_tracks() -> ApiError {
    ApiError::NotFound("No tracks available".to_string())
}

async fn get_ticker(State(state): State<Arc<AppState>>) -> ApiResult<Json<TickerWindow>> {
    let window = state.ticker_service.ticker()?.ok_or_else(no_tracks)?;
    Ok(Json(window))
}

async fn get_latest(State(state): State<Arc<AppState>>) -> ApiResult<Json<i64>> {
    let latest = state.ticker_service.latest_timestamp()?.ok_or_else(no_tracks)?;
    Ok(Json(latest))
}

async fn get_ticker_after(
    Path(raw): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TickerWindow>> {
    let timestamp: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("'{}' is not a valid timestamp", raw)))?;
    let window = state
        .ticker_service
        .ticker_after(timestamp)?
        .ok_or_else(|| ApiError::NotFound(format!("No tracks after {}", timestamp)))?;
    Ok(Json(window))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ticker", get(get_ticker))
        .route("/ticker/latest", get(get_latest))
        .route("/ticker/{timestamp}", get(get_ticker_after))
}
