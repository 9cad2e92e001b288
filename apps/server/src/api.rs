use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::Redirect,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use paragliding_core::utils::time_utils::iso8601_between;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState, models::ApiInfo};

mod admin;
mod ticker;
mod tracks;
mod webhooks;

pub const API_ROOT: &str = "/paragliding/api";

pub async fn healthz() -> &'static str {
    "ok"
}

async fn api_info(State(state): State<Arc<AppState>>) -> Json<ApiInfo> {
    Json(ApiInfo {
        uptime: iso8601_between(state.started_at, Utc::now()),
        info: "Service for Paragliding tracks.".to_string(),
        version: "v1".to_string(),
    })
}

async fn redirect_to_api() -> Redirect {
    Redirect::to(API_ROOT)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/", get(api_info))
        .route("/healthz", get(healthz))
        .merge(tracks::router())
        .merge(ticker::router())
        .merge(webhooks::router())
        .merge(admin::router());

    Ok(Router::new()
        .route("/paragliding", get(redirect_to_api))
        .nest(API_ROOT, api)
        .with_state(state)
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http()))
}
