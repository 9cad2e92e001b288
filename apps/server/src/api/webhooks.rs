use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use paragliding_core::webhooks::{NewWebhook, Webhook};

use crate::{error::ApiResult, main_lib::AppState};

async fn register_webhook(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewWebhook>, JsonRejection>,
) -> ApiResult<String> {
    let Json(new_webhook) = payload?;
    new_webhook.validate()?;
    let webhook = state.webhook_service.register(new_webhook).await?;
    Ok(webhook.id)
}

async fn get_webhook(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Webhook>> {
    Ok(Json(state.webhook_service.get_webhook(&id)?))
}

async fn delete_webhook(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Webhook>> {
    Ok(Json(state.webhook_service.delete_webhook(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/webhook/new_track", post(register_webhook))
        .route(
            "/webhook/new_track/{id}",
            get(get_webhook).delete(delete_webhook),
        )
}
