mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, build_test_app, FixtureServer};
use serde_json::json;

#[tokio::test]
async fn register_get_and_delete_webhook() {
    let app = build_test_app().await;

    let response = app
        .post_json(
            "/paragliding/api/webhook/new_track",
            json!({ "webhookURL": "http://hooks.local/a", "minTriggerValue": 2 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_text(response).await;
    assert!(!id.is_empty());

    let uri = format!("/paragliding/api/webhook/new_track/{}", id);
    let fetched = body_json(app.get(&uri).await).await;
    assert_eq!(
        fetched,
        json!({ "webhookURL": "http://hooks.local/a", "minTriggerValue": 2 })
    );

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, fetched);

    assert_eq!(app.get(&uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trigger_value_defaults_to_one() {
    let app = build_test_app().await;
    let id = body_text(
        app.post_json(
            "/paragliding/api/webhook/new_track",
            json!({ "webhookURL": "http://hooks.local/a" }),
        )
        .await,
    )
    .await;

    let fetched = body_json(
        app.get(&format!("/paragliding/api/webhook/new_track/{}", id))
            .await,
    )
    .await;
    assert_eq!(fetched["minTriggerValue"], 1);
}

#[tokio::test]
async fn rejects_invalid_subscriptions() {
    let app = build_test_app().await;
    for body in [
        json!({ "webhookURL": "", "minTriggerValue": 1 }),
        json!({ "webhookURL": "http://hooks.local/a", "minTriggerValue": 0 }),
        json!({ "minTriggerValue": 1 }),
    ] {
        let response = app
            .post_json("/paragliding/api/webhook/new_track", body.clone())
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
    }
}

#[tokio::test]
async fn new_track_notifies_subscriber() {
    let fixtures = FixtureServer::start().await;
    let app = build_test_app().await;

    app.post_json(
        "/paragliding/api/webhook/new_track",
        json!({ "webhookURL": fixtures.hook_url("every"), "minTriggerValue": 1 }),
    )
    .await;

    let response = app
        .post_json(
            "/paragliding/api/track",
            json!({ "url": fixtures.flight_url("madrid.igc") }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let deliveries = fixtures.wait_for_deliveries(1).await;
    assert_eq!(deliveries.len(), 1);
    let (hook, message) = &deliveries[0];
    assert_eq!(hook, "every");
    assert_eq!(message["tracks"], json!([0]));
    assert!(message["content"]
        .as_str()
        .unwrap()
        .contains("1 new tracks are: 0."));

    let latest = body_json(app.get("/paragliding/api/ticker/latest").await).await;
    assert_eq!(message["t_latest"], latest);
}

#[tokio::test]
async fn threshold_batches_tracks() {
    let fixtures = FixtureServer::start().await;
    let app = build_test_app().await;

    app.post_json(
        "/paragliding/api/webhook/new_track",
        json!({ "webhookURL": fixtures.hook_url("pairs"), "minTriggerValue": 2 }),
    )
    .await;

    for _ in 0..2 {
        app.post_json(
            "/paragliding/api/track",
            json!({ "url": fixtures.flight_url("madrid.igc") }),
        )
        .await;
    }

    // The first delivery carries both tracks, whichever order the
    // dispatcher saw them in.
    let deliveries = fixtures.wait_for_deliveries(1).await;
    assert!(!deliveries.is_empty());
    assert_eq!(deliveries[0].1["tracks"], json!([0, 1]));
}
