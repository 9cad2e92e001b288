#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::{Path, State},
    http::{Method, Request, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use paragliding_server::{api::app_router, build_state, config::Config};
use tempfile::TempDir;
use tower::ServiceExt;

pub const MADRID_IGC: &str = include_str!("../fixtures/madrid.igc");

pub struct TestApp {
    pub router: Router,
    _dir: TempDir,
}

pub async fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        http_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config).unwrap(),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, None).await
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

/// Local HTTP server that serves IGC files and records webhook deliveries.
pub struct FixtureServer {
    pub addr: SocketAddr,
    deliveries: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl FixtureServer {
    pub async fn start() -> Self {
        let deliveries: Arc<Mutex<Vec<(String, serde_json::Value)>>> = Arc::default();

        let router = Router::new()
            .route("/flights/{name}", get(serve_flight))
            .route("/hooks/{name}", post(capture_hook))
            .with_state(deliveries.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, deliveries }
    }

    pub fn flight_url(&self, name: &str) -> String {
        format!("http://{}/flights/{}", self.addr, name)
    }

    pub fn hook_url(&self, name: &str) -> String {
        format!("http://{}/hooks/{}", self.addr, name)
    }

    pub fn deliveries(&self) -> Vec<(String, serde_json::Value)> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Polls until at least `count` deliveries arrived or the wait runs out.
    pub async fn wait_for_deliveries(&self, count: usize) -> Vec<(String, serde_json::Value)> {
        for _ in 0..100 {
            let current = self.deliveries();
            if current.len() >= count {
                return current;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.deliveries()
    }
}

async fn serve_flight(Path(name): Path<String>) -> Result<String, StatusCode> {
    match name.as_str() {
        "madrid.igc" => Ok(MADRID_IGC.to_string()),
        "garbage.igc" => Ok("<html>nothing to see</html>".to_string()),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn capture_hook(
    Path(name): Path<String>,
    State(deliveries): State<Arc<Mutex<Vec<(String, serde_json::Value)>>>>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    deliveries.lock().unwrap().push((name, body));
    StatusCode::OK
}
