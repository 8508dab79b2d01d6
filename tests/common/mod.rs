#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chronosim::Config;
use serde_json::Value;
use tokio::net::TcpListener;

pub type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Canned answer for one fake endpoint.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: Value,
    pub seen: Captured,
}

impl Canned {
    pub fn ok(body: Value) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.seen.lock().expect("capture lock").clone()
    }
}

async fn answer(
    State(canned): State<Canned>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    canned.seen.lock().expect("capture lock").push(params);
    (canned.status, Json(canned.body.clone()))
}

pub struct FakeServices {
    pub base_url: String,
    pub archive: Canned,
    pub events: Canned,
    pub key_test: Canned,
}

impl FakeServices {
    pub async fn start(archive: Canned, events: Canned, key_test: Canned) -> Self {
        let router = Router::new()
            .route("/archive", get(answer).with_state(archive.clone()))
            .route("/events", get(answer).with_state(events.clone()))
            .route("/apod", get(answer).with_state(key_test.clone()));
        let base_url = serve(router).await;
        Self {
            base_url,
            archive,
            events,
            key_test,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.archive_url = format!("{}/archive", self.base_url);
        config.api.events_url = format!("{}/events", self.base_url);
        config.api.key_test_url = format!("{}/apod", self.base_url);
        config.api.key = "test-key".into();
        config.api.timeout_secs = 5;
        config.seed = Some(2023);
        config
    }
}

pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

/// An address nothing listens on.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("local addr")
}

pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.api.archive_url = "http://127.0.0.1:9/archive".into();
    config.api.events_url = "http://127.0.0.1:9/events".into();
    config.api.key_test_url = "http://127.0.0.1:9/apod".into();
    config.api.timeout_secs = 2;
    config.seed = Some(7);
    config
}

pub fn events_body(ids: &[&str]) -> Value {
    let events: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            serde_json::json!({
                "id": format!("EONET_{i}"),
                "title": "event",
                "categories": [{ "id": id, "title": id }],
            })
        })
        .collect();
    serde_json::json!({ "title": "EONET Events", "events": events })
}
