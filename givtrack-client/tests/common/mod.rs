//! Shared test fixture: a loopback mock of the contribution backend
//!
//! Serves `GET /blogs` with the same two shapes the real backend uses:
//! a bare array for the list endpoint and a `{"data": [...]}` envelope for
//! `?qrCode=` lookups, with `{"message": ...}` error bodies on failure.
#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockBackend {
    by_code: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    delays_ms: Arc<Mutex<HashMap<String, u64>>>,
    list: Arc<Mutex<Vec<Value>>>,
    fail_list: Arc<AtomicBool>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a QR code to a result list (empty list => 200 with `{"data": []}`)
    pub fn set_code(&self, code: &str, records: Vec<Value>) {
        self.by_code.lock().unwrap().insert(code.to_string(), records);
    }

    /// Delay responses for one code, to exercise completion-order races
    pub fn set_delay(&self, code: &str, ms: u64) {
        self.delays_ms.lock().unwrap().insert(code.to_string(), ms);
    }

    pub fn set_list(&self, records: Vec<Value>) {
        *self.list.lock().unwrap() = records;
    }

    /// Make the list endpoint return 500 with an error body
    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Bind on an ephemeral loopback port and return the base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/blogs", get(blogs_handler))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn blogs_handler(
    State(backend): State<MockBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(code) = params.get("qrCode") {
        let delay = backend.delays_ms.lock().unwrap().get(code).copied();
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        let found = backend.by_code.lock().unwrap().get(code).cloned();
        match found {
            Some(records) => Json(json!({ "data": records })).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "not found" })),
            )
                .into_response(),
        }
    } else {
        if backend.fail_list.load(Ordering::SeqCst) {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "backend unavailable" })),
            )
                .into_response();
        }
        let list = backend.list.lock().unwrap().clone();
        Json(Value::Array(list)).into_response()
    }
}

/// Minimal contribution record as the backend would serialize it
pub fn record(id: &str, code: &str) -> Value {
    json!({
        "_id": id,
        "qrCode": code,
        "charityName": "Hope Fund",
        "description": "Winter relief",
        "childStory": []
    })
}
