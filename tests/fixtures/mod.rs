//! Test fixtures for route-picker.
//!
//! - An in-process stub of the routing backend (axum on 127.0.0.1:0)
//! - Points around Piedmont, CA, the backend's default map area

#![allow(dead_code)]

pub mod piedmont_locations;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{RawQuery, State},
    http::StatusCode,
    routing::{get, post},
};

use route_picker::client::{ClientConfig, RouteClient};

pub use piedmont_locations::*;

/// Canned reply for one stub endpoint.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
}

impl StubReply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Requests seen by the stub backend.
#[derive(Debug)]
pub struct StubBackend {
    shortest: StubReply,
    nodes: StubReply,
    shortest_calls: AtomicUsize,
    nodes_calls: AtomicUsize,
    last_body: Mutex<Option<String>>,
    last_query: Mutex<Option<String>>,
}

impl StubBackend {
    pub fn shortest_calls(&self) -> usize {
        self.shortest_calls.load(Ordering::SeqCst)
    }

    pub fn nodes_calls(&self) -> usize {
        self.nodes_calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.last_body
            .lock()
            .unwrap()
            .as_deref()
            .map(|body| serde_json::from_str(body).expect("request body is JSON"))
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

/// Start a stub backend and return its base URL.
pub async fn spawn_backend(shortest: StubReply, nodes: StubReply) -> (String, Arc<StubBackend>) {
    let backend = Arc::new(StubBackend {
        shortest,
        nodes,
        shortest_calls: AtomicUsize::new(0),
        nodes_calls: AtomicUsize::new(0),
        last_body: Mutex::new(None),
        last_query: Mutex::new(None),
    });

    let app = Router::new()
        .route("/routes/shortest", post(shortest_handler))
        .route("/map/nodes", get(nodes_handler))
        .with_state(backend.clone());

    (serve(app).await, backend)
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> RouteClient {
    RouteClient::new(ClientConfig::default().with_base_url(base_url)).expect("build client")
}

pub fn route_body() -> serde_json::Value {
    serde_json::json!({
        "path": [
            {"lat": ORIGIN.0, "lon": ORIGIN.1},
            {"lat": DESTINATION.0, "lon": DESTINATION.1}
        ],
        "distance_m": 1500
    })
}

pub fn nodes_body() -> serde_json::Value {
    serde_json::json!({
        "nodes": [
            {"id": 53028190, "lat": 37.8244, "lon": -122.2312},
            {"id": 53028191, "lat": 37.8251, "lon": -122.2298}
        ]
    })
}

async fn shortest_handler(
    State(backend): State<Arc<StubBackend>>,
    body: String,
) -> (StatusCode, String) {
    backend.shortest_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_body.lock().unwrap() = Some(body);
    reply(&backend.shortest)
}

async fn nodes_handler(
    State(backend): State<Arc<StubBackend>>,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    backend.nodes_calls.fetch_add(1, Ordering::SeqCst);
    *backend.last_query.lock().unwrap() = query;
    reply(&backend.nodes)
}

fn reply(stub: &StubReply) -> (StatusCode, String) {
    let status = StatusCode::from_u16(stub.status).expect("valid stub status");
    (status, stub.body.clone())
}
