//! Pass-through relay in front of the routing backend.
//!
//! Exposes the backend's two endpoints under `/api`, forwarding each call
//! through [`RouteClient`] so that responses are re-validated before they
//! reach the caller. Upstream error statuses are passed on unchanged with
//! the upstream text wrapped as `{"error": ...}`.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::client::{ClientConfig, RouteClient};
use crate::decode::MapNodesResponse;
use crate::error::{Result, RouteError};
use crate::geo::{BoundingBox, GeoPoint};

pub const DEFAULT_RELAY_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub backend: ClientConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_RELAY_PORT,
            backend: ClientConfig::default(),
        }
    }
}

impl RelayConfig {
    /// `RELAY_PORT` (default 3000) plus the backend settings from
    /// [`ClientConfig::from_env`].
    pub fn from_env() -> Self {
        let port = std::env::var("RELAY_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_RELAY_PORT);

        Self {
            port,
            backend: ClientConfig::from_env(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PointBody {
    lat: f64,
    lon: f64,
}

/// Incoming shortest-path body; points are range-checked after parsing so
/// that a bad coordinate is reported as `InvalidCoordinate`.
#[derive(Debug, Deserialize)]
struct ShortestBody {
    origin: PointBody,
    destination: PointBody,
}

impl ShortestBody {
    fn into_points(self) -> Result<(GeoPoint, GeoPoint)> {
        let origin = GeoPoint::new(self.origin.lat, self.origin.lon)?;
        let destination = GeoPoint::new(self.destination.lat, self.destination.lon)?;
        Ok((origin, destination))
    }
}

/// Optional bbox filter; all four bounds or none.
#[derive(Debug, Default, Deserialize)]
pub struct NodesQuery {
    pub min_lat: Option<f64>,
    pub max_lat: Option<f64>,
    pub min_lon: Option<f64>,
    pub max_lon: Option<f64>,
}

impl NodesQuery {
    pub fn bbox(&self) -> Result<Option<BoundingBox>> {
        match (self.min_lat, self.max_lat, self.min_lon, self.max_lon) {
            (None, None, None, None) => Ok(None),
            (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) => {
                BoundingBox::new(min_lat, max_lat, min_lon, max_lon).map(Some)
            }
            _ => Err(RouteError::InvalidBoundingBox(
                "min_lat, max_lat, min_lon and max_lon must be given together".to_string(),
            )),
        }
    }
}

pub fn router(client: RouteClient) -> Router {
    Router::new()
        .route("/api/routes/shortest", post(shortest_handler))
        .route("/api/map/nodes", get(map_nodes_handler))
        .with_state(client)
}

async fn shortest_handler(
    State(client): State<RouteClient>,
    body: std::result::Result<Json<ShortestBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let (origin, destination) = match body.into_points() {
        Ok(points) => points,
        Err(err) => return error_response(err),
    };
    info!(?origin, ?destination, "relaying shortest path");
    match client.request_shortest_path(origin, destination).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(err),
    }
}

async fn map_nodes_handler(
    State(client): State<RouteClient>,
    query: std::result::Result<Query<NodesQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let bbox = match query.bbox() {
        Ok(bbox) => bbox,
        Err(err) => return error_response(err),
    };
    info!(?bbox, "relaying map nodes");
    match client.request_map_nodes(bbox).await {
        Ok(nodes) => Json(MapNodesResponse { nodes }).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: RouteError) -> Response {
    let (status, message) = match &err {
        RouteError::Transport { status, body, .. } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            body.clone(),
        ),
        RouteError::InvalidCoordinate { .. } | RouteError::InvalidBoundingBox(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        RouteError::SchemaViolation { .. } | RouteError::Unreachable(_) => {
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
    };
    warn!(status = status.as_u16(), error = %err, "relay request failed");
    (status, Json(json!({ "error": message }))).into_response()
}

/// Malformed request that never reached the client.
fn bad_request(message: String) -> Response {
    warn!(%message, "rejected relay request");
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
