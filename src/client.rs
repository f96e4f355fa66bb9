//! HTTP client for the routing backend.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::decode::{decode_map_nodes, decode_shortest, parse_body};
use crate::error::{Endpoint, Result, RouteError};
use crate::geo::{BoundingBox, GeoPoint, MapNode};
use crate::path::RouteResult;
use crate::traits::RouteBackend;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL overridden by `BACKEND_URL` when set.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Body of a shortest-path request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShortestRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

#[derive(Debug, Clone)]
pub struct RouteClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl RouteClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `{origin, destination}` and decode the `{path, distance_m}` reply.
    ///
    /// No retries and no caching.
    pub async fn request_shortest_path(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<RouteResult> {
        let url = self.config.endpoint_url("/routes/shortest");
        debug!(%url, ?origin, ?destination, "requesting shortest path");

        let response = self
            .client
            .post(url)
            .json(&ShortestRequest {
                origin,
                destination,
            })
            .send()
            .await?;

        let raw = read_success(Endpoint::ShortestPath, response).await?;
        decode_shortest(raw)
    }

    /// GET map nodes, filtered by `bbox` when given.
    ///
    /// The box is checked before anything is sent.
    pub async fn request_map_nodes(&self, bbox: Option<BoundingBox>) -> Result<Vec<MapNode>> {
        if let Some(bbox) = &bbox {
            bbox.validate()?;
        }

        let url = self.config.endpoint_url("/map/nodes");
        debug!(%url, ?bbox, "requesting map nodes");

        let mut request = self.client.get(url);
        if let Some(bbox) = &bbox {
            request = request.query(&bbox.query_pairs());
        }

        let response = request.send().await?;
        let raw = read_success(Endpoint::MapNodes, response).await?;
        decode_map_nodes(raw)
    }
}

impl RouteBackend for RouteClient {
    async fn shortest_path(&self, origin: GeoPoint, destination: GeoPoint) -> Result<RouteResult> {
        self.request_shortest_path(origin, destination).await
    }

    async fn map_nodes(&self, bbox: Option<BoundingBox>) -> Result<Vec<MapNode>> {
        self.request_map_nodes(bbox).await
    }
}

async fn read_success(endpoint: Endpoint, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        warn!(%endpoint, status = status.as_u16(), %body, "backend returned an error status");
        return Err(RouteError::Transport {
            endpoint,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    parse_body(endpoint, &bytes)
}
