//! Response decoding for the routing backend.
//!
//! Decoding is all-or-nothing: one bad element rejects the whole payload.
//! Point bounds are enforced by `GeoPoint`'s own deserialiser.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Endpoint, Result, RouteError};
use crate::geo::{GeoPoint, MapNode};
use crate::path::{RoutePath, RouteResult};

#[derive(Debug, Deserialize)]
struct ShortestResponse {
    path: Vec<GeoPoint>,
    distance_m: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MapNodesResponse {
    pub nodes: Vec<MapNode>,
}

/// Parse a raw response body into JSON, attributing failures to `endpoint`.
pub fn parse_body(endpoint: Endpoint, bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|err| RouteError::schema(endpoint, err))
}

pub fn decode_shortest(raw: Value) -> Result<RouteResult> {
    let body: ShortestResponse = serde_json::from_value(raw)
        .map_err(|err| RouteError::schema(Endpoint::ShortestPath, err))?;

    // `!(x >= 0)` also rejects NaN
    if !(body.distance_m >= 0.0) || !body.distance_m.is_finite() {
        return Err(RouteError::schema(
            Endpoint::ShortestPath,
            format!("distance_m must be a non-negative number, got {}", body.distance_m),
        ));
    }

    Ok(RouteResult {
        path: RoutePath::new(body.path),
        distance_m: body.distance_m,
    })
}

pub fn decode_map_nodes(raw: Value) -> Result<Vec<MapNode>> {
    let body: MapNodesResponse = serde_json::from_value(raw)
        .map_err(|err| RouteError::schema(Endpoint::MapNodes, err))?;

    let mut seen = HashSet::with_capacity(body.nodes.len());
    for node in &body.nodes {
        if !seen.insert(node.id) {
            return Err(RouteError::schema(
                Endpoint::MapNodes,
                format!("duplicate node id {}", node.id),
            ));
        }
    }

    Ok(body.nodes)
}
