//! Error taxonomy shared by the validator, decoder, client and relay.
//!
//! The `Display` output of every variant is the message shown to the user,
//! so the selection state machine can store `err.to_string()` directly.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouteError>;

/// Backend endpoint a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ShortestPath,
    MapNodes,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::ShortestPath => f.write_str("Route"),
            Endpoint::MapNodes => f.write_str("Map nodes"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RouteError {
    /// Latitude/longitude outside `[-90, 90]` / `[-180, 180]`, or non-finite.
    #[error("Invalid coordinate (lat={lat}, lon={lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Malformed bounding box filter; raised before any request is sent.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Non-success HTTP status. The body is kept verbatim.
    #[error("{endpoint} request failed ({status}): {body}")]
    Transport {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// Response body does not match the expected shape or bounds.
    #[error("Invalid {endpoint} response: {detail}")]
    SchemaViolation { endpoint: Endpoint, detail: String },

    /// Request never produced an HTTP status (connect failure, timeout, ...).
    #[error("Backend unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
}

impl RouteError {
    pub(crate) fn schema(endpoint: Endpoint, detail: impl fmt::Display) -> Self {
        RouteError::SchemaViolation {
            endpoint,
            detail: detail.to_string(),
        }
    }
}
