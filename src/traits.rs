//! Backend seam between the selection state machine and the transport.
//!
//! `RouteClient` implements it over HTTP; anything else that can answer
//! shortest-path and node queries (a stub, a local graph) can stand in.

use crate::error::Result;
use crate::geo::{BoundingBox, GeoPoint, MapNode};
use crate::path::RouteResult;

/// Source of shortest paths and map nodes.
///
/// Each call resolves to exactly one of a value or an error. Implementations
/// must not cache: two calls mean two independent round-trips.
pub trait RouteBackend {
    fn shortest_path(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> impl Future<Output = Result<RouteResult>> + Send;

    /// Nodes inside `bbox`, or every node when `bbox` is `None`.
    fn map_nodes(
        &self,
        bbox: Option<BoundingBox>,
    ) -> impl Future<Output = Result<Vec<MapNode>>> + Send;
}
