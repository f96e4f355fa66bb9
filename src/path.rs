//! Route geometry returned by the shortest-path endpoint.
//!
//! A path is stored as the decoded sequence of validated points; the
//! distance always comes from the backend and is never derived from the
//! geometry on this side.

use serde::Serialize;

use crate::geo::GeoPoint;

/// Ordered points from origin (front) to destination (back).
///
/// Empty when no route has been computed or the last request failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutePath {
    points: Vec<GeoPoint>,
}

impl RoutePath {
    /// Creates a path from already-validated points, origin first.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Returns the points in travel order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the path and returns the owned points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    /// Number of points on the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no route is attached.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The origin end of the path, if any.
    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    /// The destination end of the path, if any.
    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }
}

/// A decoded shortest-path answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub path: RoutePath,
    /// Metres, never negative.
    pub distance_m: f64,
}
