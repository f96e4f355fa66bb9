//! Point-selection state machine.
//!
//! Map clicks pick an origin, then a destination; a route request can then
//! be issued and its outcome merged back. Errors never escape this type:
//! the presentation layer only sees `error: Option<String>`.
//!
//! A route request is split into [`SelectionState::begin_find_route`] and
//! [`SelectionState::complete_find_route`] so that a caller driving the
//! request itself can still call [`SelectionState::reset`] while it is in
//! flight. Each request carries a sequence number; a response whose number
//! is no longer current is dropped.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::geo::{validate, GeoPoint};
use crate::path::RouteResult;
use crate::traits::RouteBackend;

/// Which points have been chosen and whether a route is attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Empty,
    OriginSet {
        origin: GeoPoint,
    },
    BothSet {
        origin: GeoPoint,
        destination: GeoPoint,
    },
    Routed {
        origin: GeoPoint,
        destination: GeoPoint,
        route: RouteResult,
    },
}

impl Selection {
    pub fn origin(&self) -> Option<GeoPoint> {
        match self {
            Selection::Empty => None,
            Selection::OriginSet { origin }
            | Selection::BothSet { origin, .. }
            | Selection::Routed { origin, .. } => Some(*origin),
        }
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        match self {
            Selection::BothSet { destination, .. } | Selection::Routed { destination, .. } => {
                Some(*destination)
            }
            _ => None,
        }
    }

    pub fn route(&self) -> Option<&RouteResult> {
        match self {
            Selection::Routed { route, .. } => Some(route),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Selection::Empty => Phase::Empty,
            Selection::OriginSet { .. } => Phase::OriginSet,
            Selection::BothSet { .. } => Phase::BothSet,
            Selection::Routed { .. } => Phase::Routed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Empty,
    OriginSet,
    BothSet,
    Routed,
}

/// Handle for one in-flight route request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteTicket {
    seq: u64,
    origin: GeoPoint,
    destination: GeoPoint,
}

impl RouteTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    pub phase: Phase,
    pub origin: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
    pub route: Vec<GeoPoint>,
    pub distance: Option<f64>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Selection state for one user session.
#[derive(Debug, Default)]
pub struct SelectionState {
    selection: Selection,
    loading: bool,
    error: Option<String>,
    seq: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a map click.
    ///
    /// Sets the origin when none is chosen, otherwise (re)sets the
    /// destination. Invalid coordinates leave the points untouched and
    /// populate `error`. Ignored while a route request is in flight.
    pub fn click(&mut self, lat: f64, lon: f64) {
        if self.loading {
            debug!(lat, lon, "ignoring click while a route request is in flight");
            return;
        }

        let point = match validate(lat, lon) {
            Ok(point) => point,
            Err(err) => {
                debug!(lat, lon, "rejected click");
                self.error = Some(err.to_string());
                return;
            }
        };

        match self.selection.origin() {
            None => self.set_origin(point),
            Some(origin) => {
                debug!(?point, "destination set");
                self.selection = Selection::BothSet {
                    origin,
                    destination: point,
                };
                self.error = None;
            }
        }
    }

    /// Replace the origin. Any destination and route are dropped.
    pub fn set_origin(&mut self, origin: GeoPoint) {
        if self.loading {
            debug!(?origin, "ignoring origin change while a route request is in flight");
            return;
        }
        debug!(?origin, "origin set");
        self.selection = Selection::OriginSet { origin };
        self.error = None;
    }

    /// Start a route request for the current pair.
    ///
    /// Returns `None` (and changes nothing) unless both points are set and
    /// no request is already in flight.
    pub fn begin_find_route(&mut self) -> Option<RouteTicket> {
        if self.loading {
            debug!(seq = self.seq, "route request already in flight");
            return None;
        }
        let (origin, destination) = match &self.selection {
            Selection::BothSet {
                origin,
                destination,
            }
            | Selection::Routed {
                origin,
                destination,
                ..
            } => (*origin, *destination),
            _ => return None,
        };

        self.seq += 1;
        self.loading = true;
        self.error = None;
        debug!(seq = self.seq, "route request started");

        Some(RouteTicket {
            seq: self.seq,
            origin,
            destination,
        })
    }

    /// Merge the outcome of a request started with `begin_find_route`.
    ///
    /// Returns `false` when the ticket is stale (the session was reset or a
    /// newer request superseded it); the result is then discarded.
    pub fn complete_find_route(&mut self, ticket: RouteTicket, result: Result<RouteResult>) -> bool {
        if !self.loading || ticket.seq != self.seq {
            debug!(ticket = ticket.seq, current = self.seq, "discarding stale route response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(route) => {
                debug!(
                    seq = ticket.seq,
                    points = route.path.len(),
                    distance_m = route.distance_m,
                    "route found"
                );
                self.selection = Selection::Routed {
                    origin: ticket.origin,
                    destination: ticket.destination,
                    route,
                };
            }
            Err(err) => {
                warn!(seq = ticket.seq, error = %err, "route request failed");
                self.error = Some(err.to_string());
                self.selection = Selection::BothSet {
                    origin: ticket.origin,
                    destination: ticket.destination,
                };
            }
        }
        true
    }

    /// Request a route from `backend` and apply the outcome.
    pub async fn find_route<B: RouteBackend>(&mut self, backend: &B) {
        let Some(ticket) = self.begin_find_route() else {
            return;
        };
        let result = backend
            .shortest_path(ticket.origin, ticket.destination)
            .await;
        self.complete_find_route(ticket, result);
    }

    /// Clear everything. Any in-flight request becomes stale.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.selection = Selection::Empty;
        self.loading = false;
        self.error = None;
        debug!(seq = self.seq, "selection reset");
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.selection.origin()
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.selection.destination()
    }

    /// Points of the computed route; empty when there is none.
    pub fn route(&self) -> &[GeoPoint] {
        self.selection
            .route()
            .map(|route| route.path.points())
            .unwrap_or_default()
    }

    pub fn distance(&self) -> Option<f64> {
        self.selection.route().map(|route| route.distance_m)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            phase: self.phase(),
            origin: self.origin(),
            destination: self.destination(),
            route: self.route().to_vec(),
            distance: self.distance(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}
