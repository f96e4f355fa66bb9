//! route-picker
//!
//! Two-point route selection against a remote shortest-path backend:
//! coordinate validation, response decoding, the HTTP client, and the
//! selection state machine that ties them together.

pub mod error;
pub mod geo;
pub mod path;
pub mod decode;
pub mod traits;
pub mod client;
pub mod selection;
pub mod relay;
pub mod logging;

pub use error::{Endpoint, Result, RouteError};
pub use geo::{validate, BoundingBox, GeoPoint, MapNode};
pub use path::{RoutePath, RouteResult};
pub use selection::{Phase, Selection, SelectionState};
