//! Validated geographic primitives.
//!
//! Every `GeoPoint` in the crate has passed [`validate`]; deserialising one
//! from JSON runs the same check, so a decoded payload can never carry an
//! out-of-range coordinate.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};

pub const MAX_LAT: f64 = 90.0;
pub const MAX_LON: f64 = 180.0;

/// A latitude/longitude pair within domain bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = RouteError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        validate(raw.lat, raw.lon)
    }
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        validate(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Check a coordinate pair against domain bounds and return it unchanged.
///
/// NaN and infinities are rejected along with out-of-range values.
pub fn validate(lat: f64, lon: f64) -> Result<GeoPoint> {
    let lat_ok = lat.is_finite() && (-MAX_LAT..=MAX_LAT).contains(&lat);
    let lon_ok = lon.is_finite() && (-MAX_LON..=MAX_LON).contains(&lon);
    if lat_ok && lon_ok {
        Ok(GeoPoint { lat, lon })
    } else {
        Err(RouteError::InvalidCoordinate { lat, lon })
    }
}

/// Rectangular filter for node queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self> {
        let bbox = Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [self.min_lat, self.max_lat, self.min_lon, self.max_lon];
        if bounds.iter().any(|value| !value.is_finite()) {
            return Err(RouteError::InvalidBoundingBox(
                "all bounds must be finite numbers".to_string(),
            ));
        }
        if self.min_lat > self.max_lat {
            return Err(RouteError::InvalidBoundingBox(format!(
                "min_lat {} exceeds max_lat {}",
                self.min_lat, self.max_lat
            )));
        }
        if self.min_lon > self.max_lon {
            return Err(RouteError::InvalidBoundingBox(format!(
                "min_lon {} exceeds max_lon {}",
                self.min_lon, self.max_lon
            )));
        }
        Ok(())
    }

    /// Query parameters in the order the map-nodes endpoint documents them.
    pub fn query_pairs(&self) -> [(&'static str, f64); 4] {
        [
            ("min_lat", self.min_lat),
            ("max_lat", self.max_lat),
            ("min_lon", self.min_lon),
            ("max_lon", self.max_lon),
        ]
    }
}

/// A graph node exposed by the map-nodes endpoint. Identity is `id`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct MapNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
struct RawNode {
    id: i64,
    lat: f64,
    lon: f64,
}

impl TryFrom<RawNode> for MapNode {
    type Error = RouteError;

    fn try_from(raw: RawNode) -> Result<Self> {
        let point = validate(raw.lat, raw.lon)?;
        Ok(MapNode {
            id: raw.id,
            lat: point.lat(),
            lon: point.lon(),
        })
    }
}

impl MapNode {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_domain_and_preserves_values() {
        for &(lat, lon) in &[
            (0.0, 0.0),
            (90.0, 180.0),
            (-90.0, -180.0),
            (37.824, -122.232),
            (-33.9, 151.2),
        ] {
            let point = validate(lat, lon).expect("in range");
            assert_eq!(point.lat(), lat);
            assert_eq!(point.lon(), lon);
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        for &(lat, lon) in &[(90.0001, 0.0), (-91.0, 0.0), (0.0, 180.5), (0.0, -181.0)] {
            let err = validate(lat, lon).unwrap_err();
            assert!(matches!(err, RouteError::InvalidCoordinate { .. }), "{lat},{lon}");
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        assert!(validate(f64::NAN, 0.0).is_err());
        assert!(validate(0.0, f64::INFINITY).is_err());
        assert!(validate(f64::NEG_INFINITY, f64::NAN).is_err());
    }

    #[test]
    fn test_point_deserialize_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"lat": 10.5, "lon": -20.0}"#).unwrap();
        assert_eq!(ok, GeoPoint::new(10.5, -20.0).unwrap());

        assert!(serde_json::from_str::<GeoPoint>(r#"{"lat": 91, "lon": 0}"#).is_err());
        assert!(serde_json::from_str::<GeoPoint>(r#"{"lat": "10", "lon": 0}"#).is_err());
        assert!(serde_json::from_str::<GeoPoint>(r#"{"lat": 10}"#).is_err());
    }

    #[test]
    fn test_point_serializes_as_lat_lon_object() {
        let point = GeoPoint::new(37.8, -122.2).unwrap();
        let value = serde_json::to_value(point).unwrap();
        assert_eq!(value, serde_json::json!({"lat": 37.8, "lon": -122.2}));
    }

    #[test]
    fn test_bbox_rejects_inverted_bounds() {
        let err = BoundingBox::new(10.0, 5.0, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, RouteError::InvalidBoundingBox(_)));
        let err = BoundingBox::new(0.0, 1.0, 10.0, 5.0).unwrap_err();
        assert!(matches!(err, RouteError::InvalidBoundingBox(_)));
    }

    #[test]
    fn test_bbox_rejects_non_finite() {
        let bbox = BoundingBox {
            min_lat: f64::NAN,
            max_lat: 1.0,
            min_lon: 0.0,
            max_lon: 1.0,
        };
        assert!(bbox.validate().is_err());
    }

    #[test]
    fn test_bbox_degenerate_is_allowed() {
        let bbox = BoundingBox::new(1.0, 1.0, 2.0, 2.0).unwrap();
        assert_eq!(
            bbox.query_pairs(),
            [("min_lat", 1.0), ("max_lat", 1.0), ("min_lon", 2.0), ("max_lon", 2.0)]
        );
    }

    #[test]
    fn test_node_deserialize_requires_integer_id() {
        let node: MapNode = serde_json::from_str(r#"{"id": 7, "lat": 1, "lon": 2}"#).unwrap();
        assert_eq!(node.id, 7);
        assert_eq!(node.point(), GeoPoint::new(1.0, 2.0).unwrap());

        assert!(serde_json::from_str::<MapNode>(r#"{"id": 7.5, "lat": 1, "lon": 2}"#).is_err());
        assert!(serde_json::from_str::<MapNode>(r#"{"lat": 1, "lon": 2}"#).is_err());
        assert!(serde_json::from_str::<MapNode>(r#"{"id": 1, "lat": 100, "lon": 2}"#).is_err());
    }
}
