//! Points around Piedmont, California (lat, lon).

pub const ORIGIN: (f64, f64) = (37.8, -122.2);
pub const DESTINATION: (f64, f64) = (37.9, -122.1);

pub const PIEDMONT_BBOX: (f64, f64, f64, f64) = (37.8, 37.9, -122.3, -122.2);
