//! Point, bounding-box, and great-circle primitives for listing queries.
//!
//! All coordinates are longitude/latitude degrees in EPSG:4326. Distance
//! thresholds elsewhere in the crate (radius search, the comp-search buffer)
//! are circular geodesic buffers built on `haversine_km`, never degree-space
//! rectangles.

use std::error::Error;
use std::fmt;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, PartialEq)]
pub enum GeoParseError {
    BadBounds(String),
    BadPoint(String),
}

impl fmt::Display for GeoParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoParseError::BadBounds(s) => write!(f, "Invalid bounds: {s}"),
            GeoParseError::BadPoint(s) => write!(f, "Invalid point literal: {s}"),
        }
    }
}

impl Error for GeoParseError {}

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Axis-aligned map-viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Parses `"minLon,minLat,maxLon,maxLat"`. Every comma-separated piece
    /// must be numeric and at least four must be present; pieces beyond the
    /// fourth are ignored.
    pub fn parse(s: &str) -> Result<BoundingBox, GeoParseError> {
        let coords = s
            .split(',')
            .map(|c| c.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| GeoParseError::BadBounds(s.to_string()))?;

        if coords.len() < 4 {
            return Err(GeoParseError::BadBounds(s.to_string()));
        }

        Ok(BoundingBox {
            min_lon: coords[0],
            min_lat: coords[1],
            max_lon: coords[2],
            max_lat: coords[3],
        })
    }

    /// Closed-interval containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.lon >= self.min_lon && p.lon <= self.max_lon && p.lat >= self.min_lat && p.lat <= self.max_lat
    }
}

/// Parses a WKT point literal: `POINT(lon lat)`, case-insensitive, with or
/// without a space before the parenthesis. An EWKT `SRID=...;` prefix is
/// accepted and dropped.
pub fn parse_wkt_point(s: &str) -> Result<Point, GeoParseError> {
    let bad = || GeoParseError::BadPoint(s.to_string());

    let mut body = s.trim();
    if let Some((prefix, rest)) = body.split_once(';') {
        if !prefix.trim().to_ascii_uppercase().starts_with("SRID=") {
            return Err(bad());
        }
        body = rest.trim();
    }

    if !body.to_ascii_uppercase().starts_with("POINT") {
        return Err(bad());
    }

    let inner = body["POINT".len()..]
        .trim_start()
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(bad)?;

    let mut nums = inner.split_whitespace().map(|n| n.parse::<f64>());
    match (nums.next(), nums.next(), nums.next()) {
        (Some(Ok(lon)), Some(Ok(lat)), None) => Ok(Point::new(lon, lat)),
        _ => Err(bad()),
    }
}
