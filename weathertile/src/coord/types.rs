//! Coordinate types and bounds.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Minimum latitude representable in Web Mercator.
pub const MIN_LAT: f64 = -85.05112878;
/// Maximum latitude representable in Web Mercator.
pub const MAX_LAT: f64 = 85.05112878;
/// Minimum longitude.
pub const MIN_LON: f64 = -180.0;
/// Maximum longitude.
pub const MAX_LON: f64 = 180.0;
/// Maximum supported zoom level.
pub const MAX_ZOOM: u8 = 18;

/// A Web Mercator tile index at a given zoom level.
///
/// `x` increases eastward, `y` increases southward, both in
/// `0..2^zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Tile column (west to east).
    pub x: u32,
    /// Tile row (north to south).
    pub y: u32,
    /// Zoom level.
    pub zoom: u8,
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors from coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside the Web Mercator range.
    #[error("latitude {0} is outside the Web Mercator range")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("longitude {0} is outside the valid range")]
    InvalidLongitude(f64),

    /// Zoom level beyond the supported maximum.
    #[error("zoom level {0} exceeds the supported maximum")]
    InvalidZoom(u8),
}

/// A geographic point parsed from a `"lat,lon"` decimal string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Errors from parsing a location string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// Input is not two comma-separated decimal numbers.
    #[error("location '{0}' is not in 'lat,lon' form")]
    Malformed(String),

    /// Latitude outside the Web Mercator range.
    #[error("latitude {0} is outside the Web Mercator range")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("longitude {0} is outside the valid range")]
    InvalidLongitude(f64),
}

impl Location {
    /// Create a location, validating the coordinate ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, LocationError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(LocationError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(LocationError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat_str, lon_str) = s
            .split_once(',')
            .ok_or_else(|| LocationError::Malformed(s.to_string()))?;

        let lat: f64 = lat_str
            .trim()
            .parse()
            .map_err(|_| LocationError::Malformed(s.to_string()))?;
        let lon: f64 = lon_str
            .trim()
            .parse()
            .map_err(|_| LocationError::Malformed(s.to_string()))?;

        Self::new(lat, lon)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let loc: Location = "51.5,-0.12".parse().unwrap();
        assert_eq!(loc.lat, 51.5);
        assert_eq!(loc.lon, -0.12);
    }

    #[test]
    fn test_parse_location_with_spaces() {
        let loc: Location = " 40.7128 , -74.0060 ".parse().unwrap();
        assert_eq!(loc.lat, 40.7128);
        assert_eq!(loc.lon, -74.0060);
    }

    #[test]
    fn test_parse_location_missing_comma() {
        let result = "51.5 -0.12".parse::<Location>();
        assert!(matches!(result, Err(LocationError::Malformed(_))));
    }

    #[test]
    fn test_parse_location_not_a_number() {
        let result = "here,there".parse::<Location>();
        assert!(matches!(result, Err(LocationError::Malformed(_))));
    }

    #[test]
    fn test_parse_location_latitude_out_of_range() {
        let result = "90.0,0.0".parse::<Location>();
        assert!(matches!(result, Err(LocationError::InvalidLatitude(_))));
    }

    #[test]
    fn test_parse_location_longitude_out_of_range() {
        let result = "0.0,181.0".parse::<Location>();
        assert!(matches!(result, Err(LocationError::InvalidLongitude(_))));
    }

    #[test]
    fn test_tile_coord_display() {
        let tile = TileCoord { x: 4, y: 2, zoom: 3 };
        assert_eq!(tile.to_string(), "3/4/2");
    }
}
