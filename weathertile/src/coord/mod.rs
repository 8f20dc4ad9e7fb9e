//! Coordinate conversion module
//!
//! Converts geographic coordinates (latitude/longitude) into the Web
//! Mercator tile indices used by weather map tile servers, and parses
//! the `"lat,lon"` location strings accepted at the API surface.

mod types;

pub use types::{
    CoordError, Location, LocationError, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to tile coordinates.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 18)
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> Result<TileCoord, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    // Number of tiles along each axis at this zoom level
    let n = 2.0_f64.powi(zoom as i32);

    let x = ((lon + 180.0) / 360.0 * n) as u32;

    // Web Mercator projection for the Y axis
    let lat_rad = lat * PI / 180.0;
    let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n) as u32;

    // At lon == 180.0 / lat == MIN_LAT the raw index lands one past the
    // last tile; clamp onto the grid.
    let max_index = (n as u32).saturating_sub(1);
    Ok(TileCoord {
        x: x.min(max_index),
        y: y.min(max_index),
        zoom,
    })
}

/// Converts a tile coordinate back to the latitude/longitude of its
/// northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(tile.zoom as i32);

    let lon = tile.x as f64 / n * 360.0 - 180.0;

    let y = tile.y as f64 / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_london_at_default_zoom() {
        // London: 51.5°N, 0.12°W at zoom 3 sits on the north-west
        // Europe tile.
        let tile = to_tile_coords(51.5, -0.12, 3).unwrap();
        assert_eq!(tile.x, 3);
        assert_eq!(tile.y, 2);
        assert_eq!(tile.zoom, 3);
    }

    #[test]
    fn test_new_york_city_at_zoom_16() {
        let tile = to_tile_coords(40.7128, -74.0060, 16).unwrap();
        assert_eq!(tile.x, 19295);
        assert_eq!(tile.y, 24640);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = to_tile_coords(90.0, 0.0, 10);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_invalid_longitude() {
        let result = to_tile_coords(0.0, 200.0, 10);
        assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
    }

    #[test]
    fn test_invalid_zoom() {
        let result = to_tile_coords(0.0, 0.0, 19);
        assert!(matches!(result, Err(CoordError::InvalidZoom(19))));
    }

    #[test]
    fn test_antimeridian_clamps_onto_grid() {
        let tile = to_tile_coords(0.0, 180.0, 3).unwrap();
        assert_eq!(tile.x, 7);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let tile = to_tile_coords(51.5074, -0.1278, 10).unwrap();
        let (lat, lon) = tile_to_lat_lon(&tile);

        // tile_to_lat_lon returns the northwest corner, so the original
        // point must be within one tile of it.
        let tile_size = 360.0 / 2.0_f64.powi(10);
        assert!((lat - 51.5074).abs() < tile_size);
        assert!((lon - (-0.1278)).abs() < tile_size);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_tile_coords_in_bounds(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let tile = to_tile_coords(lat, lon, zoom)?;

                let max_tile = 2u32.pow(zoom as u32);
                prop_assert!(tile.x < max_tile);
                prop_assert!(tile.y < max_tile);
                prop_assert_eq!(tile.zoom, zoom);
            }

            #[test]
            fn test_roundtrip_within_one_tile(
                lat in -85.05..85.05_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let tile = to_tile_coords(lat, lon, zoom)?;
                let (back_lat, back_lon) = tile_to_lat_lon(&tile);

                let tile_size = 360.0 / (2.0_f64.powi(zoom as i32));
                prop_assert!((back_lat - lat).abs() < tile_size);
                prop_assert!((back_lon - lon).abs() < tile_size);
            }

            #[test]
            fn test_longitude_monotonic(
                lat in 0.0..1.0_f64,
                lon1 in -180.0..-90.0_f64,
                lon2 in -90.0..0.0_f64,
                zoom in 10u8..=15
            ) {
                let tile1 = to_tile_coords(lat, lon1, zoom)?;
                let tile2 = to_tile_coords(lat, lon2, zoom)?;
                prop_assert!(tile1.x < tile2.x);
            }

            #[test]
            fn test_reject_invalid_latitude(
                lat in -90.0..-85.06_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=18
            ) {
                let result = to_tile_coords(lat, lon, zoom);
                prop_assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
            }
        }
    }
}
