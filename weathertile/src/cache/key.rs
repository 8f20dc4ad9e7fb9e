//! Cache key construction.
//!
//! A [`TileKey`] identifies one cached weather map: the normalized
//! location plus the layer. Keys are deterministic - equal
//! (location, layer) inputs always build equal keys - and the layer is
//! part of the key, so `temp` and `wind` tiles for the same location
//! never collide.

use std::fmt;

use crate::coord::Location;
use crate::layer::MapLayer;

/// Identity of a cached weather map tile.
///
/// The coordinate fields hold the canonical decimal rendering of the
/// parsed location, so textually different but numerically equal inputs
/// (`"51.50"` vs `"51.5"`) produce the same key. Canonical renderings
/// never contain the `_` filename separator, which keeps the artifact
/// filename encoding unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    lat: String,
    lon: String,
    layer: MapLayer,
}

impl TileKey {
    /// Build the key for a location/layer pair.
    pub fn build(location: &Location, layer: MapLayer) -> Self {
        Self {
            lat: canonical_coord(location.lat),
            lon: canonical_coord(location.lon),
            layer,
        }
    }

    /// Canonical latitude rendering.
    pub fn lat(&self) -> &str {
        &self.lat
    }

    /// Canonical longitude rendering.
    pub fn lon(&self) -> &str {
        &self.lon
    }

    /// The layer this key addresses.
    pub fn layer(&self) -> MapLayer {
        self.layer
    }
}

impl fmt::Display for TileKey {
    /// Format: `map:{lat}:{lon}:{layer}`, for logs and debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map:{}:{}:{}", self.lat, self.lon, self.layer)
    }
}

/// Canonical decimal rendering of a coordinate.
///
/// Uses the shortest round-trip float formatting and folds `-0` into `0`
/// so the rendering is a pure function of the numeric value.
fn canonical_coord(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0 as well; -0.0 == 0.0
        return "0".to_string();
    }
    format!("{}", value)
}
