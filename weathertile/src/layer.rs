//! Weather map layer identifiers.
//!
//! The tile server publishes one tile set per meteorological layer. The
//! four supported layers are addressed by short request codes (`prec`,
//! `pres`, `wind`, `temp`); anything else is rejected explicitly rather
//! than mapped to a default.

use std::fmt;

use thiserror::Error;

/// A weather map layer supported by the tile server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLayer {
    /// Precipitation intensity.
    Precipitation,
    /// Sea-level pressure.
    Pressure,
    /// Wind speed.
    Wind,
    /// Air temperature.
    Temperature,
}

/// Error for layer codes outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayerError {
    /// The request named a layer the tile server does not publish.
    #[error("map layer '{0}' is not supported")]
    Unsupported(String),
}

impl MapLayer {
    /// All supported layers, in request-code order.
    pub const ALL: [MapLayer; 4] = [
        MapLayer::Precipitation,
        MapLayer::Pressure,
        MapLayer::Wind,
        MapLayer::Temperature,
    ];

    /// Parse a request code (`prec`, `pres`, `wind`, `temp`).
    pub fn from_code(code: &str) -> Result<Self, LayerError> {
        match code {
            "prec" => Ok(MapLayer::Precipitation),
            "pres" => Ok(MapLayer::Pressure),
            "wind" => Ok(MapLayer::Wind),
            "temp" => Ok(MapLayer::Temperature),
            other => Err(LayerError::Unsupported(other.to_string())),
        }
    }

    /// The short request code, also used in cache artifact filenames.
    pub fn code(&self) -> &'static str {
        match self {
            MapLayer::Precipitation => "prec",
            MapLayer::Pressure => "pres",
            MapLayer::Wind => "wind",
            MapLayer::Temperature => "temp",
        }
    }

    /// The layer path segment in the tile server URL.
    pub fn tile_path(&self) -> &'static str {
        match self {
            MapLayer::Precipitation => "precipitation_new",
            MapLayer::Pressure => "pressure_new",
            MapLayer::Wind => "wind_new",
            MapLayer::Temperature => "temp_new",
        }
    }
}

impl fmt::Display for MapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
