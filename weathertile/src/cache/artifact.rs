//! Cache artifact filename encoding and parsing.
//!
//! Artifacts are stored as single files named
//! `{lat}_{lon}_{createdAtEpochSeconds}_{layer}_.png`, e.g.
//! `51.5_-0.12_1699999999_temp_.png`. The encoding is a fixed-field
//! format: coordinate fields are canonical decimal numbers and the layer
//! field is one of the four fixed request codes, so no field can ever
//! contain the `_` separator.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::coord::Location;
use crate::layer::MapLayer;

use super::key::TileKey;

/// A parsed artifact filename: the key it belongs to plus its creation
/// time in Unix epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArtifact {
    pub key: TileKey,
    pub created_at: i64,
}

/// Error parsing an artifact filename.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Filename doesn't match the artifact pattern.
    #[error("filename doesn't match the artifact pattern")]
    InvalidPattern,

    /// Coordinate field is not a valid geographic coordinate.
    #[error("invalid coordinate in filename: {0}")]
    InvalidCoordinate(String),

    /// Timestamp field overflows.
    #[error("invalid timestamp in filename: {0}")]
    InvalidTimestamp(String),

    /// Layer field names an unsupported layer.
    #[error("unknown layer in filename: {0}")]
    UnknownLayer(String),
}

/// Get the artifact filename regex.
///
/// Pattern: `{lat}_{lon}_{created}_{layer}_.png` where lat/lon are
/// decimal numbers, created is epoch seconds, and layer is a lowercase
/// code.
fn artifact_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // (-?\d+(?:\.\d+)?) - lat, then lon (decimal, optional sign/fraction)
        // (\d+)             - creation time, epoch seconds
        // ([a-z]+)          - layer request code
        // _\.png            - trailing separator and extension
        Regex::new(r"^(-?\d+(?:\.\d+)?)_(-?\d+(?:\.\d+)?)_(\d+)_([a-z]+)_\.png$").unwrap()
    })
}

/// Encode the artifact filename for a key created at the given time.
pub fn encode(key: &TileKey, created_at: i64) -> String {
    format!(
        "{}_{}_{}_{}_.png",
        key.lat(),
        key.lon(),
        created_at,
        key.layer().code()
    )
}

/// Parse an artifact filename back into its key and creation time.
///
/// Coordinates are re-normalized through the key builder, so a
/// hand-written `51.50_...` filename resolves to the same key as the
/// canonical `51.5_...`.
pub fn parse(filename: &str) -> Result<ParsedArtifact, ParseError> {
    let captures = artifact_pattern()
        .captures(filename)
        .ok_or(ParseError::InvalidPattern)?;

    let lat_str = captures.get(1).unwrap().as_str();
    let lon_str = captures.get(2).unwrap().as_str();

    let lat: f64 = lat_str
        .parse()
        .map_err(|_| ParseError::InvalidCoordinate(lat_str.to_string()))?;
    let lon: f64 = lon_str
        .parse()
        .map_err(|_| ParseError::InvalidCoordinate(lon_str.to_string()))?;
    let location = Location::new(lat, lon)
        .map_err(|_| ParseError::InvalidCoordinate(format!("{},{}", lat_str, lon_str)))?;

    let created_str = captures.get(3).unwrap().as_str();
    let created_at: i64 = created_str
        .parse()
        .map_err(|_| ParseError::InvalidTimestamp(created_str.to_string()))?;

    let layer_str = captures.get(4).unwrap().as_str();
    let layer = MapLayer::from_code(layer_str)
        .map_err(|_| ParseError::UnknownLayer(layer_str.to_string()))?;

    Ok(ParsedArtifact {
        key: TileKey::build(&location, layer),
        created_at,
    })
}
