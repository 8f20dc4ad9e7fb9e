//! Service output and error types.

use thiserror::Error;

use crate::cache::ArtifactRef;
use crate::coord::{CoordError, LocationError};
use crate::layer::LayerError;
use crate::provider::ProviderError;
use crate::render::RenderError;

/// Result of a weather map request.
#[derive(Debug, Clone)]
pub enum MapOutput {
    /// Raw PNG tile bytes.
    Png(Vec<u8>),
    /// Text-art rendering of the tile.
    TextArt(String),
}

impl MapOutput {
    /// The PNG bytes, if this output is an image.
    pub fn as_png(&self) -> Option<&[u8]> {
        match self {
            MapOutput::Png(bytes) => Some(bytes),
            MapOutput::TextArt(_) => None,
        }
    }

    /// The text art, if this output was converted.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MapOutput::Png(_) => None,
            MapOutput::TextArt(art) => Some(art),
        }
    }
}

/// Errors that can occur while serving a weather map request.
///
/// Cache failures are deliberately absent: a broken cache degrades to
/// re-fetching, and a failed store still returns the fetched tile.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request named an unsupported layer.
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// The location string did not parse.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// The location could not be resolved to a tile.
    #[error(transparent)]
    Coord(#[from] CoordError),

    /// The upstream tile fetch failed.
    #[error("upstream tile fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    /// The upstream tile fetch exceeded the configured timeout.
    #[error("upstream tile fetch timed out after {timeout_secs}s")]
    FetchTimeout { timeout_secs: u64 },

    /// Text-art conversion failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Outcome of one orchestrated fetch, including where the bytes came
/// from and whether the cache write succeeded.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Served from a fresh cache entry.
    CacheHit(Vec<u8>),
    /// Fetched upstream and cached.
    Fetched(Vec<u8>, ArtifactRef),
    /// Fetched upstream, but caching failed (best effort).
    FetchedUncached(Vec<u8>),
}

impl FetchOutcome {
    /// The tile bytes, however they were obtained.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            FetchOutcome::CacheHit(bytes)
            | FetchOutcome::FetchedUncached(bytes)
            | FetchOutcome::Fetched(bytes, _) => bytes,
        }
    }

    /// Whether the bytes came from the cache.
    pub fn is_cache_hit(&self) -> bool {
        matches!(self, FetchOutcome::CacheHit(_))
    }
}
