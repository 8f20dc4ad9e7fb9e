//! Provider trait and error types.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::coord::TileCoord;
use crate::layer::MapLayer;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur while fetching a tile from an upstream provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// HTTP transport or status failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider does not serve tiles at this zoom level.
    #[error("unsupported zoom level {0}")]
    UnsupportedZoom(u8),
}

/// A source of weather map tile images.
///
/// Implementations download the raw PNG bytes for a layer/tile pair. The
/// trait uses `Pin<Box<dyn Future>>` so it can be held as a trait object
/// (`Arc<dyn TileProvider>`) by the service.
pub trait TileProvider: Send + Sync {
    /// Fetch the tile image for `layer` at `tile`.
    fn fetch_tile(
        &self,
        layer: MapLayer,
        tile: TileCoord,
    ) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>>;

    /// Human-readable provider name for logs.
    fn name(&self) -> &str;

    /// Minimum zoom level the provider serves.
    fn min_zoom(&self) -> u8;

    /// Maximum zoom level the provider serves.
    fn max_zoom(&self) -> u8;

    /// Whether the provider serves tiles at the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom()..=self.max_zoom()).contains(&zoom)
    }
}
