//! OpenWeatherMap tile provider.
//!
//! Fetches weather map tiles from the OpenWeatherMap Maps API (v1):
//! `https://tile.openweathermap.org/map/{layer}/{z}/{x}/{y}.png?appid={API_KEY}`
//!
//! Requires an OpenWeatherMap API key. Free-tier keys are rate limited;
//! the disk cache in [`crate::cache`] exists precisely so repeated
//! requests for the same tile do not burn through the quota.

use crate::coord::TileCoord;
use crate::layer::MapLayer;
use crate::provider::{BoxFuture, HttpClient, ProviderError, TileProvider};

const TILE_ENDPOINT: &str = "https://tile.openweathermap.org/map";

/// OpenWeatherMap weather tile provider.
///
/// Generic over the HTTP client so tests can inject a mock.
pub struct OwmTileProvider<C: HttpClient> {
    http_client: C,
    api_key: String,
}

impl<C: HttpClient> OwmTileProvider<C> {
    /// Creates a new provider with the given API key.
    pub fn new(http_client: C, api_key: String) -> Self {
        Self {
            http_client,
            api_key,
        }
    }

    /// Builds the tile URL for a layer and tile coordinate.
    fn build_url(&self, layer: MapLayer, tile: TileCoord) -> String {
        format!(
            "{}/{}/{}/{}/{}.png?appid={}",
            TILE_ENDPOINT,
            layer.tile_path(),
            tile.zoom,
            tile.x,
            tile.y,
            self.api_key
        )
    }
}

impl<C: HttpClient> TileProvider for OwmTileProvider<C> {
    fn fetch_tile(
        &self,
        layer: MapLayer,
        tile: TileCoord,
    ) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
        Box::pin(async move {
            if !self.supports_zoom(tile.zoom) {
                return Err(ProviderError::UnsupportedZoom(tile.zoom));
            }

            let url = self.build_url(layer, tile);
            self.http_client.get(&url).await
        })
    }

    fn name(&self) -> &str {
        "OpenWeatherMap"
    }

    fn min_zoom(&self) -> u8 {
        0
    }

    fn max_zoom(&self) -> u8 {
        18
    }
}
