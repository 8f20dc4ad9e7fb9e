//! Weather map fetch orchestration.
//!
//! `WeatherMapService` ties the pieces together: build the cache key,
//! consult the disk cache, fetch from the upstream provider on a miss,
//! store the result, and optionally render it as text art.
//!
//! The miss path runs under a per-key flight lock, so concurrent
//! requests for the same (location, layer) coalesce onto a single
//! upstream fetch: the first caller fetches and stores, the rest wake
//! up, re-run the lookup under the lock, and hit.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::cache::{TileCache, TileKey};
use crate::config::WeatherMapConfig;
use crate::coord::{to_tile_coords, Location};
use crate::layer::MapLayer;
use crate::provider::TileProvider;
use crate::render::Converter;

use super::types::{FetchOutcome, MapOutput, ServiceError};

/// Orchestrates cache lookups, upstream fetches, and conversion.
pub struct WeatherMapService {
    provider: Arc<dyn TileProvider>,
    cache: Arc<TileCache>,
    converter: Arc<dyn Converter>,
    zoom: u8,
    fetch_timeout: Duration,
    flights: DashMap<TileKey, Arc<Mutex<()>>>,
}

impl WeatherMapService {
    /// Create a service from its collaborators and configuration.
    pub fn new(
        config: &WeatherMapConfig,
        provider: Arc<dyn TileProvider>,
        cache: Arc<TileCache>,
        converter: Arc<dyn Converter>,
    ) -> Self {
        Self {
            provider,
            cache,
            converter,
            zoom: config.zoom,
            fetch_timeout: config.fetch_timeout,
            flights: DashMap::new(),
        }
    }

    /// Serve a weather map request.
    ///
    /// `location` is a `"lat,lon"` decimal string and `layer` one of the
    /// supported request codes. An unsupported layer or malformed
    /// location fails before any cache or network activity.
    pub async fn get_map(
        &self,
        location: &str,
        layer: &str,
        convert: bool,
    ) -> Result<MapOutput, ServiceError> {
        let layer = MapLayer::from_code(layer)?;
        let location: Location = location.parse()?;

        let outcome = self.get_tile(&location, layer).await?;
        let bytes = outcome.into_bytes();

        if convert {
            Ok(MapOutput::TextArt(self.converter.render(&bytes)?))
        } else {
            Ok(MapOutput::Png(bytes))
        }
    }

    /// Fetch the tile for an already-validated location/layer pair,
    /// going through the cache.
    pub async fn get_tile(
        &self,
        location: &Location,
        layer: MapLayer,
    ) -> Result<FetchOutcome, ServiceError> {
        let key = TileKey::build(location, layer);

        // One fetch in flight per key: hold the flight lock across
        // lookup, fetch, and store.
        let flight = self.flight_lock(&key);
        let _guard = flight.lock().await;

        if let Some(bytes) = self.cache.lookup(&key).await {
            debug!(key = %key, "Serving weather map from cache");
            return Ok(FetchOutcome::CacheHit(bytes));
        }

        let tile = to_tile_coords(location.lat, location.lon, self.zoom)?;
        debug!(key = %key, tile = %tile, provider = self.provider.name(), "Cache miss; fetching tile");

        let bytes = match timeout(self.fetch_timeout, self.provider.fetch_tile(layer, tile)).await
        {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => return Err(ServiceError::Fetch(e)),
            Err(_) => {
                return Err(ServiceError::FetchTimeout {
                    timeout_secs: self.fetch_timeout.as_secs(),
                })
            }
        };

        // Best-effort cache: a store failure must not cost the caller
        // the tile it just fetched.
        match self.cache.store(&key, &bytes).await {
            Ok(artifact) => Ok(FetchOutcome::Fetched(bytes, artifact)),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to cache fetched tile");
                Ok(FetchOutcome::FetchedUncached(bytes))
            }
        }
    }

    fn flight_lock(&self, key: &TileKey) -> Arc<Mutex<()>> {
        self.flights
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
