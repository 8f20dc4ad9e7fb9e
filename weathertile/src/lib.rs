//! WeatherTile - weather map tiles with a disk-backed cache
//!
//! This library fetches weather map tile images (precipitation, pressure,
//! wind, temperature) for a geographic location from OpenWeatherMap and
//! caches them on disk so repeated requests within the configured TTL never
//! touch the network. Tiles can optionally be rendered as text art for
//! terminal display.
//!
//! # Architecture
//!
//! ```text
//! caller ──► WeatherMapService ──► TileCache.lookup ──► hit: bytes
//!                 │                      │
//!                 │                      └─ miss
//!                 ▼
//!            TileProvider.fetch ──► TileCache.store ──► bytes
//!                 │
//!                 └─ optional: Converter ──► text art
//! ```
//!
//! Concurrent requests for the same (location, layer) are coalesced onto a
//! single upstream fetch via a per-key flight lock.

pub mod cache;
pub mod config;
pub mod coord;
pub mod layer;
pub mod provider;
pub mod render;
pub mod service;

pub use cache::{ArtifactRef, CacheError, TileCache, TileKey};
pub use config::{CacheConfig, WeatherMapConfig};
pub use coord::Location;
pub use layer::{LayerError, MapLayer};
pub use provider::{OwmTileProvider, ReqwestClient, TileProvider};
pub use render::{AsciiRenderer, Converter};
pub use service::{MapOutput, ServiceError, WeatherMapService};

/// Library version, sourced from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
