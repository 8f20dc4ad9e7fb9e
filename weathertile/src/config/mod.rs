//! Service configuration.
//!
//! All knobs the cache and orchestrator need are injected through these
//! structs - there is no implicit global state. The CLI layer reads an
//! INI config file ([`ConfigFile`]) and translates it into a
//! [`WeatherMapConfig`].

mod file;

pub use file::{config_file_path, ConfigFile, ConfigKey};

use std::path::PathBuf;
use std::time::Duration;

/// Default time-to-live for cached tiles: 30 minutes.
///
/// Tile providers refresh weather layers on roughly this cadence; lower
/// API tiers can raise it to stretch their quota.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Default map zoom level.
pub const DEFAULT_ZOOM: u8 = 3;

/// Default upstream fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the disk cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding the artifact files.
    pub directory: PathBuf,

    /// Maximum age before a cached tile is treated as stale.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_dir(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a cache config for the given directory with the default TTL.
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Top-level configuration for the weather map service.
#[derive(Debug, Clone)]
pub struct WeatherMapConfig {
    /// Upstream tile API key.
    pub api_key: String,

    /// Disk cache settings.
    pub cache: CacheConfig,

    /// Zoom level for tile resolution.
    pub zoom: u8,

    /// Timeout applied to each upstream tile fetch.
    pub fetch_timeout: Duration,
}

impl Default for WeatherMapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            cache: CacheConfig::default(),
            zoom: DEFAULT_ZOOM,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl WeatherMapConfig {
    /// Create a config with the given API key and defaults elsewhere.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Set the zoom level.
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the upstream fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// Default cache directory under the platform cache dir, falling back
/// to a dot directory in the working directory.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("weathertile"))
        .unwrap_or_else(|| PathBuf::from(".weathertile-cache"))
}

/// Format a byte count for human display.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
