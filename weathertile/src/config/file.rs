//! INI configuration file handling.
//!
//! The CLI reads settings from `config.ini` in the platform config
//! directory. Missing file or missing keys fall back to defaults; the
//! `OWM_API_KEY` environment variable overrides the stored API key at
//! the call site.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ini::Ini;

use super::{CacheConfig, WeatherMapConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_TTL, DEFAULT_ZOOM};

/// Path of the configuration file in the platform config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("weathertile").join("config.ini"))
        .unwrap_or_else(|| PathBuf::from("weathertile.ini"))
}

/// Parsed configuration file contents.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Upstream API key, if stored in the file.
    pub api_key: Option<String>,

    /// Cache directory.
    pub cache_directory: PathBuf,

    /// Cache TTL in minutes.
    pub ttl_minutes: u64,

    /// Map zoom level.
    pub zoom: u8,

    /// Upstream fetch timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            api_key: None,
            cache_directory: super::default_cache_dir(),
            ttl_minutes: DEFAULT_TTL.as_secs() / 60,
            zoom: DEFAULT_ZOOM,
            timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }
}

impl ConfigFile {
    /// Load from the default path. A missing file yields an error the
    /// caller typically folds into `Default` via `unwrap_or_default()`.
    pub fn load() -> io::Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from an explicit path.
    pub fn load_from(path: &PathBuf) -> io::Result<Self> {
        let ini = Ini::load_from_file(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        let defaults = Self::default();

        let api_key = ini
            .get_from(Some("provider"), "api_key")
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty());

        let cache_directory = ini
            .get_from(Some("cache"), "directory")
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_directory);

        let ttl_minutes = ini
            .get_from(Some("cache"), "ttl_minutes")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.ttl_minutes);

        let zoom = ini
            .get_from(Some("map"), "zoom")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.zoom);

        let timeout_secs = ini
            .get_from(Some("map"), "timeout_secs")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Ok(Self {
            api_key,
            cache_directory,
            ttl_minutes,
            zoom,
            timeout_secs,
        })
    }

    /// Save to the default path, creating parent directories as needed.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &PathBuf) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        if let Some(ref api_key) = self.api_key {
            ini.with_section(Some("provider"))
                .set("api_key", api_key.as_str());
        }
        ini.with_section(Some("cache"))
            .set("directory", self.cache_directory.display().to_string())
            .set("ttl_minutes", self.ttl_minutes.to_string());
        ini.with_section(Some("map"))
            .set("zoom", self.zoom.to_string())
            .set("timeout_secs", self.timeout_secs.to_string());

        ini.write_to_file(path)
    }

    /// Translate into the service configuration. `api_key_override`
    /// (e.g. from the environment) wins over the stored key.
    pub fn to_weather_config(&self, api_key_override: Option<String>) -> WeatherMapConfig {
        let api_key = api_key_override
            .or_else(|| self.api_key.clone())
            .unwrap_or_default();

        WeatherMapConfig::new(api_key)
            .with_cache(
                CacheConfig::new(self.cache_directory.clone())
                    .with_ttl(Duration::from_secs(self.ttl_minutes * 60)),
            )
            .with_zoom(self.zoom)
            .with_fetch_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// A settable configuration key, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ProviderApiKey,
    CacheDirectory,
    CacheTtlMinutes,
    MapZoom,
    MapTimeoutSecs,
}

impl ConfigKey {
    /// All keys, for `config list`.
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::ProviderApiKey,
        ConfigKey::CacheDirectory,
        ConfigKey::CacheTtlMinutes,
        ConfigKey::MapZoom,
        ConfigKey::MapTimeoutSecs,
    ];

    /// The `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ProviderApiKey => "provider.api_key",
            ConfigKey::CacheDirectory => "cache.directory",
            ConfigKey::CacheTtlMinutes => "cache.ttl_minutes",
            ConfigKey::MapZoom => "map.zoom",
            ConfigKey::MapTimeoutSecs => "map.timeout_secs",
        }
    }

    /// Read the current value as a display string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ProviderApiKey => config.api_key.clone().unwrap_or_default(),
            ConfigKey::CacheDirectory => config.cache_directory.display().to_string(),
            ConfigKey::CacheTtlMinutes => config.ttl_minutes.to_string(),
            ConfigKey::MapZoom => config.zoom.to_string(),
            ConfigKey::MapTimeoutSecs => config.timeout_secs.to_string(),
        }
    }

    /// Set the value from a string, validating numeric fields.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), String> {
        match self {
            ConfigKey::ProviderApiKey => {
                config.api_key = Some(value.to_string()).filter(|s| !s.is_empty());
            }
            ConfigKey::CacheDirectory => {
                config.cache_directory = PathBuf::from(value);
            }
            ConfigKey::CacheTtlMinutes => {
                config.ttl_minutes = value
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid minute count", value))?;
            }
            ConfigKey::MapZoom => {
                config.zoom = value
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid zoom level", value))?;
            }
            ConfigKey::MapTimeoutSecs => {
                config.timeout_secs = value
                    .parse()
                    .map_err(|_| format!("'{}' is not a valid second count", value))?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or(())
    }
}
