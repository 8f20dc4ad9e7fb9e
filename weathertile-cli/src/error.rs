//! CLI error type.

use thiserror::Error;

use weathertile::provider::ProviderError;
use weathertile::{CacheError, ServiceError};

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration problem (missing key, unknown setting, bad value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Cache storage failure.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// HTTP client construction failure.
    #[error("HTTP client error: {0}")]
    Provider(#[from] ProviderError),

    /// Request failed inside the service.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Local file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tokio runtime could not be created.
    #[error("failed to create async runtime: {0}")]
    Runtime(String),
}
