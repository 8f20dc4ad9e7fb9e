//! Weather tile provider abstraction
//!
//! This module provides traits and implementations for downloading weather
//! map tiles from upstream tile servers. The HTTP layer is injected via the
//! [`HttpClient`] trait so providers can be exercised against mocks.

mod http;
mod owm;
mod types;

pub use http::{HttpClient, ReqwestClient};
pub use owm::OwmTileProvider;
pub use types::{BoxFuture, ProviderError, TileProvider};

#[cfg(test)]
pub use http::tests::MockHttpClient;
