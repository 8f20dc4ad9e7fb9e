//! Disk-backed weather tile cache
//!
//! Cached tiles are single files whose names encode the cache key and
//! creation time: `{lat}_{lon}_{createdAtEpochSeconds}_{layer}_.png`.
//! [`TileKey`] builds collision-free keys, [`artifact`] handles the
//! filename encoding, and [`TileCache`] owns the directory, the
//! in-memory index, and the per-key locking.

pub mod artifact;
mod key;
mod store;

pub use artifact::{ParseError, ParsedArtifact};
pub use key::TileKey;
pub use store::{ArtifactRef, CacheError, CacheStats, ClearResult, TileCache};
