//! Disk-backed tile cache with TTL expiry.
//!
//! `TileCache` owns a directory of artifact files. Instead of globbing
//! the directory on every lookup, it scans once at startup and maintains
//! an in-memory index of `key -> (created_at, path)`; all mutation goes
//! through the index under a per-key lock, which makes the
//! stale-check/delete/re-store sequence atomic with respect to a
//! concurrent store for the same key.
//!
//! Expiry is passive: a stale entry is removed during the next lookup
//! for its key, and there is no background sweep. Lookup failures
//! (unreadable or corrupt artifacts) degrade to a miss rather than an
//! error, because a broken cache entry must never block a fresh fetch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::CacheConfig;

use super::artifact;
use super::key::TileKey;

/// Errors from cache storage operations.
///
/// Only construction and `store` surface errors; `lookup` degrades to a
/// miss on any local failure.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing directory is unavailable or a file operation failed.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reference to a stored artifact.
#[derive(Debug, Clone)]
pub struct ArtifactRef {
    /// Path of the artifact file on disk.
    pub path: PathBuf,
    /// Creation time encoded in the filename, Unix epoch seconds.
    pub created_at: i64,
}

/// Result of clearing the cache directory.
#[derive(Debug, Clone, Default)]
pub struct ClearResult {
    pub files_deleted: usize,
    pub bytes_freed: u64,
}

/// Point-in-time cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    created_at: i64,
    path: PathBuf,
}

/// Disk-backed key -> bytes store with per-key TTL expiry.
pub struct TileCache {
    directory: PathBuf,
    ttl_secs: i64,
    index: RwLock<HashMap<TileKey, IndexEntry>>,
    key_locks: DashMap<TileKey, Arc<Mutex<()>>>,
}

impl TileCache {
    /// Open the cache, creating the backing directory if absent and
    /// building the index from one directory scan.
    ///
    /// Files that do not parse as artifacts are removed during the scan;
    /// when several artifacts exist for one key (e.g. left behind by a
    /// crashed writer), only the newest survives.
    pub fn open(config: &CacheConfig) -> Result<Self, CacheError> {
        std::fs::create_dir_all(&config.directory)?;
        let index = Self::scan(&config.directory)?;

        debug!(
            directory = %config.directory.display(),
            entries = index.len(),
            ttl_secs = config.ttl.as_secs(),
            "Opened tile cache"
        );

        Ok(Self {
            directory: config.directory.clone(),
            ttl_secs: config.ttl.as_secs() as i64,
            index: RwLock::new(index),
            key_locks: DashMap::new(),
        })
    }

    /// Look up the cached bytes for a key.
    ///
    /// Returns `None` on a miss, on a stale entry (which is deleted
    /// before returning), and on any read failure.
    pub async fn lookup(&self, key: &TileKey) -> Option<Vec<u8>> {
        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        let entry = self.index.read().get(key).cloned()?;

        let age = now_epoch() - entry.created_at;
        if age >= self.ttl_secs {
            debug!(key = %key, age_secs = age, "Cache entry expired; removing");
            self.evict(key, &entry.path).await;
            return None;
        }

        match tokio::fs::read(&entry.path).await {
            Ok(bytes) => {
                debug!(key = %key, age_secs = age, "Cache hit");
                Some(bytes)
            }
            Err(e) => {
                // Unreadable artifact: treat as a miss so the caller
                // re-fetches, and drop the broken entry.
                warn!(key = %key, error = %e, "Cache artifact unreadable; treating as miss");
                self.evict(key, &entry.path).await;
                None
            }
        }
    }

    /// Store bytes for a key, stamping the current time.
    ///
    /// The artifact is written to a temp file and atomically renamed
    /// into place, so readers never observe a half-written file. If an
    /// artifact for the key already exists it is replaced: the new file
    /// is committed first, then the old one is unlinked
    /// (overwrite-and-remove-old).
    pub async fn store(&self, key: &TileKey, bytes: &[u8]) -> Result<ArtifactRef, CacheError> {
        let lock = self.key_lock(key);
        let _guard = lock.lock().await;

        let created_at = now_epoch();
        let name = artifact::encode(key, created_at);
        let path = self.directory.join(&name);
        let tmp = self.directory.join(format!("{}.tmp", name));

        tokio::fs::write(&tmp, bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        let previous = self.index.write().insert(
            key.clone(),
            IndexEntry {
                created_at,
                path: path.clone(),
            },
        );

        // Same-second overwrites reuse the filename; only unlink a
        // previous artifact that lives at a different path.
        if let Some(prev) = previous {
            if prev.path != path {
                if let Err(e) = tokio::fs::remove_file(&prev.path).await {
                    warn!(key = %key, error = %e, "Failed to remove replaced cache artifact");
                }
            }
        }

        debug!(key = %key, path = %path.display(), size_bytes = bytes.len(), "Stored cache artifact");

        Ok(ArtifactRef { path, created_at })
    }

    /// Whether the cache currently holds an entry (fresh or stale) for
    /// the key.
    pub fn contains(&self, key: &TileKey) -> bool {
        self.index.read().contains_key(key)
    }

    /// Number of indexed entries.
    pub fn entry_count(&self) -> usize {
        self.index.read().len()
    }

    /// Remove every artifact and reset the index.
    pub fn clear(&self) -> Result<ClearResult, CacheError> {
        let mut index = self.index.write();
        let mut result = ClearResult::default();

        for entry in index.values() {
            let size = std::fs::metadata(&entry.path).map(|m| m.len()).unwrap_or(0);
            match std::fs::remove_file(&entry.path) {
                Ok(()) => {
                    result.files_deleted += 1;
                    result.bytes_freed += size;
                }
                Err(e) => {
                    warn!(path = %entry.path.display(), error = %e, "Failed to delete cache artifact");
                }
            }
        }
        index.clear();

        Ok(result)
    }

    /// File count and total size of the indexed artifacts.
    pub fn stats(&self) -> CacheStats {
        let index = self.index.read();
        let bytes = index
            .values()
            .filter_map(|entry| std::fs::metadata(&entry.path).ok())
            .map(|m| m.len())
            .sum();

        CacheStats {
            entries: index.len(),
            bytes,
        }
    }

    /// The per-key lock serializing all cache operations for one key.
    fn key_lock(&self, key: &TileKey) -> Arc<Mutex<()>> {
        self.key_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop an entry from the index and unlink its file. Deletion
    /// failures are logged, not propagated: the index removal alone
    /// already hides the entry from future lookups.
    async fn evict(&self, key: &TileKey, path: &Path) {
        self.index.write().remove(key);
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to delete stale cache artifact");
            }
        }
    }

    /// One-time startup scan building the index from artifact filenames.
    fn scan(directory: &Path) -> Result<HashMap<TileKey, IndexEntry>, CacheError> {
        let mut index: HashMap<TileKey, IndexEntry> = HashMap::new();

        for dir_entry in std::fs::read_dir(directory)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            if !dir_entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let file_name = dir_entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            match artifact::parse(name) {
                Ok(parsed) => {
                    let superseded = index
                        .get(&parsed.key)
                        .is_some_and(|existing| existing.created_at >= parsed.created_at);
                    if superseded {
                        // Older duplicate for the same key.
                        remove_leftover(&path);
                    } else if let Some(older) = index.insert(
                        parsed.key,
                        IndexEntry {
                            created_at: parsed.created_at,
                            path,
                        },
                    ) {
                        remove_leftover(&older.path);
                    }
                }
                Err(_) if name.ends_with(".png") || name.ends_with(".tmp") => {
                    // Malformed artifact or abandoned temp file.
                    debug!(file = name, "Removing unrecognized file from cache directory");
                    remove_leftover(&path);
                }
                Err(_) => {
                    debug!(file = name, "Ignoring foreign file in cache directory");
                }
            }
        }

        Ok(index)
    }
}

fn now_epoch() -> i64 {
    chrono::Utc::now().timestamp()
}

fn remove_leftover(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "Failed to remove leftover cache file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::MapLayer;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_key() -> TileKey {
        TileKey::build(&"51.5,-0.12".parse().unwrap(), MapLayer::Temperature)
    }

    fn config(dir: &TempDir, ttl: Duration) -> CacheConfig {
        CacheConfig {
            directory: dir.path().to_path_buf(),
            ttl,
        }
    }

    fn open(dir: &TempDir, ttl: Duration) -> TileCache {
        TileCache::open(&config(dir, ttl)).unwrap()
    }

    #[tokio::test]
    async fn test_store_then_lookup_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::from_secs(60));
        let key = test_key();

        cache.store(&key, b"png bytes").await.unwrap();

        let found = cache.lookup(&key).await;
        assert_eq!(found.as_deref(), Some(b"png bytes".as_slice()));
    }

    #[tokio::test]
    async fn test_lookup_missing_key() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::from_secs(60));

        assert!(cache.lookup(&test_key()).await.is_none());
    }

    #[tokio::test]
    async fn test_store_writes_expected_filename() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::from_secs(60));

        let artifact = cache.store(&test_key(), b"x").await.unwrap();

        let name = artifact.path.file_name().unwrap().to_str().unwrap();
        assert_eq!(
            name,
            format!("51.5_-0.12_{}_temp_.png", artifact.created_at)
        );
        assert!(artifact.path.exists());
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed_on_lookup() {
        let dir = TempDir::new().unwrap();

        // Seed an artifact well past any TTL directly on disk, then open
        // so the scan indexes it.
        let stale = dir.path().join("51.5_-0.12_1000000000_temp_.png");
        std::fs::write(&stale, b"old bytes").unwrap();

        let cache = open(&dir, Duration::from_secs(1800));
        let key = test_key();
        assert!(cache.contains(&key));

        assert!(cache.lookup(&key).await.is_none());
        assert!(!stale.exists(), "stale artifact should be deleted");
        assert!(!cache.contains(&key));
    }

    #[tokio::test]
    async fn test_zero_ttl_treats_every_entry_as_stale() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::ZERO);
        let key = test_key();

        let artifact = cache.store(&key, b"bytes").await.unwrap();
        assert!(cache.lookup(&key).await.is_none());
        assert!(!artifact.path.exists());
    }

    #[tokio::test]
    async fn test_store_replaces_previous_artifact() {
        let dir = TempDir::new().unwrap();

        let old = dir.path().join("51.5_-0.12_1000000000_temp_.png");
        std::fs::write(&old, b"old").unwrap();

        let cache = open(&dir, Duration::from_secs(1800));
        let key = test_key();

        cache.store(&key, b"new").await.unwrap();

        assert!(!old.exists(), "replaced artifact should be unlinked");
        assert_eq!(cache.lookup(&key).await.as_deref(), Some(b"new".as_slice()));
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_artifact_degrades_to_miss() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::from_secs(1800));
        let key = test_key();

        let artifact = cache.store(&key, b"bytes").await.unwrap();
        std::fs::remove_file(&artifact.path).unwrap();

        assert!(cache.lookup(&key).await.is_none());
        assert!(!cache.contains(&key));
    }

    #[tokio::test]
    async fn test_scan_skips_and_removes_malformed_files() {
        let dir = TempDir::new().unwrap();

        std::fs::write(dir.path().join("not_an_artifact.png"), b"junk").unwrap();
        std::fs::write(
            dir.path().join("51.5_-0.12_1700000000_temp_.png.tmp"),
            b"partial",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();

        let cache = open(&dir, Duration::from_secs(1800));

        assert_eq!(cache.entry_count(), 0);
        assert!(!dir.path().join("not_an_artifact.png").exists());
        assert!(!dir.path().join("51.5_-0.12_1700000000_temp_.png.tmp").exists());
        // Foreign files are left alone.
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_scan_keeps_only_newest_duplicate() {
        let dir = TempDir::new().unwrap();

        let older = dir.path().join("51.5_-0.12_1700000000_temp_.png");
        let newer = dir.path().join("51.5_-0.12_1700000600_temp_.png");
        std::fs::write(&older, b"older").unwrap();
        std::fs::write(&newer, b"newer").unwrap();

        let cache = open(&dir, Duration::from_secs(1800));

        assert_eq!(cache.entry_count(), 1);
        assert!(!older.exists(), "older duplicate should be removed");
        assert!(newer.exists());
    }

    #[tokio::test]
    async fn test_index_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let key = test_key();

        {
            let cache = open(&dir, Duration::from_secs(1800));
            cache.store(&key, b"persisted").await.unwrap();
        }

        let reopened = open(&dir, Duration::from_secs(1800));
        assert_eq!(
            reopened.lookup(&key).await.as_deref(),
            Some(b"persisted".as_slice())
        );
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::from_secs(1800));

        cache.store(&test_key(), b"aaaa").await.unwrap();
        let other = TileKey::build(&"48.85,2.35".parse().unwrap(), MapLayer::Wind);
        cache.store(&other, b"bbbb").await.unwrap();

        let result = cache.clear().unwrap();
        assert_eq!(result.files_deleted, 2);
        assert_eq!(result.bytes_freed, 8);
        assert_eq!(cache.entry_count(), 0);
        assert!(cache.lookup(&test_key()).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_reports_entries_and_bytes() {
        let dir = TempDir::new().unwrap();
        let cache = open(&dir, Duration::from_secs(1800));

        cache.store(&test_key(), b"12345").await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.bytes, 5);
    }

    #[tokio::test]
    async fn test_concurrent_stores_leave_one_artifact() {
        let dir = TempDir::new().unwrap();
        let cache = Arc::new(open(&dir, Duration::from_secs(1800)));
        let key = test_key();

        let mut handles = Vec::new();
        for i in 0..8u8 {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                cache.store(&key, &[i; 16]).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Exactly one artifact file remains for the key.
        let artifacts = std::fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|n| n.ends_with("_.png"))
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(artifacts, 1);
        assert_eq!(cache.entry_count(), 1);
        assert!(cache.lookup(&key).await.is_some());
    }
}
