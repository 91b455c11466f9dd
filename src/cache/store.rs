// Filesystem cache store keyed by loader identity.
// Handles JSON serialization, TTL checking, and pruning to a maximum entry count.

use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::Result;

/// Maximum number of cache files kept on disk before the oldest are pruned.
pub const DEFAULT_MAX_ENTRIES: usize = 20;

/// Wrapper for cached data with its cache timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this cached data has expired based on TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed > ttl
    }

    /// Check if this cached data is still valid (not expired).
    pub fn is_valid(&self, ttl: Duration) -> bool {
        !self.is_expired(ttl)
    }
}

/// Filesystem-backed cache with per-call TTLs and an entry cap.
///
/// Concurrent refreshes of the same key are not coordinated; at worst two
/// requests recompute the same value and the later write wins.
pub struct CacheStore {
    dir: PathBuf,
    max_entries: usize,
}

impl CacheStore {
    /// Create a store rooted at `dir` with the default entry cap.
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Create a store with an explicit entry cap.
    pub fn with_max_entries(dir: PathBuf, max_entries: usize) -> Self {
        Self { dir, max_entries }
    }

    /// Return the stored value for `key` when its age is below `ttl`;
    /// otherwise invoke `compute`, persist the result, and return it.
    /// A failing `compute` propagates its error and caches nothing.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.read_cached::<T>(key) {
            Ok(Some(cached)) if cached.is_valid(ttl) => {
                debug!("cache hit for {}", key);
                return Ok(cached.data);
            }
            Ok(_) => debug!("cache miss for {}", key),
            // An unreadable entry is treated as a miss and overwritten.
            Err(err) => debug!("discarding unreadable cache entry for {}: {}", key, err),
        }

        let value = compute().await?;
        self.write_cached(key, &value)?;
        Ok(value)
    }

    /// Read the cached entry for `key`, if any.
    pub fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CachedData<T>>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let cached: CachedData<T> = serde_json::from_str(&contents)?;
        Ok(Some(cached))
    }

    /// Write a value for `key`, stamped with the current time.
    pub fn write_cached<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let cached = CachedData::new(data);
        let json = serde_json::to_string_pretty(&cached)?;

        // Write atomically via temp file
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        self.prune()?;
        Ok(())
    }

    /// Delete the entry for `key`, if present.
    pub fn delete(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Delete the oldest entries until at most `max_entries` remain.
    fn prune(&self) -> Result<()> {
        let mut entries: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            // Entries that fail to parse sort first and are pruned first.
            let cached_at = fs::read_to_string(&path)
                .ok()
                .and_then(|contents| {
                    serde_json::from_str::<CachedData<serde_json::Value>>(&contents).ok()
                })
                .map(|cached| cached.cached_at)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            entries.push((path, cached_at));
        }

        if entries.len() <= self.max_entries {
            return Ok(());
        }

        entries.sort_by_key(|(_, cached_at)| *cached_at);
        let excess = entries.len() - self.max_entries;
        for (path, _) in entries.into_iter().take(excess) {
            debug!("pruning cache entry {}", path.display());
            fs::remove_file(path)?;
        }

        Ok(())
    }
}

/// Sanitize a cache key for use as a file name.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::TempDir;

    use super::*;
    use crate::error::CovidError;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("simple"), "simple");
        assert_eq!(sanitize_key("with/slash"), "with_slash");
        assert_eq!(sanitize_key("a:b?c"), "a_b_c");
    }

    #[test]
    fn test_write_and_read_cached() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().to_path_buf());

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        store.write_cached("reports", &data).unwrap();

        let cached: Option<CachedData<TestData>> = store.read_cached("reports").unwrap();
        let cached = cached.unwrap();
        assert_eq!(cached.data, data);
        assert!(cached.is_valid(Duration::from_secs(60)));
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().to_path_buf());

        let cached: Option<CachedData<TestData>> = store.read_cached("missing").unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn test_expiry() {
        let mut data = CachedData::new("test");
        assert!(data.is_valid(Duration::from_secs(300)));

        // Set cached_at to the past
        data.cached_at = Utc::now() - chrono::Duration::seconds(600);
        assert!(data.is_expired(Duration::from_secs(300)));
        assert!(!data.is_valid(Duration::from_secs(300)));
    }

    #[tokio::test]
    async fn test_get_or_compute_serves_cached_within_ttl() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().to_path_buf());
        let calls = AtomicUsize::new(0);

        let first: i32 = store
            .get_or_compute("answer", Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await
            .unwrap();

        let second: i32 = store
            .get_or_compute("answer", Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .await
            .unwrap();

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_compute_recomputes_after_expiry() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().to_path_buf());
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let _: i32 = store
                .get_or_compute("answer", Duration::ZERO, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(1)
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_or_compute_failure_caches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().to_path_buf());

        let result: Result<i32> = store
            .get_or_compute("bad", Duration::from_secs(60), || async {
                Err(CovidError::Other("boom".to_string()))
            })
            .await;

        assert!(result.is_err());
        let cached: Option<CachedData<i32>> = store.read_cached("bad").unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn test_prune_keeps_newest_entries() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::with_max_entries(temp_dir.path().to_path_buf(), 3);

        for i in 0..5 {
            store.write_cached(&format!("key{}", i), &i).unwrap();
        }

        let remaining = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "json"))
            .count();
        assert_eq!(remaining, 3);

        // The most recent write always survives.
        let cached: Option<CachedData<i32>> = store.read_cached("key4").unwrap();
        assert_eq!(cached.unwrap().data, 4);
    }
}
