use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

/// File name used under the system temp directory for the on-disk store.
pub const DEFAULT_CACHE_FILE: &str = "cmc_market_cache.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: Value,
    stored_at: DateTime<Utc>,
}

impl Entry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        // A stamp from the future (clock moved back) counts as brand new.
        let age = (Utc::now() - self.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        age < ttl
    }
}

/// Decoded responses keyed by endpoint and query, reused for a fixed window.
///
/// With a backing file the store is loaded once on construction and written
/// back after every insert, so separate runs share hits.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    ttl: Duration,
    path: Option<PathBuf>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            path: None,
        }
    }

    /// Cache backed by a JSON file. A missing or unreadable file starts empty.
    pub fn persistent(ttl: Duration, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries = load(&path);
        entries.retain(|_, entry| entry.is_fresh(ttl));
        debug!("loaded {} cached response(s) from {}", entries.len(), path.display());
        Self {
            entries: Arc::new(Mutex::new(entries)),
            ttl,
            path: Some(path),
        }
    }

    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_CACHE_FILE)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parameter order does not matter: `a=1&b=2` and `b=2&a=1` share a key.
    pub fn key(endpoint: &str, params: &[(String, String)]) -> String {
        let mut sorted: Vec<_> = params.iter().collect();
        sorted.sort();
        let query: Vec<String> = sorted.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", endpoint, query.join("&"))
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        let fresh = entries
            .get(key)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.value.clone());
        if fresh.is_none() {
            entries.remove(key);
        }
        fresh
    }

    /// Stores `value` and drops every entry that has outlived the TTL.
    pub async fn insert(&self, key: String, value: Value) {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        entries.insert(
            key,
            Entry {
                value,
                stored_at: Utc::now(),
            },
        );
        if let Some(path) = &self.path {
            save(path, &entries).await;
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn load(path: &Path) -> HashMap<String, Entry> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("no cache at {}: {}", path.display(), e);
            return HashMap::new();
        }
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        warn!("ignoring unreadable cache {}: {}", path.display(), e);
        HashMap::new()
    })
}

/// Write failures only cost future hits, so they are logged and dropped.
async fn save(path: &Path, entries: &HashMap<String, Entry>) {
    let bytes = match serde_json::to_vec(entries) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to serialize response cache: {}", e);
            return;
        }
    };
    if let Err(e) = tokio::fs::write(path, bytes).await {
        warn!("failed to write cache {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn key_ignores_parameter_order() {
        let a = ResponseCache::key("v1/x", &params(&[("limit", "10"), ("start", "1")]));
        let b = ResponseCache::key("v1/x", &params(&[("start", "1"), ("limit", "10")]));
        assert_eq!(a, b);
        assert_ne!(a, ResponseCache::key("v1/y", &params(&[("start", "1"), ("limit", "10")])));
    }

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache = ResponseCache::default();
        cache.insert("k".into(), json!({"data": 1})).await;
        assert_eq!(cache.get("k").await, Some(json!({"data": 1})));
        assert_eq!(cache.get("other").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("k".into(), json!(1)).await;
        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn insert_sweeps_expired_keys() {
        let cache = ResponseCache::new(Duration::ZERO);
        for start in 0..50 {
            let start = start.to_string();
            let key = ResponseCache::key(
                "v2/cryptocurrency/quotes/historical",
                &params(&[("time_start", start.as_str())]),
            );
            assert_eq!(cache.get(&key).await, None);
            cache.insert(key, json!({"data": start})).await;
        }
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn persistent_cache_is_shared_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let first = ResponseCache::persistent(DEFAULT_TTL, &path);
        first.insert("v1/x?start=1".into(), json!({"data": [1, 2]})).await;
        assert!(path.exists());

        let second = ResponseCache::persistent(DEFAULT_TTL, &path);
        assert_eq!(second.path(), Some(path.as_path()));
        assert_eq!(second.get("v1/x?start=1").await, Some(json!({"data": [1, 2]})));
    }

    #[tokio::test]
    async fn stale_or_corrupt_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        ResponseCache::persistent(Duration::ZERO, &path)
            .insert("k".into(), json!(1))
            .await;
        assert!(ResponseCache::persistent(Duration::ZERO, &path).is_empty().await);

        std::fs::write(&path, b"not json").unwrap();
        assert!(ResponseCache::persistent(DEFAULT_TTL, &path).is_empty().await);
    }
}
