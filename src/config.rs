use crate::cache::ResponseCache;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com/";
pub const API_KEY_ENV: &str = "COINMARKETCAP_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Keep responses in a file so later runs can reuse them.
    #[serde(default = "default_cache_persist")]
    pub persist: bool,
    /// Backing file; the system temp directory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    120
}

fn default_cache_persist() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl_secs(),
            persist: default_cache_persist(),
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Reads `path` when given, then lets `COINMARKETCAP_API_KEY` override
    /// the key from the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url '{}' must be an http(s) URL", self.base_url);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache
            .enabled
            .then_some(Duration::from_secs(self.cache.ttl_secs))
    }

    /// File backing the cache, or `None` when it is memory-only or disabled.
    pub fn cache_path(&self) -> Option<PathBuf> {
        if !self.cache.enabled || !self.cache.persist {
            return None;
        }
        Some(
            self.cache
                .path
                .clone()
                .unwrap_or_else(ResponseCache::default_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(120)));
        assert!(config.api_key.is_none());
        assert_eq!(config.cache_path(), Some(ResponseCache::default_path()));
    }

    #[test]
    fn cache_path_follows_persist_and_path() {
        let config = Config::from_yaml("cache:\n  path: /var/tmp/cmc.json\n").unwrap();
        assert_eq!(config.cache_path(), Some(PathBuf::from("/var/tmp/cmc.json")));

        let config = Config::from_yaml("cache:\n  persist: false\n").unwrap();
        assert_eq!(config.cache_path(), None);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn overrides_from_yaml() {
        let config = Config::from_yaml(
            "api_key: abc\nbase_url: https://sandbox-api.coinmarketcap.com/\nrequest_timeout_secs: 5\ncache:\n  enabled: false\n",
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.base_url, "https://sandbox-api.coinmarketcap.com/");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.cache_path(), None);
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(Config::from_yaml("base_url: ftp://example.com/").is_err());
        assert!(Config::from_yaml("request_timeout_secs: 0").is_err());
    }
}
