use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Issues GET requests against the API and hands back decoded JSON.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value>;

    /// Like `get`, but never answered from a cache.
    async fn get_fresh(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        self.get(endpoint, params).await
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    cache: Option<ResponseCache>,
}

impl HttpTransport {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        cache: Option<ResponseCache>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MarketError::Validation(
                "An API key is required for using the CoinMarketCap API. \
                 Please visit https://pro.coinmarketcap.com/signup/ for more information."
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("cmc-market/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            cache,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.base_url.clone(),
            config.request_timeout(),
            config.cache_ttl().map(|ttl| match config.cache_path() {
                Some(path) => ResponseCache::persistent(ttl, path),
                None => ResponseCache::new(ttl),
            }),
        )
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn fetch(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let url = self.url(endpoint);
        debug!("GET {} params={:?}", url, params);

        let resp = self
            .client
            .get(&url)
            .query(params)
            .header("Accept", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        debug!("GET {} -> HTTP {}", url, status);
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MarketError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json::<Value>().await?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        let Some(cache) = &self.cache else {
            return self.fetch(endpoint, params).await;
        };

        let key = ResponseCache::key(endpoint, params);
        if let Some(hit) = cache.get(&key).await {
            debug!("cache hit for {}", key);
            return Ok(hit);
        }

        let value = self.fetch(endpoint, params).await?;
        cache.insert(key, value.clone()).await;
        Ok(value)
    }

    async fn get_fresh(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        self.fetch(endpoint, params).await
    }
}
