use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Price, volume and market-cap snapshot of one token in one reference currency.
///
/// The optional fields arrived in later revisions of the quote payload and
/// are not returned by every endpoint:
///
/// | Field(s) | Introduced | Absent ⇒ |
/// |---|---|---|
/// | `volume_change_24h`, `percent_change_60d`, `percent_change_90d` | v1 listings | `0.0` |
/// | `market_cap_dominance`, `fully_diluted_market_cap` | v1 listings | `0.0` |
/// | `tvl` | v1 listings (DeFi assets) | `None` |
/// | `volume_24h_reported`, `volume_7d`, `volume_7d_reported`, `volume_30d`, `volume_30d_reported` | `aux` volume fields | `None` |
/// | `market_cap_by_total_supply` | `aux` | `None` |
/// | `total_supply`, `circulating_supply` | v2 historical quotes | `None` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub base_currency: String,
    pub price: f64,
    pub volume_24h: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub percent_change_30d: f64,
    pub market_cap: f64,
    pub last_updated: DateTime<Utc>,

    pub volume_change_24h: f64,
    pub percent_change_60d: f64,
    pub percent_change_90d: f64,
    pub market_cap_dominance: f64,
    pub fully_diluted_market_cap: f64,

    pub tvl: Option<f64>,
    pub volume_24h_reported: Option<f64>,
    pub volume_7d: Option<f64>,
    pub volume_7d_reported: Option<f64>,
    pub volume_30d: Option<f64>,
    pub volume_30d_reported: Option<f64>,
    pub market_cap_by_total_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
}

/// The chain a token is issued on, for tokens that are not native coins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    #[serde(default)]
    pub token_address: Option<String>,
}

/// Identity plus every per-currency quote of one token at one instant.
///
/// `None` means the endpoint did not provide the field, which is distinct
/// from the field being provided as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenState {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub last_updated: DateTime<Utc>,
    pub quote_map: HashMap<String, Quote>,
    /// Epoch seconds; always set.
    pub timestamp: i64,

    pub slug: Option<String>,
    pub infinite_supply: Option<bool>,
    pub num_market_pairs: Option<i64>,
    pub date_added: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub max_supply: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub platform: Option<Platform>,
    pub cmc_rank: Option<i64>,
    pub self_reported_circulating_supply: Option<f64>,
    pub self_reported_market_cap: Option<f64>,
    pub tvl_ratio: Option<f64>,
    pub is_market_cap_included_in_calc: Option<bool>,
    pub is_active: Option<bool>,
    pub is_fiat: Option<bool>,
}

/// Directory entry for a token; carries no price data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub id: i64,
    pub rank: Option<i64>,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub is_active: i64,
    pub status: i64,
    pub first_historical_data: Option<DateTime<Utc>>,
    pub last_historical_data: Option<DateTime<Utc>>,
    pub platform: Option<Platform>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DexUrls {
    pub website: Vec<String>,
    pub twitter: Vec<String>,
    pub blog: Vec<String>,
    pub chat: Vec<String>,
    pub fee: Vec<String>,
}

/// Directory entry for a decentralized exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub date_launched: Option<String>,
    pub notice: Option<String>,
    pub status: Option<String>,
    pub urls: DexUrls,
    /// Epoch seconds; the capture time when the payload has none.
    pub timestamp: i64,
}
