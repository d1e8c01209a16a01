//! Client for the CoinMarketCap Pro API.
//!
//! Responses from the listings, historical-quotes, directory and DEX
//! endpoints are normalized into a small set of typed records
//! ([`TokenState`], [`Quote`], [`TokenInfo`], [`DexInfo`]) regardless of
//! which API revision produced them. The normalizers in [`normalize`] are
//! pure and can be used on stored payloads without a [`Market`].

pub mod cache;
pub mod clock;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod market;
pub mod normalize;
pub mod output;
pub mod params;
pub mod transport;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{MarketError, Result};
pub use market::Market;
pub use params::{DexAuxField, DirectorySort, Interval, ListingStatus, SortBy, SortDirection};
pub use transport::{HttpTransport, Transport};
pub use types::{DexInfo, DexUrls, Platform, Quote, TokenInfo, TokenState};
