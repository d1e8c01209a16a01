//! One submodule per API endpoint. Each adds methods to [`Market`]:
//! validate arguments, build the query, call the transport, normalize.
//!
//! [`Market`]: crate::Market

mod dex;
mod global;
mod historical;
mod listings;
mod map;

use crate::error::{MarketError, Result};
use serde_json::Value;

pub const LISTINGS_LATEST: &str = "v1/cryptocurrency/listings/latest";
pub const QUOTES_HISTORICAL: &str = "v2/cryptocurrency/quotes/historical";
pub const CRYPTOCURRENCY_MAP: &str = "v1/cryptocurrency/map";
pub const DEX_LISTINGS_INFO: &str = "v4/dex/listings/info";
pub const GLOBAL_METRICS_LATEST: &str = "v1/global-metrics/quotes/latest";

/// Query parameters in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(String, String)>);

impl Query {
    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt(&mut self, key: &str, value: Option<String>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

/// The `data` array of a list endpoint's response.
pub(crate) fn data_array<'a>(response: &'a Value, endpoint: &str) -> Result<&'a Vec<Value>> {
    response
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| MarketError::Schema(format!("{} response has no 'data' array", endpoint)))
}
