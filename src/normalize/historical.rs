use super::fields::Fields;
use super::token::normalize_quote_map;
use crate::error::{MarketError, Result};
use crate::types::{Quote, TokenState};
use serde_json::Value;

/// Unwinds a v2 historical-quotes response into one snapshot per quote block.
///
/// The payload looks like
/// `{"data": {"BTC": [{id, name, symbol, is_active, is_fiat, quotes: [{timestamp, quote: {"USD": {..}}}]}]}}`.
/// Snapshots keep the order of `quotes` as delivered; every currency inside a
/// block lands in the same snapshot's `quote_map`.
pub fn reshape_historical(response: &Value, ticker: &str) -> Result<Vec<TokenState>> {
    let data = Fields::of("historical response", response)?.object("data")?;
    let entry = data
        .get(ticker)
        .ok_or_else(|| MarketError::NotFound(format!("ticker '{}'", ticker)))?;

    let summary = match entry {
        Value::Array(items) => match items.as_slice() {
            [single] => single,
            [] => {
                return Err(MarketError::Schema(format!(
                    "no summary object for ticker '{}'",
                    ticker
                )))
            }
            many => {
                return Err(MarketError::Schema(format!(
                    "{} summary objects for ticker '{}', expected exactly one",
                    many.len(),
                    ticker
                )))
            }
        },
        Value::Object(_) => entry,
        other => {
            return Err(MarketError::format(
                ticker,
                format!("expected summary list, got {}", other),
            ))
        }
    };

    let s = Fields::of("historical summary", summary)?;
    let id = s.i64("id")?;
    let name = s.string("name")?;
    let symbol = s.string("symbol")?;
    let slug = s.opt_string("slug")?;
    let is_active = s.opt_flag("is_active")?;
    let is_fiat = s.opt_flag("is_fiat")?;

    s.array("quotes")?
        .iter()
        .map(|block| -> Result<TokenState> {
            let b = Fields::of("historical quote block", block)?;
            let at = b.timestamp("timestamp")?;
            let raw_quotes = b.object("quote")?;
            let quote_map = normalize_quote_map(raw_quotes)?;

            // Supply figures ride along inside each currency's quote; the
            // first currency (in key order) that carries one wins.
            let lifted = |pick: fn(&Quote) -> Option<f64>| {
                raw_quotes
                    .keys()
                    .filter_map(|currency| quote_map.get(currency).and_then(pick))
                    .next()
            };
            let circulating_supply = lifted(|q| q.circulating_supply);
            let total_supply = lifted(|q| q.total_supply);

            Ok(TokenState {
                id,
                name: name.clone(),
                symbol: symbol.clone(),
                last_updated: at,
                quote_map,
                timestamp: at.timestamp(),
                slug: slug.clone(),
                infinite_supply: None,
                num_market_pairs: None,
                date_added: None,
                tags: None,
                max_supply: None,
                circulating_supply,
                total_supply,
                platform: None,
                cmc_rank: None,
                self_reported_circulating_supply: None,
                self_reported_market_cap: None,
                tvl_ratio: None,
                is_market_cap_included_in_calc: None,
                is_active,
                is_fiat,
            })
        })
        .collect()
}
