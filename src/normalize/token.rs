use super::fields::Fields;
use super::quote::normalize_quote;
use crate::error::Result;
use crate::types::{Quote, TokenState};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Builds a token snapshot from a listings / quotes-latest entry.
///
/// The `quote` map is required (it may be empty). A single bad quote fails
/// the whole token.
pub fn normalize_token_state(value: &Value) -> Result<TokenState> {
    let f = Fields::of("token", value)?;

    let quote_map = normalize_quote_map(f.object("quote")?)?;
    let last_updated = f.timestamp("last_updated")?;
    let timestamp = f
        .opt_epoch("timestamp")?
        .unwrap_or_else(|| last_updated.timestamp());

    Ok(TokenState {
        id: f.i64("id")?,
        name: f.string("name")?,
        symbol: f.string("symbol")?,
        last_updated,
        quote_map,
        timestamp,

        slug: f.opt_string("slug")?,
        infinite_supply: f.opt_flag("infinite_supply")?,
        num_market_pairs: f.opt_i64("num_market_pairs")?,
        date_added: f.opt_timestamp("date_added")?,
        tags: f.opt_strings("tags")?,
        max_supply: f.opt_f64("max_supply")?,
        circulating_supply: f.opt_f64("circulating_supply")?,
        total_supply: f.opt_f64("total_supply")?,
        platform: f.opt_decode("platform")?,
        cmc_rank: f.opt_i64("cmc_rank")?,
        self_reported_circulating_supply: f.opt_f64("self_reported_circulating_supply")?,
        self_reported_market_cap: f.opt_f64("self_reported_market_cap")?,
        tvl_ratio: f.opt_f64("tvl_ratio")?,
        is_market_cap_included_in_calc: f.opt_flag("is_market_cap_included_in_calc")?,
        is_active: f.opt_flag("is_active")?,
        is_fiat: f.opt_flag("is_fiat")?,
    })
}

/// Normalizes every currency entry of a `quote` object, keyed by currency.
pub(crate) fn normalize_quote_map(quotes: &Map<String, Value>) -> Result<HashMap<String, Quote>> {
    quotes
        .iter()
        .map(|(currency, raw)| normalize_quote(currency, raw).map(|q| (currency.clone(), q)))
        .collect()
}
