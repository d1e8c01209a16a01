use super::fields::Fields;
use crate::error::Result;
use crate::types::Quote;
use serde_json::Value;

/// Builds the quote for `currency` from one entry of a `quote` map.
///
/// Historical payloads name the quote instant `timestamp` rather than
/// `last_updated`; either is accepted, `last_updated` first.
pub fn normalize_quote(currency: &str, value: &Value) -> Result<Quote> {
    let f = Fields::of("quote", value)?;

    let last_updated = if !f.has("last_updated") && f.has("timestamp") {
        f.timestamp("timestamp")?
    } else {
        f.timestamp("last_updated")?
    };

    Ok(Quote {
        base_currency: currency.to_string(),
        price: f.f64("price")?,
        volume_24h: f.f64("volume_24h")?,
        percent_change_1h: f.f64("percent_change_1h")?,
        percent_change_24h: f.f64("percent_change_24h")?,
        percent_change_7d: f.f64("percent_change_7d")?,
        percent_change_30d: f.f64("percent_change_30d")?,
        market_cap: f.f64("market_cap")?,
        last_updated,

        volume_change_24h: f.f64_or_zero("volume_change_24h")?,
        percent_change_60d: f.f64_or_zero("percent_change_60d")?,
        percent_change_90d: f.f64_or_zero("percent_change_90d")?,
        market_cap_dominance: f.f64_or_zero("market_cap_dominance")?,
        fully_diluted_market_cap: f.f64_or_zero("fully_diluted_market_cap")?,

        tvl: f.opt_f64("tvl")?,
        volume_24h_reported: f.opt_f64("volume_24h_reported")?,
        volume_7d: f.opt_f64("volume_7d")?,
        volume_7d_reported: f.opt_f64("volume_7d_reported")?,
        volume_30d: f.opt_f64("volume_30d")?,
        volume_30d_reported: f.opt_f64("volume_30d_reported")?,
        market_cap_by_total_supply: f.opt_f64("market_cap_by_total_supply")?,
        total_supply: f.opt_f64("total_supply")?,
        circulating_supply: f.opt_f64("circulating_supply")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "price": 42000.0,
            "volume_24h": 1e9,
            "percent_change_1h": 0.1,
            "percent_change_24h": -1.5,
            "percent_change_7d": 3,
            "percent_change_30d": 0,
            "market_cap": 8e11,
            "last_updated": "2024-01-01T00:00:00.000Z"
        })
    }

    #[test]
    fn optional_fields_take_their_defaults() {
        let q = normalize_quote("USD", &minimal()).unwrap();
        assert_eq!(q.base_currency, "USD");
        assert_eq!(q.price, 42000.0);
        assert_eq!(q.percent_change_7d, 3.0);
        assert_eq!(q.last_updated.timestamp(), 1704067200);

        assert_eq!(q.volume_change_24h, 0.0);
        assert_eq!(q.percent_change_60d, 0.0);
        assert_eq!(q.percent_change_90d, 0.0);
        assert_eq!(q.market_cap_dominance, 0.0);
        assert_eq!(q.fully_diluted_market_cap, 0.0);

        assert_eq!(q.tvl, None);
        assert_eq!(q.volume_24h_reported, None);
        assert_eq!(q.volume_7d, None);
        assert_eq!(q.volume_7d_reported, None);
        assert_eq!(q.volume_30d, None);
        assert_eq!(q.volume_30d_reported, None);
        assert_eq!(q.market_cap_by_total_supply, None);
        assert_eq!(q.total_supply, None);
        assert_eq!(q.circulating_supply, None);
    }

    #[test]
    fn optional_fields_are_copied_when_present() {
        let mut v = minimal();
        let obj = v.as_object_mut().unwrap();
        for (key, value) in [
            ("volume_change_24h", 12.5),
            ("percent_change_60d", 60.5),
            ("percent_change_90d", -90.5),
            ("market_cap_dominance", 51.2),
            ("fully_diluted_market_cap", 8.8e11),
            ("tvl", 1000.0),
            ("volume_24h_reported", 2e9),
            ("volume_7d", 7e9),
            ("volume_7d_reported", 7.0),
            ("volume_30d", 3e10),
            ("volume_30d_reported", 3.1e10),
            ("market_cap_by_total_supply", 8.2e11),
            ("total_supply", 19_600_000.5),
            ("circulating_supply", 19_500_000.0),
        ] {
            obj.insert(key.into(), json!(value));
        }

        let q = normalize_quote("EUR", &v).unwrap();
        assert_eq!(q.base_currency, "EUR");
        assert_eq!(q.volume_change_24h, 12.5);
        assert_eq!(q.percent_change_60d, 60.5);
        assert_eq!(q.percent_change_90d, -90.5);
        assert_eq!(q.market_cap_dominance, 51.2);
        assert_eq!(q.fully_diluted_market_cap, 8.8e11);
        assert_eq!(q.tvl, Some(1000.0));
        assert_eq!(q.volume_24h_reported, Some(2e9));
        assert_eq!(q.volume_7d, Some(7e9));
        assert_eq!(q.volume_7d_reported, Some(7.0));
        assert_eq!(q.volume_30d, Some(3e10));
        assert_eq!(q.volume_30d_reported, Some(3.1e10));
        assert_eq!(q.market_cap_by_total_supply, Some(8.2e11));
        assert_eq!(q.total_supply, Some(19_600_000.5));
        assert_eq!(q.circulating_supply, Some(19_500_000.0));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let mut v = minimal();
        v.as_object_mut()
            .unwrap()
            .insert("brand_new_metric".into(), json!({"nested": true}));
        assert!(normalize_quote("USD", &v).is_ok());
    }

    #[test]
    fn malformed_last_updated_is_a_format_error() {
        let mut v = minimal();
        v["last_updated"] = json!("not a time");
        let err = normalize_quote("USD", &v).unwrap_err();
        assert!(matches!(err, MarketError::Format { ref field, .. } if field == "last_updated"));
    }

    #[test]
    fn missing_required_metric_is_a_schema_error() {
        let mut v = minimal();
        v.as_object_mut().unwrap().remove("market_cap");
        assert!(matches!(
            normalize_quote("USD", &v),
            Err(MarketError::Schema(_))
        ));
    }

    #[test]
    fn historical_timestamp_key_stands_in_for_last_updated() {
        let mut v = minimal();
        let obj = v.as_object_mut().unwrap();
        obj.remove("last_updated");
        obj.insert("timestamp".into(), json!("2024-02-01T00:00:00.000Z"));
        let q = normalize_quote("USD", &v).unwrap();
        assert_eq!(q.last_updated.timestamp(), 1706745600);
    }
}
