use super::fields::Fields;
use crate::error::Result;
use crate::types::TokenInfo;
use serde_json::Value;

pub fn normalize_token_info(value: &Value) -> Result<TokenInfo> {
    let f = Fields::of("token info", value)?;

    Ok(TokenInfo {
        id: f.i64("id")?,
        rank: f.opt_i64("rank")?,
        name: f.string("name")?,
        symbol: f.string("symbol")?,
        slug: f.string("slug")?,
        is_active: f.i64("is_active")?,
        status: f.i64("status")?,
        first_historical_data: f.opt_timestamp("first_historical_data")?,
        last_historical_data: f.opt_timestamp("last_historical_data")?,
        platform: f.opt_decode("platform")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarketError;
    use serde_json::json;

    fn entry() -> Value {
        json!({
            "id": 1027,
            "rank": 2,
            "name": "Ethereum",
            "symbol": "ETH",
            "slug": "ethereum",
            "is_active": 1,
            "status": 1,
            "first_historical_data": "2015-08-07T14:49:30.000Z",
            "last_historical_data": "2024-01-01T00:00:00.000Z",
            "platform": null
        })
    }

    #[test]
    fn full_entry() {
        let info = normalize_token_info(&entry()).unwrap();
        assert_eq!(info.id, 1027);
        assert_eq!(info.rank, Some(2));
        assert_eq!(info.slug, "ethereum");
        assert_eq!(info.is_active, 1);
        assert_eq!(
            info.last_historical_data.map(|t| t.timestamp()),
            Some(1704067200)
        );
        assert!(info.first_historical_data.is_some());
        assert_eq!(info.platform, None);
    }

    #[test]
    fn absent_history_bounds_stay_unset() {
        let mut v = entry();
        let obj = v.as_object_mut().unwrap();
        obj.remove("first_historical_data");
        obj.remove("last_historical_data");
        obj.remove("rank");
        let info = normalize_token_info(&v).unwrap();
        assert_eq!(info.first_historical_data, None);
        assert_eq!(info.last_historical_data, None);
        assert_eq!(info.rank, None);
    }

    #[test]
    fn malformed_history_bound_is_a_format_error() {
        let mut v = entry();
        v["first_historical_data"] = json!("August 2015");
        assert!(matches!(
            normalize_token_info(&v),
            Err(MarketError::Format { .. })
        ));
    }

    #[test]
    fn required_fields_are_enforced() {
        for key in ["id", "name", "symbol", "slug", "is_active", "status"] {
            let mut v = entry();
            v.as_object_mut().unwrap().remove(key);
            assert!(
                matches!(normalize_token_info(&v), Err(MarketError::Schema(_))),
                "removing {} should fail",
                key
            );
        }
    }
}
