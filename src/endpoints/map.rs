use super::{data_array, Query, CRYPTOCURRENCY_MAP};
use crate::error::Result;
use crate::market::Market;
use crate::normalize::normalize_token_info;
use crate::params::{comma_list, validate_page, DirectorySort, ListingStatus};
use crate::transport::Transport;
use crate::types::TokenInfo;

impl<T: Transport> Market<T> {
    /// Directory of token identities. `symbols` narrows the result to the
    /// given tickers; empty means no filter.
    pub async fn list_token_directory(
        &self,
        status: ListingStatus,
        start: u32,
        limit: u32,
        symbols: &[&str],
        sort: DirectorySort,
    ) -> Result<Vec<TokenInfo>> {
        validate_page(start, limit)?;

        let mut query = Query::default();
        query
            .push("listing_status", status)
            .push("start", start)
            .push("limit", limit)
            .push("sort", sort)
            .push_opt("symbol", comma_list(symbols));

        let response = self
            .transport
            .get(CRYPTOCURRENCY_MAP, query.as_slice())
            .await?;
        data_array(&response, CRYPTOCURRENCY_MAP)?
            .iter()
            .map(normalize_token_info)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::mock::RecordingTransport;
    use crate::error::MarketError;
    use crate::params::{DirectorySort, ListingStatus};
    use crate::Market;
    use serde_json::json;

    #[tokio::test]
    async fn lists_directory_entries() {
        let market = Market::new(RecordingTransport::new(json!({
            "data": [
                {"id": 1, "rank": 1, "name": "Bitcoin", "symbol": "BTC", "slug": "bitcoin",
                 "is_active": 1, "status": 1,
                 "first_historical_data": "2013-04-28T18:47:21.000Z",
                 "last_historical_data": "2024-01-01T00:00:00.000Z", "platform": null},
                {"id": 9999, "name": "Gone", "symbol": "GONE", "slug": "gone",
                 "is_active": 0, "status": 0}
            ]
        })));

        let infos = market
            .list_token_directory(ListingStatus::Inactive, 1, 50, &["BTC", "GONE"], DirectorySort::CmcRank)
            .await
            .unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].rank, Some(1));
        assert!(infos[0].first_historical_data.is_some());
        assert_eq!(infos[1].rank, None);
        assert_eq!(infos[1].last_historical_data, None);

        let call = &market.transport().calls()[0];
        assert_eq!(call.endpoint, "v1/cryptocurrency/map");
        assert_eq!(call.param("listing_status"), Some("inactive"));
        assert_eq!(call.param("limit"), Some("50"));
        assert_eq!(call.param("sort"), Some("cmc_rank"));
        assert_eq!(call.param("symbol"), Some("BTC,GONE"));
    }

    #[tokio::test]
    async fn entry_without_slug_fails_the_page() {
        let market = Market::new(RecordingTransport::new(json!({
            "data": [{"id": 1, "name": "Bitcoin", "symbol": "BTC", "is_active": 1, "status": 1}]
        })));
        let err = market
            .list_token_directory(ListingStatus::Active, 1, 10, &[], DirectorySort::Id)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::Schema(_)));
    }
}
