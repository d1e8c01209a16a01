use super::{data_array, Query, LISTINGS_LATEST};
use crate::error::Result;
use crate::market::Market;
use crate::normalize::normalize_token_state;
use crate::params::{comma_list, validate_page, SortBy, SortDirection};
use crate::transport::Transport;
use crate::types::TokenState;

impl<T: Transport> Market<T> {
    /// Active tokens ranked by `sort_by`, one page at a time.
    ///
    /// `start` is 1-based. `convert` lists the quote currencies; empty means
    /// the API default (USD).
    pub async fn list_latest_tokens(
        &self,
        sort_by: SortBy,
        sort_direction: SortDirection,
        start: u32,
        limit: u32,
        convert: &[&str],
    ) -> Result<Vec<TokenState>> {
        validate_page(start, limit)?;

        let mut query = Query::default();
        query
            .push("start", start)
            .push("limit", limit)
            .push("sort", sort_by)
            .push("sort_dir", sort_direction)
            .push_opt("convert", comma_list(convert));

        let response = self.transport.get(LISTINGS_LATEST, query.as_slice()).await?;
        data_array(&response, LISTINGS_LATEST)?
            .iter()
            .map(normalize_token_state)
            .collect()
    }
}
