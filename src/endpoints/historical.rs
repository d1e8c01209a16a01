use super::{Query, QUOTES_HISTORICAL};
use crate::error::{MarketError, Result};
use crate::market::Market;
use crate::normalize::reshape_historical;
use crate::params::{comma_list, Interval, MAX_HISTORICAL_CONVERT};
use crate::transport::Transport;
use crate::types::TokenState;
use tracing::debug;

impl<T: Transport> Market<T> {
    /// Time series for one ticker between two epoch-second bounds, one
    /// snapshot per interval step in the order the API returns them.
    pub async fn historical_quotes(
        &self,
        ticker: &str,
        time_start: i64,
        time_end: i64,
        interval: &str,
        convert: &[&str],
    ) -> Result<Vec<TokenState>> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(MarketError::Validation("ticker must not be empty".to_string()));
        }
        if time_start > time_end {
            return Err(MarketError::Validation(format!(
                "time_start ({}) is after time_end ({})",
                time_start, time_end
            )));
        }
        let interval: Interval = interval.parse()?;
        let convert = comma_list(convert);
        let currencies = convert.as_deref().map_or(0, |c| c.split(',').count());
        if currencies > MAX_HISTORICAL_CONVERT {
            return Err(MarketError::Validation(format!(
                "at most {} convert currencies are allowed, got {}",
                MAX_HISTORICAL_CONVERT, currencies
            )));
        }

        debug!(
            "historical {} {}..{} every {} (calendar: {})",
            ticker,
            time_start,
            time_end,
            interval,
            interval.is_calendar()
        );

        let mut query = Query::default();
        query
            .push("symbol", &ticker)
            .push("time_start", time_start)
            .push("time_end", time_end)
            .push("interval", interval)
            .push_opt("convert", convert);

        let response = self
            .transport
            .get(QUOTES_HISTORICAL, query.as_slice())
            .await?;
        reshape_historical(&response, &ticker)
    }
}
