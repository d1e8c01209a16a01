use super::{Query, GLOBAL_METRICS_LATEST};
use crate::error::{MarketError, Result};
use crate::market::Market;
use crate::params::comma_list;
use crate::transport::Transport;
use serde_json::{Map, Value};

impl<T: Transport> Market<T> {
    /// Market-wide totals (dominance, total market cap, volume). Returned as
    /// the raw response object; there is no typed model for it.
    pub async fn global_stats(&self, convert: &[&str]) -> Result<Map<String, Value>> {
        let mut query = Query::default();
        query.push_opt("convert", comma_list(convert));

        match self
            .transport
            .get(GLOBAL_METRICS_LATEST, query.as_slice())
            .await?
        {
            Value::Object(map) => Ok(map),
            other => Err(MarketError::Schema(format!(
                "{} response is not a JSON object: {}",
                GLOBAL_METRICS_LATEST, other
            ))),
        }
    }
}
