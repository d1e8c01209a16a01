use super::{data_array, Query, DEX_LISTINGS_INFO};
use crate::error::{MarketError, Result};
use crate::market::Market;
use crate::normalize::normalize_dex_info;
use crate::params::{comma_list, DexAuxField};
use crate::transport::Transport;
use crate::types::DexInfo;
use tracing::warn;

impl<T: Transport> Market<T> {
    /// Details for specific DEXs. At least one id is required; the endpoint
    /// has no pagination or sorting. Always fetched fresh.
    pub async fn dex_listings_info(
        &self,
        ids: &[i64],
        aux_fields: &[DexAuxField],
    ) -> Result<Vec<DexInfo>> {
        if ids.is_empty() {
            return Err(MarketError::Validation(
                "At least one DEX ID must be provided".to_string(),
            ));
        }

        let mut query = Query::default();
        query
            .push_opt("id", comma_list(ids.iter().map(i64::to_string)))
            .push_opt("aux", comma_list(aux_fields.iter().map(DexAuxField::as_str)));

        let response = self
            .transport
            .get_fresh(DEX_LISTINGS_INFO, query.as_slice())
            .await?;
        let dexes = data_array(&response, DEX_LISTINGS_INFO)?
            .iter()
            .map(|raw| normalize_dex_info(raw, self.clock.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !dexes.iter().any(|d| d.id == **id))
            .map(i64::to_string)
            .collect();
        if dexes.is_empty() {
            return Err(MarketError::NotFound(format!("DEX id {}", missing.join(", "))));
        }
        if !missing.is_empty() {
            warn!("DEX info returned nothing for id(s) {}", missing.join(", "));
        }

        Ok(dexes)
    }
}
