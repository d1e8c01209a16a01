//! Pure conversions from raw API JSON into the typed records in
//! [`crate::types`]. Nothing here touches the network or a clock of its own.

mod dex_info;
mod fields;
mod historical;
mod quote;
mod token;
mod token_info;

pub use dex_info::normalize_dex_info;
pub use historical::reshape_historical;
pub use quote::normalize_quote;
pub use token::normalize_token_state;
pub use token_info::normalize_token_info;
