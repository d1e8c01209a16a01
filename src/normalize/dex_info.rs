use super::fields::Fields;
use crate::clock::Clock;
use crate::error::Result;
use crate::types::{DexInfo, DexUrls};
use serde_json::Value;

/// Builds a DEX directory entry. `clock` supplies the capture time when the
/// payload has no `timestamp` of its own.
pub fn normalize_dex_info(value: &Value, clock: &dyn Clock) -> Result<DexInfo> {
    let f = Fields::of("dex", value)?;

    let urls = if f.has("urls") {
        normalize_urls(value)?
    } else {
        DexUrls::default()
    };
    let timestamp = match f.opt_epoch("timestamp")? {
        Some(ts) => ts,
        None => clock.now().timestamp(),
    };

    Ok(DexInfo {
        id: f.i64("id")?,
        name: f.string("name")?,
        slug: f.string("slug")?,
        logo: f.opt_string("logo")?,
        description: f.opt_string("description")?,
        date_launched: f.opt_string("date_launched")?,
        notice: f.opt_string("notice")?,
        status: f.opt_string("status")?,
        urls,
        timestamp,
    })
}

fn normalize_urls(dex: &Value) -> Result<DexUrls> {
    let f = Fields::of("dex urls", &dex["urls"])?;
    let list = |key: &str| -> Result<Vec<String>> { Ok(f.opt_strings(key)?.unwrap_or_default()) };

    Ok(DexUrls {
        website: list("website")?,
        twitter: list("twitter")?,
        blog: list("blog")?,
        chat: list("chat")?,
        fee: list("fee")?,
    })
}
