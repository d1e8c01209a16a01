use crate::types::{DexInfo, TokenInfo, TokenState};
use anyhow::{Context, Result};
use serde::Serialize;

fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Quote currency shown in tables: the requested one when present, else
/// whichever the token carries first alphabetically.
fn display_currency<'a>(token: &'a TokenState, preferred: &'a str) -> Option<&'a str> {
    if token.quote_map.contains_key(preferred) {
        return Some(preferred);
    }
    let mut keys: Vec<&str> = token.quote_map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys.first().copied()
}

pub fn print_token_table(tokens: &[TokenState], currency: &str) {
    println!(
        "\n{:<6} {:<10} {:<20} {:>18} {:>20} {:>18} {:>10}",
        "Rank", "Symbol", "Name", "Price", "Market cap", "Volume 24h", "Chg 24h%"
    );
    println!("{}", "-".repeat(108));
    for t in tokens {
        let quote = display_currency(t, currency).and_then(|c| t.quote_map.get(c));
        let (price, cap, vol, change) = match quote {
            Some(q) => (
                format!("{:.8} {}", q.price, q.base_currency),
                format!("{:.0}", q.market_cap),
                format!("{:.2}", q.volume_24h),
                format!("{:+.2}", q.percent_change_24h),
            ),
            None => ("—".into(), "—".into(), "—".into(), "—".into()),
        };
        println!(
            "{:<6} {:<10} {:<20} {:>18} {:>20} {:>18} {:>10}",
            or_dash(t.cmc_rank),
            t.symbol,
            t.name,
            price,
            cap,
            vol,
            change
        );
    }
    println!();
}

pub fn print_history_table(states: &[TokenState], currency: &str) {
    println!(
        "\n{:<26} {:>18} {:>20} {:>18}",
        "Timestamp", "Price", "Market cap", "Volume 24h"
    );
    println!("{}", "-".repeat(85));
    for s in states {
        let quote = display_currency(s, currency).and_then(|c| s.quote_map.get(c));
        match quote {
            Some(q) => println!(
                "{:<26} {:>18.8} {:>20.0} {:>18.2}",
                s.last_updated.to_rfc3339(),
                q.price,
                q.market_cap,
                q.volume_24h
            ),
            None => println!("{:<26} {:>18}", s.last_updated.to_rfc3339(), "—"),
        }
    }
    println!();
}

pub fn print_directory_table(infos: &[TokenInfo]) {
    println!(
        "\n{:<8} {:<6} {:<10} {:<24} {:<8} {:<12} {}",
        "Id", "Rank", "Symbol", "Name", "Active", "Since", "Platform"
    );
    println!("{}", "-".repeat(90));
    for i in infos {
        println!(
            "{:<8} {:<6} {:<10} {:<24} {:<8} {:<12} {}",
            i.id,
            or_dash(i.rank),
            i.symbol,
            i.name,
            if i.is_active == 1 { "yes" } else { "no" },
            or_dash(i.first_historical_data.map(|d| d.format("%Y-%m-%d"))),
            or_dash(i.platform.as_ref().map(|p| &p.name)),
        );
    }
    println!();
}

pub fn print_dex_table(dexes: &[DexInfo]) {
    println!(
        "\n{:<8} {:<24} {:<24} {:<10} {}",
        "Id", "Name", "Slug", "Status", "Website"
    );
    println!("{}", "-".repeat(90));
    for d in dexes {
        println!(
            "{:<8} {:<24} {:<24} {:<10} {}",
            d.id,
            d.name,
            d.slug,
            or_dash(d.status.as_ref()),
            or_dash(d.urls.website.first()),
        );
    }
    println!();
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{}", json);
    Ok(())
}
