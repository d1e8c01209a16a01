use crate::error::{MarketError, Result};
use std::fmt;
use std::str::FromStr;

/// Implements `as_str`, `Display` and a validating `FromStr` for an enum of
/// fixed query-parameter values.
macro_rules! query_enum {
    ($name:ident, $what:literal, { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = MarketError;

            fn from_str(s: &str) -> Result<Self> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let allowed: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        MarketError::Validation(format!(
                            "invalid {}: '{}' (expected one of: {})",
                            $what,
                            s,
                            allowed.join(", ")
                        ))
                    })
            }
        }
    };
}

/// Sort key for the latest-listings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    MarketCap,
    MarketCapStrict,
    Name,
    Symbol,
    DateAdded,
    Price,
    CirculatingSupply,
    TotalSupply,
    MaxSupply,
    NumMarketPairs,
    MarketCapByTotalSupplyStrict,
    Volume24h,
    Volume7d,
    Volume30d,
    PercentChange1h,
    PercentChange24h,
    PercentChange7d,
}

query_enum!(SortBy, "sort field", {
    MarketCap => "market_cap",
    MarketCapStrict => "market_cap_strict",
    Name => "name",
    Symbol => "symbol",
    DateAdded => "date_added",
    Price => "price",
    CirculatingSupply => "circulating_supply",
    TotalSupply => "total_supply",
    MaxSupply => "max_supply",
    NumMarketPairs => "num_market_pairs",
    MarketCapByTotalSupplyStrict => "market_cap_by_total_supply_strict",
    Volume24h => "volume_24h",
    Volume7d => "volume_7d",
    Volume30d => "volume_30d",
    PercentChange1h => "percent_change_1h",
    PercentChange24h => "percent_change_24h",
    PercentChange7d => "percent_change_7d",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

query_enum!(SortDirection, "sort direction", {
    Asc => "asc",
    Desc => "desc",
});

/// `listing_status` filter for the token directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
    Untracked,
}

query_enum!(ListingStatus, "listing status", {
    Active => "active",
    Inactive => "inactive",
    Untracked => "untracked",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectorySort {
    #[default]
    Id,
    CmcRank,
}

query_enum!(DirectorySort, "directory sort", {
    Id => "id",
    CmcRank => "cmc_rank",
});

/// Optional blocks the DEX info endpoint only returns on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexAuxField {
    Urls,
    Logo,
    Description,
    DateLaunched,
    Notice,
}

query_enum!(DexAuxField, "DEX aux field", {
    Urls => "urls",
    Logo => "logo",
    Description => "description",
    DateLaunched => "date_launched",
    Notice => "notice",
});

/// Sampling interval of the historical-quotes endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    M5,
    M10,
    M15,
    M30,
    M45,
    H1,
    H2,
    H3,
    H4,
    H6,
    H12,
    #[default]
    H24,
    D1,
    D2,
    D3,
    D7,
    D14,
    D15,
    D30,
    D60,
    D90,
    D365,
}

query_enum!(Interval, "interval", {
    Hourly => "hourly",
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Yearly => "yearly",
    M5 => "5m",
    M10 => "10m",
    M15 => "15m",
    M30 => "30m",
    M45 => "45m",
    H1 => "1h",
    H2 => "2h",
    H3 => "3h",
    H4 => "4h",
    H6 => "6h",
    H12 => "12h",
    H24 => "24h",
    D1 => "1d",
    D2 => "2d",
    D3 => "3d",
    D7 => "7d",
    D14 => "14d",
    D15 => "15d",
    D30 => "30d",
    D60 => "60d",
    D90 => "90d",
    D365 => "365d",
});

impl Interval {
    /// Calendar intervals snap to period boundaries rather than a fixed step.
    pub fn is_calendar(&self) -> bool {
        matches!(
            self,
            Interval::Hourly | Interval::Daily | Interval::Weekly | Interval::Monthly | Interval::Yearly
        )
    }
}

pub const MAX_LISTING_LIMIT: u32 = 5000;
pub const MAX_HISTORICAL_CONVERT: usize = 3;

/// `start` is 1-based; `limit` is capped by the API.
pub fn validate_page(start: u32, limit: u32) -> Result<()> {
    if start == 0 {
        return Err(MarketError::Validation(
            "start must be 1 or greater".to_string(),
        ));
    }
    if limit == 0 || limit > MAX_LISTING_LIMIT {
        return Err(MarketError::Validation(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LISTING_LIMIT, limit
        )));
    }
    Ok(())
}

/// Joins values into the comma list the API expects, or `None` when empty.
pub fn comma_list<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined: Vec<String> = values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_direction_accepts_only_asc_and_desc() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        let err = "up".parse::<SortDirection>().unwrap_err();
        assert!(matches!(err, MarketError::Validation(ref m) if m.contains("asc, desc")));
    }

    #[test]
    fn intervals() {
        for ok in ["hourly", "yearly", "5m", "24h", "365d"] {
            assert!(ok.parse::<Interval>().is_ok(), "{}", ok);
        }
        for bad in ["3x", "", "1w", "DAILY"] {
            assert!(matches!(
                bad.parse::<Interval>(),
                Err(MarketError::Validation(_))
            ));
        }
        assert!(Interval::Weekly.is_calendar());
        assert!(!Interval::D7.is_calendar());
        assert_eq!(Interval::default().to_string(), "24h");
    }

    #[test]
    fn page_bounds() {
        assert!(validate_page(1, 100).is_ok());
        assert!(validate_page(0, 100).is_err());
        assert!(validate_page(1, 0).is_err());
        assert!(validate_page(1, MAX_LISTING_LIMIT + 1).is_err());
    }

    #[test]
    fn comma_lists_skip_blanks() {
        assert_eq!(comma_list(["USD", " EUR ", ""]), Some("USD,EUR".to_string()));
        assert_eq!(comma_list(Vec::<String>::new()), None);
    }
}
