use crate::error::{MarketError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Typed view over one JSON object.
///
/// Required accessors fail with `Schema` when the key is absent or null and
/// with `Format` when it has the wrong type. Optional accessors treat an
/// absent key and an explicit `null` alike. Keys nobody asks for are ignored.
#[derive(Clone, Copy)]
pub(crate) struct Fields<'a> {
    record: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(record: &'static str, value: &'a Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            MarketError::Schema(format!("{} payload is not a JSON object", record))
        })?;
        Ok(Self { record, map })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value> {
        self.get(key)
            .ok_or_else(|| MarketError::missing(self.record, key))
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn i64(&self, key: &str) -> Result<i64> {
        as_i64(key, self.require(key)?)
    }

    pub fn f64(&self, key: &str) -> Result<f64> {
        as_f64(key, self.require(key)?)
    }

    pub fn string(&self, key: &str) -> Result<String> {
        as_str(key, self.require(key)?).map(str::to_string)
    }

    pub fn timestamp(&self, key: &str) -> Result<DateTime<Utc>> {
        parse_timestamp(key, as_str(key, self.require(key)?)?)
    }

    pub fn object(&self, key: &str) -> Result<&'a Map<String, Value>> {
        let value = self.require(key)?;
        value
            .as_object()
            .ok_or_else(|| MarketError::format(key, format!("expected object, got {}", value)))
    }

    pub fn array(&self, key: &str) -> Result<&'a Vec<Value>> {
        let value = self.require(key)?;
        value
            .as_array()
            .ok_or_else(|| MarketError::format(key, format!("expected array, got {}", value)))
    }

    pub fn opt_i64(&self, key: &str) -> Result<Option<i64>> {
        self.get(key).map(|v| as_i64(key, v)).transpose()
    }

    pub fn opt_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get(key).map(|v| as_f64(key, v)).transpose()
    }

    /// Numeric aggregates that read as zero when the endpoint omits them.
    pub fn f64_or_zero(&self, key: &str) -> Result<f64> {
        Ok(self.opt_f64(key)?.unwrap_or(0.0))
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
            .map(|v| as_str(key, v).map(str::to_string))
            .transpose()
    }

    pub fn opt_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        self.get(key)
            .map(|v| as_str(key, v).and_then(|s| parse_timestamp(key, s)))
            .transpose()
    }

    pub fn opt_flag(&self, key: &str) -> Result<Option<bool>> {
        self.get(key).map(|v| as_flag(key, v)).transpose()
    }

    pub fn opt_strings(&self, key: &str) -> Result<Option<Vec<String>>> {
        self.get(key).map(|v| as_strings(key, v)).transpose()
    }

    /// Epoch seconds given either as an integer or as an ISO-8601 string.
    pub fn opt_epoch(&self, key: &str) -> Result<Option<i64>> {
        self.get(key)
            .map(|v| match v {
                Value::String(s) => parse_timestamp(key, s).map(|t| t.timestamp()),
                other => as_i64(key, other),
            })
            .transpose()
    }

    pub fn opt_decode<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|v| {
                serde_json::from_value(v.clone()).map_err(|e| MarketError::format(key, e.to_string()))
            })
            .transpose()
    }
}

fn as_i64(key: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| MarketError::format(key, format!("expected integer, got {}", value)))
}

fn as_f64(key: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| MarketError::format(key, format!("expected number, got {}", value)))
}

fn as_str<'v>(key: &str, value: &'v Value) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| MarketError::format(key, format!("expected string, got {}", value)))
}

/// Integer 0/1 flags are coerced; JSON booleans pass through.
fn as_flag(key: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(MarketError::format(key, format!("expected 0 or 1, got {}", n))),
        },
        other => Err(MarketError::format(
            key,
            format!("expected boolean flag, got {}", other),
        )),
    }
}

fn as_strings(key: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| MarketError::format(key, format!("expected array, got {}", value)))?;
    items
        .iter()
        .map(|item| as_str(key, item).map(str::to_string))
        .collect()
}

/// Accepts RFC 3339 (`2024-01-01T00:00:00.000Z`) and offset-less ISO-8601,
/// which is read as UTC.
fn parse_timestamp(key: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|t| t.and_utc())
        })
        .map_err(|e| {
            MarketError::format(key, format!("'{}' is not an ISO-8601 timestamp: {}", raw, e))
        })
}
