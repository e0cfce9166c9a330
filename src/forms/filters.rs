//! Reusable field filters
//!
//! These filters normalize raw form input before validation

use anyhow::{Result, anyhow};
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: turn an empty string into null
pub fn empty_to_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) if s.is_empty() => Ok(Value::Null),
        other => Ok(other),
    }
}

/// Filter: parse a numeric string into an integer
///
/// Numbers pass through when they are integral. Anything else is rejected
/// with `message`.
pub fn to_integer(
    message: &'static str,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| match &value {
        Value::Null => Ok(value),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(|n| json!(n))
            .map_err(|_| anyhow!(message)),
        _ => Err(anyhow!(message)),
    }
}
