//! Reusable field validators
//!
//! A validator inspects one (already filtered) field value and returns the
//! message to display under the input when it is rejected. Validators other
//! than [`required`] let null values through, so optional fields only get
//! checked when the user typed something.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Validator: field must be present and non-empty
pub fn required(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value {
        Value::Null => Err(message.to_string()),
        Value::String(s) if s.is_empty() => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: string must have at least `min` characters
pub fn min_length(
    min: usize,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if s.chars().count() < min {
                return Err(message.to_string());
            }
        }
        Ok(())
    }
}

/// Validator: number must not be below `min`
pub fn min_value(
    min: f64,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num < min {
                return Err(message.to_string());
            }
        }
        Ok(())
    }
}

/// Validator: number must not exceed `max`
pub fn max_value(
    max: f64,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num > max {
                return Err(message.to_string());
            }
        }
        Ok(())
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.contains(&s) {
                return Err(message.to_string());
            }
        }
        Ok(())
    }
}

/// Validator: string must look like an email address
pub fn email(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !is_valid_email(s) {
                return Err(message.to_string());
            }
        }
        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    });
    regex.is_match(email)
}
