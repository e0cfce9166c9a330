//! Field value types produced by column accessors

use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A comparable scalar extracted from a record for one column
///
/// Accessors only ever produce text, numbers or null. Booleans and nested
/// data are turned into one of these by the accessor (e.g. the video type
/// column derives `"Original"` from two boolean flags).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Build a text value, mapping `None` to null
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => FieldValue::Text(s.to_string()),
            None => FieldValue::Null,
        }
    }

    /// Build a numeric value, mapping `None` to null
    pub fn number<N: Into<f64>>(value: Option<N>) -> Self {
        match value {
            Some(n) => FieldValue::Number(n.into()),
            None => FieldValue::Null,
        }
    }

    /// Parse a numeric identifier such as `"10"`
    ///
    /// Identifiers are held as strings on records but must compare
    /// numerically. Anything that does not parse becomes null.
    pub fn numeric_id(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null)
    }

    /// Get the value as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a number if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Render the value the way it appears in a table cell
    ///
    /// Integral numbers render without a fractional part so that `10.0`
    /// reads (and compares) as `"10"`. Null renders as `None`.
    pub fn render(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(render_number(*n)),
            FieldValue::Null => None,
        }
    }

    /// Exact-match test against a navigation parameter
    ///
    /// Text must be byte-equal. Numbers match when the parameter parses to
    /// the same number. Null never matches.
    pub fn matches_exact(&self, param: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == param,
            FieldValue::Number(n) => param
                .trim()
                .parse::<f64>()
                .map(|p| p == *n)
                .unwrap_or(false),
            FieldValue::Null => false,
        }
    }

    /// Case-insensitive substring test used by free-text search
    ///
    /// `needle` must already be lowercased.
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.render()
            .map(|s| s.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    /// Compare two non-null values
    ///
    /// Numbers compare numerically, text compares case-insensitively in
    /// collation order (so `"Émile"` sorts between `"Adam"` and `"Zoe"`), and
    /// mixed pairs compare by their rendered text. Null handling is the sort
    /// engine's job, so a null here just compares equal to anything.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        self.compare_with(other, &mut Collator::default())
    }

    /// Same as [`FieldValue::compare`], reusing a collator across calls
    pub fn compare_with(&self, other: &FieldValue, collator: &mut Collator) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => compare_folded(collator, a, b),
            (FieldValue::Null, _) | (_, FieldValue::Null) => Ordering::Equal,
            (a, b) => compare_folded(
                collator,
                &a.render().unwrap_or_default(),
                &b.render().unwrap_or_default(),
            ),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "-"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Lowercase both sides, then order them with the Unicode collation algorithm
fn compare_folded(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a.to_lowercase().as_str(), b.to_lowercase().as_str())
}
