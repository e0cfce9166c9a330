//! Identifier fields of backend payloads
//!
//! The backend serializes primary and foreign keys as JSON integers, while
//! older endpoints and navigation parameters carry them as strings. Records
//! keep every identifier as text; these helpers accept either form.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Deserialize a required identifier given as a string or an integer
pub(crate) fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

/// Deserialize a nullable identifier given as a string, an integer or null
pub(crate) fn opt_string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(RawId::into_string))
}
