//! Field decoders for processor payloads.
//!
//! A processor field with an unexpected type, a `null`, or an empty string
//! decodes as `None` instead of failing the whole body.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-empty string, or `None`
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

/// Integer, or `None`
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_i64))
}
