//! Deserializers for free-text request fields.
//!
//! Surrounding whitespace is stripped before validation runs, so a value made of
//! blanks fails the same `length(min = 1)` rule as an empty one.

use serde::{Deserialize, Deserializer};

pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()))
}
