//! Forgiving field deserializers for collector snapshots.
//!
//! Collectors scrape third-party pages, so a field may arrive as `null`,
//! as a string, or as a float where a count is expected. None of that
//! should reject the whole snapshot: the affected field falls back to
//! zero (or empty, or absent) and a warning is logged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

fn malformed(expected: &str, value: &Value) {
    tracing::warn!(expected, found = %value, "malformed snapshot field treated as empty");
}

fn as_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float as i64)
        }),
        _ => None,
    }
}

pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_count(&value).unwrap_or_else(|| {
        malformed("integer", &value);
        0
    }))
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or_else(|| {
        malformed("number", &value);
        0.0
    }))
}

pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    let parsed = as_count(&value);
    if parsed.is_none() {
        malformed("integer", &value);
    }
    Ok(parsed)
}

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    let parsed = value.as_f64();
    if parsed.is_none() {
        malformed("number", &value);
    }
    Ok(parsed)
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => {
            malformed("string", &other);
            Ok(String::new())
        }
    }
}

/// Numeric series; non-numeric samples count as 0 so positions are kept.
pub fn numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = array(Value::deserialize(deserializer)?);
    Ok(items
        .iter()
        .map(|item| {
            item.as_f64().unwrap_or_else(|| {
                malformed("number", item);
                0.0
            })
        })
        .collect())
}

pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = array(Value::deserialize(deserializer)?);
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            other => {
                malformed("string", &other);
                None
            }
        })
        .collect())
}

/// List of records; entries that do not parse are dropped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = array(Value::deserialize(deserializer)?);
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                malformed("object", &item);
                None
            }
        })
        .collect())
}

/// Optional category record. A value that is not a record at all leaves
/// the category absent.
pub fn category<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(_) => {
            malformed("object", &value);
            Ok(None)
        }
    }
}

/// Tool category -> tool names. A bare string is one tool; anything else
/// that is not a string is skipped.
pub fn tool_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, BTreeSet<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            malformed("object", &other);
            return Ok(BTreeMap::new());
        }
    };
    let mut tools = BTreeMap::new();
    for (category, value) in entries {
        let names = match value {
            Value::String(name) => BTreeSet::from([name]),
            other => array(other)
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(name) => Some(name),
                    other => {
                        malformed("string", &other);
                        None
                    }
                })
                .collect(),
        };
        tools.insert(category, names);
    }
    Ok(tools)
}

fn array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            malformed("array", &other);
            Vec::new()
        }
    }
}
