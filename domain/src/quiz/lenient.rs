//! Forgiving field decoders for model-emitted quiz JSON.
//!
//! Every decoder accepts any JSON value. Shapes it does not expect are mapped
//! to something the validator reports on, so one drifted field never rejects
//! the whole reply.

use super::question::{CorrectAnswer, GeneratedQuestion, QuestionId};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// `3` and `3.0` are both whole; `-1` and `2.5` are not.
fn whole_number(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => whole_number(&n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn id<'de, D>(deserializer: D) -> Result<Option<QuestionId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(match whole_number(&n) {
            Some(n) => QuestionId::Number(n),
            None => QuestionId::Text(n.to_string()),
        }),
        other => scalar_text(other).map(QuestionId::Text),
    })
}

/// A list becomes a map keyed `1`, `2`, ... so the validator flags its keys
/// or count; any other scalar becomes an empty map.
pub(crate) fn options<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Object(map) => Some(
            map.into_iter()
                .map(|(key, value)| (key, scalar_text(value).unwrap_or_default()))
                .collect(),
        ),
        Value::Array(items) => Some(
            items
                .into_iter()
                .enumerate()
                .map(|(i, value)| ((i + 1).to_string(), scalar_text(value).unwrap_or_default()))
                .collect(),
        ),
        _ => Some(BTreeMap::new()),
    })
}

pub(crate) fn correct_answer<'de, D>(deserializer: D) -> Result<Option<CorrectAnswer>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(CorrectAnswer::Multiple(
            items.into_iter().filter_map(scalar_text).collect(),
        )),
        other => scalar_text(other).map(CorrectAnswer::Single),
    })
}

/// Items that are not objects decode as empty questions; a non-list decodes
/// as no questions.
pub(crate) fn questions<'de, D>(deserializer: D) -> Result<Vec<GeneratedQuestion>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}
