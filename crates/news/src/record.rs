use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline shown when a record has none.
pub const UNTITLED: &str = "Untitled";

/// A row as stored in a country news table.
///
/// Every field is kept as raw JSON so a malformed row never fails decoding;
/// [`normalize`] decides what each field means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNewsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub headline: Value,
    #[serde(default)]
    pub link: Value,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Canonical news entry consumed by the panel and modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Convert a stored row into the canonical shape. Never fails.
///
/// - headline: `text`, then `title`, then the first string value; `"Untitled"` if none.
/// - link: `url`, then `href`, then the first string value; omitted if none.
/// - string fields are tried as JSON first and used verbatim if that fails.
pub fn normalize(record: &RawNewsRecord) -> NewsItem {
    let text = flexible_text(&record.headline, &["text", "title"])
        .unwrap_or_else(|| UNTITLED.to_string());
    let url = flexible_text(&record.link, &["url", "href"]);

    let tags = match &record.tags {
        Value::Array(items) => items
            .iter()
            .filter_map(|t| t.as_str())
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let content = record
        .content
        .as_str()
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string);

    NewsItem {
        text,
        url,
        tags,
        content,
        created_at: record.created_at.clone(),
    }
}

fn flexible_text(value: &Value, keys: &[&str]) -> Option<String> {
    match value {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ (Value::Object(_) | Value::Array(_))) => structured_text(&parsed, keys),
            Ok(Value::String(inner)) => non_empty(inner),
            Ok(Value::Null) => None,
            Ok(_) | Err(_) => non_empty(raw.clone()),
        },
        Value::Object(_) | Value::Array(_) => structured_text(value, keys),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
    }
}

fn structured_text(value: &Value, keys: &[&str]) -> Option<String> {
    match value {
        Value::Object(map) => keys
            .iter()
            .filter_map(|k| map.get(*k).and_then(Value::as_str))
            .find(|s| !s.trim().is_empty())
            .or_else(|| map.values().next().and_then(Value::as_str))
            .and_then(|s| non_empty(s.to_string())),
        Value::Array(items) => items
            .first()
            .and_then(Value::as_str)
            .and_then(|s| non_empty(s.to_string())),
        _ => None,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}
