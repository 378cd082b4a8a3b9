//! Persisted saved-filter documents.
//!
//! A document is the loosely typed JSON a client wrote when the user saved
//! their filters: snake_case keys, stringified booleans and ranges, and most
//! dimensions nested under `params`.
//!
//! ```json
//! {
//!   "account_list_id": "08bb09d1-3b62-4690-9596-b625b8af4750",
//!   "any_tags": "false",
//!   "tags": "monthly,major donor",
//!   "params": { "starred": "true", "donation_date": "2020-01-01..2020-02-01" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Top-level key holding the nested filter dimensions.
pub const PARAMS_KEY: &str = "params";

/// Reserved top-level keys naming the owning account list.
pub const ACCOUNT_LIST_KEYS: [&str; 2] = ["account_list_id", "accountListId"];

/// A raw JSON value as found in a saved filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    /// Flattens scalars and lists to the comma-joined string form the
    /// coercer reads. Nulls and maps have no string form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null | RawValue::Map(_) => None,
            RawValue::Flag(flag) => Some(flag.to_string()),
            RawValue::Number(number) => Some(number.to_string()),
            RawValue::Text(text) => Some(text.clone()),
            RawValue::List(items) => Some(
                items
                    .iter()
                    .filter_map(RawValue::as_text)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, RawValue>> {
        match self {
            RawValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// A persisted filter document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterDocument {
    entries: BTreeMap<String, RawValue>,
}

impl FilterDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or not a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    /// Builds a document from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(FilterError::InvalidDocument {
                message: format!("expected a JSON object, found {}", json_kind(&value)),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn with_entry(mut self, key: &str, value: impl Into<RawValue>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Adds a string entry under `params`, creating the map if needed.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        let params = self
            .entries
            .entry(PARAMS_KEY.to_string())
            .or_insert_with(|| RawValue::Map(BTreeMap::new()));
        if let RawValue::Map(map) = params {
            map.insert(key.to_string(), RawValue::from(value));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// The nested `params` map, when present and well formed.
    pub fn params(&self) -> Option<&BTreeMap<String, RawValue>> {
        self.entries.get(PARAMS_KEY).and_then(RawValue::as_map)
    }

    /// Owning account list id from either reserved spelling.
    pub fn account_list_id(&self) -> Option<String> {
        ACCOUNT_LIST_KEYS
            .iter()
            .find_map(|key| self.entries.get(*key))
            .and_then(RawValue::as_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_document() {
        let doc = FilterDocument::from_json_str(
            r#"{
                "account_list_id": "abc",
                "any_tags": "false",
                "tags": ["monthly", "major donor"],
                "params": { "starred": "true", "donation_date": "2020-01-01..2020-02-01" }
            }"#,
        )
        .unwrap();

        assert_eq!(doc.account_list_id().as_deref(), Some("abc"));
        assert_eq!(
            doc.get("tags").and_then(RawValue::as_text).as_deref(),
            Some("monthly,major donor")
        );
        let params = doc.params().unwrap();
        assert_eq!(params.get("starred"), Some(&RawValue::Text("true".into())));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = FilterDocument::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, FilterError::InvalidDocument { .. }));
        assert!(err.to_string().contains("an array"));

        let err = FilterDocument::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, FilterError::Json(_)));
    }

    #[test]
    fn test_scalar_text_forms() {
        assert_eq!(RawValue::Flag(true).as_text().as_deref(), Some("true"));
        assert_eq!(RawValue::Number(12.0).as_text().as_deref(), Some("12"));
        assert_eq!(RawValue::Number(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(RawValue::Null.as_text(), None);
    }

    #[test]
    fn test_builder() {
        let doc = FilterDocument::new()
            .with_entry("wildcard_search", "smith")
            .with_param("starred", "true");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.params().map(BTreeMap::len), Some(1));
    }
}
