//! Synchronizing the active filter set with the page URL.
//!
//! The set travels as one query-string parameter holding percent-encoded
//! JSON in the typed camelCase schema:
//!
//! ```text
//! ?page=2&filters=%7B%22starred%22:true%7D
//! ```
//!
//! Reading the URL never fails. A missing parameter or an undecodable value
//! yields an empty set.

use std::borrow::Cow;

use mpdx_model::{ActiveFilterSet, CoercionOptions, FieldTable, FilterConfig};
use mpdx_normalization::set_from_json;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tracing::{debug, warn};

/// Bytes `encodeURI` escapes, in addition to all non-ASCII bytes.
const ENCODE_URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// `encodeURI` plus the bytes that delimit query-string pairs.
const QUERY_VALUE: &AsciiSet = &ENCODE_URI.add(b'&').add(b'=').add(b'#').add(b'+');

/// Encodes a filter set as a query-string value.
///
/// Returns `None` for an empty set, which is never written to the URL.
pub fn encode_filters(filters: &ActiveFilterSet) -> Option<String> {
    if filters.is_empty() {
        return None;
    }
    match serde_json::to_string(filters) {
        Ok(json) => Some(utf8_percent_encode(&json, QUERY_VALUE).to_string()),
        Err(error) => {
            warn!(%error, "failed to serialize filters");
            None
        }
    }
}

/// Decodes a query-string value into a filter set.
pub fn decode_filters(
    table: FieldTable,
    encoded: &str,
    options: &CoercionOptions,
) -> ActiveFilterSet {
    let decoded = match percent_decode_str(encoded).decode_utf8() {
        Ok(decoded) => decoded,
        Err(error) => {
            warn!(%error, "filter parameter is not valid UTF-8");
            return ActiveFilterSet::new();
        }
    };
    match serde_json::from_str::<serde_json::Value>(&decoded) {
        Ok(value) => set_from_json(table, &value, options),
        Err(error) => {
            warn!(%error, "filter parameter is not valid JSON");
            ActiveFilterSet::new()
        }
    }
}

/// Returns the raw value of the first `name` parameter in `query`.
///
/// A leading `?` is ignored. A parameter without `=` has an empty value.
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    pairs(query).find_map(|(key, value)| (key == name).then_some(value))
}

/// Reads the filter set from the `param` parameter of `query`.
pub fn read_query(
    query: &str,
    param: &str,
    table: FieldTable,
    options: &CoercionOptions,
) -> ActiveFilterSet {
    match query_param(query, param) {
        Some(encoded) => decode_filters(table, encoded, options),
        None => ActiveFilterSet::new(),
    }
}

/// Rewrites the `param` parameter of `query` to hold `filters`.
///
/// Other parameters keep their text and order, and a leading `?` is kept.
/// The filter parameter stays where it was or is appended, and is dropped
/// when the set is empty. Duplicate filter parameters collapse into one.
pub fn write_query(query: &str, param: &str, filters: &ActiveFilterSet) -> String {
    let (prefix, body) = match query.strip_prefix('?') {
        Some(body) => ("?", body),
        None => ("", query),
    };
    let encoded = encode_filters(filters);
    let mut written = false;
    let mut parts: Vec<String> = Vec::new();

    for part in body.split('&').filter(|part| !part.is_empty()) {
        let key = part.split_once('=').map_or(part, |(key, _)| key);
        if param_name(key) != param {
            parts.push(part.to_string());
            continue;
        }
        if let (false, Some(value)) = (written, &encoded) {
            parts.push(format!("{param}={value}"));
        }
        written = true;
    }
    if let (false, Some(value)) = (written, &encoded) {
        parts.push(format!("{param}={value}"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("{prefix}{}", parts.join("&"))
    }
}

fn pairs(query: &str) -> impl Iterator<Item = (Cow<'_, str>, &str)> {
    let body = query.strip_prefix('?').unwrap_or(query);
    body.split('&')
        .filter(|part| !part.is_empty())
        .map(|part| part.split_once('=').unwrap_or((part, "")))
        .map(|(key, value)| (param_name(key), value))
}

/// Parameter names compare after percent-decoding.
fn param_name(key: &str) -> Cow<'_, str> {
    percent_decode_str(key).decode_utf8_lossy()
}

/// The URL side of a page: the current query string and how filters are
/// encoded in it.
#[derive(Debug, Clone)]
pub struct UrlSynchronizer {
    param: String,
    table: FieldTable,
    coercion: CoercionOptions,
    query: String,
}

impl UrlSynchronizer {
    pub fn new(table: FieldTable, config: &FilterConfig) -> Self {
        Self {
            param: config.url.param.clone(),
            table,
            coercion: config.coercion.clone(),
            query: String::new(),
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Encoded filter parameter of the current query, if any.
    pub fn encoded(&self) -> Option<&str> {
        query_param(&self.query, &self.param)
    }

    /// Adopts `query` as the page URL and derives the filter set from it.
    pub fn load(&mut self, query: &str) -> ActiveFilterSet {
        self.query = query.to_string();
        let filters = read_query(query, &self.param, self.table, &self.coercion);
        debug!(param = %self.param, active = filters.len(), "read filters from URL");
        filters
    }

    /// Writes `filters` into the current query. Returns whether the query
    /// changed.
    pub fn sync(&mut self, filters: &ActiveFilterSet) -> bool {
        let query = write_query(&self.query, &self.param, filters);
        if query == self.query {
            return false;
        }
        self.query = query;
        true
    }
}
