//! Reading filter sets written in the typed camelCase schema.
//!
//! This is the shape of the URL parameter and of `graphql_` saved filters:
//! `{"starred": true, "status": ["PARTNER_FINANCIAL"], "donationDate": {"min": "2020-01-01"}}`.
//! Values are read according to the field table. A string where another
//! shape is expected is coerced like a persisted value; any other mismatch
//! drops the field.

use mpdx_model::{
    ActiveFilterSet, CoercionOptions, DateRange, EnumKind, FieldKind, FieldTable, FilterField,
    FilterValue, NewsletterFilter, NumericRange, StatusFilter,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce::{coerce_value_with, parse_date_bound, parse_numeric_bound};
use crate::labels::{LabelledEnum, resolve_or_fallback};

/// Reads one typed value for `field`.
pub fn value_from_json(
    field: &FilterField,
    value: &Value,
    options: &CoercionOptions,
) -> Option<FilterValue> {
    if let Value::String(text) = value {
        if field.kind != FieldKind::ScalarString {
            return Some(coerce_value_with(field, text, options));
        }
    }
    let typed = match (field.kind, value) {
        (FieldKind::Boolean, Value::Bool(flag)) => Some(FilterValue::Boolean(*flag)),
        (FieldKind::DateRange, Value::Object(bounds)) => {
            let bound = |name: &str| {
                bounds
                    .get(name)
                    .and_then(Value::as_str)
                    .and_then(|s| parse_date_bound(field.key, s))
            };
            Some(FilterValue::DateRange(DateRange::new(
                bound("min"),
                bound("max"),
            )))
        }
        (FieldKind::EnumSet(EnumKind::Status), Value::Array(items)) => Some(
            FilterValue::Statuses(enum_items::<StatusFilter>(items, options)),
        ),
        (FieldKind::EnumSet(EnumKind::Newsletter), Value::Array(items)) => Some(
            FilterValue::Newsletters(enum_items::<NewsletterFilter>(items, options)),
        ),
        (FieldKind::StringArray, Value::Array(items)) => Some(FilterValue::Strings(
            items.iter().filter_map(scalar_text).collect(),
        )),
        (FieldKind::ScalarString, Value::String(text)) => Some(FilterValue::Text(text.clone())),
        (FieldKind::ScalarString, Value::Number(number)) => {
            Some(FilterValue::Text(number.to_string()))
        }
        (FieldKind::NumericRange, Value::Object(bounds)) => {
            let bound = |name: &str| match bounds.get(name) {
                Some(Value::Number(number)) => number.as_f64().filter(|n| n.is_finite()),
                Some(Value::String(text)) => parse_numeric_bound(field.key, text),
                _ => None,
            };
            Some(FilterValue::NumericRange(NumericRange::new(
                bound("min"),
                bound("max"),
            )))
        }
        _ => None,
    };
    if typed.is_none() {
        debug!(key = field.key, kind = %field.kind, "dropping filter value of unexpected shape");
    }
    typed
}

/// Reads a whole filter object. Unknown keys are ignored; a non-object
/// yields an empty set.
pub fn set_from_json(table: FieldTable, value: &Value, options: &CoercionOptions) -> ActiveFilterSet {
    match value {
        Value::Object(map) => set_from_map(table, map, options),
        _ => {
            debug!("filter JSON is not an object");
            ActiveFilterSet::new()
        }
    }
}

/// Reads a filter object already split into a JSON map.
pub fn set_from_map(
    table: FieldTable,
    map: &Map<String, Value>,
    options: &CoercionOptions,
) -> ActiveFilterSet {
    let mut set = ActiveFilterSet::new();
    for (name, value) in map {
        let Some(key) = table.key(name) else {
            debug!(key = name.as_str(), page = %table.page(), "dropping unknown filter key");
            continue;
        };
        if let Some(typed) = value_from_json(key.field(), value, options) {
            set.set(key, typed);
        }
    }
    set
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn enum_items<E: LabelledEnum + PartialEq>(items: &[Value], options: &CoercionOptions) -> Vec<E> {
    let mut values: Vec<E> = Vec::new();
    for text in items.iter().filter_map(Value::as_str) {
        let value = resolve_or_fallback::<E>(text, options);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}
