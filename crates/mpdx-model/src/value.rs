//! Typed filter values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{NewsletterFilter, StatusFilter};
use crate::fields::{EnumKind, FieldKind};

/// Inclusive date bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        Self { min, max }
    }

    /// True when neither bound is set.
    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Inclusive numeric bounds. Either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// A coerced filter value.
///
/// Serializes without a tag, in the shape the list query expects for the
/// field: a bare boolean, a `{min, max}` object, an array, or a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    DateRange(DateRange),
    Statuses(Vec<StatusFilter>),
    Newsletters(Vec<NewsletterFilter>),
    Strings(Vec<String>),
    Text(String),
    NumericRange(NumericRange),
}

impl FilterValue {
    /// Empty values are never stored in a filter set.
    ///
    /// Booleans are never empty: `false` is a meaningful filter.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Boolean(_) => false,
            FilterValue::DateRange(range) => range.is_open(),
            FilterValue::Statuses(values) => values.is_empty(),
            FilterValue::Newsletters(values) => values.is_empty(),
            FilterValue::Strings(values) => values.is_empty(),
            FilterValue::Text(text) => text.is_empty(),
            FilterValue::NumericRange(range) => range.is_open(),
        }
    }

    /// Whether this value has the shape a field of `kind` holds.
    pub fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FilterValue::Boolean(_), FieldKind::Boolean)
                | (FilterValue::DateRange(_), FieldKind::DateRange)
                | (
                    FilterValue::Statuses(_),
                    FieldKind::EnumSet(EnumKind::Status)
                )
                | (
                    FilterValue::Newsletters(_),
                    FieldKind::EnumSet(EnumKind::Newsletter)
                )
                | (FilterValue::Strings(_), FieldKind::StringArray)
                | (FilterValue::Text(_), FieldKind::ScalarString)
                | (FilterValue::NumericRange(_), FieldKind::NumericRange)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            FilterValue::Strings(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Short human-readable rendering, used by tables and log fields.
    pub fn display(&self) -> String {
        fn bounds<T: ToString>(min: Option<T>, max: Option<T>) -> String {
            let min = min.map(|v| v.to_string()).unwrap_or_default();
            let max = max.map(|v| v.to_string()).unwrap_or_default();
            format!("{min}..{max}")
        }
        match self {
            FilterValue::Boolean(value) => value.to_string(),
            FilterValue::DateRange(range) => bounds(range.min, range.max),
            FilterValue::Statuses(values) => join(values.iter().map(StatusFilter::as_str)),
            FilterValue::Newsletters(values) => {
                join(values.iter().map(NewsletterFilter::as_str))
            }
            FilterValue::Strings(values) => join(values.iter().map(String::as_str)),
            FilterValue::Text(text) => text.clone(),
            FilterValue::NumericRange(range) => bounds(range.min, range.max),
        }
    }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

impl From<DateRange> for FilterValue {
    fn from(value: DateRange) -> Self {
        FilterValue::DateRange(value)
    }
}

impl From<NumericRange> for FilterValue {
    fn from(value: NumericRange) -> Self {
        FilterValue::NumericRange(value)
    }
}

impl From<Vec<StatusFilter>> for FilterValue {
    fn from(value: Vec<StatusFilter>) -> Self {
        FilterValue::Statuses(value)
    }
}

impl From<Vec<NewsletterFilter>> for FilterValue {
    fn from(value: Vec<NewsletterFilter>) -> Self {
        FilterValue::Newsletters(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::Strings(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}
