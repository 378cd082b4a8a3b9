//! Value coercion from persisted strings to typed filter values.
//!
//! Coercion never fails: malformed bounds become open bounds and unknown
//! enum labels become the enum's fallback value. A value that coerces to
//! something empty is simply not stored by the filter set.

use chrono::{DateTime, NaiveDate};
use mpdx_model::{
    CoercionOptions, EnumKind, FieldKey, FieldKind, FieldTable, FilterField, FilterValue,
    NewsletterFilter, StatusFilter,
};
use tracing::debug;

use crate::labels::{LabelledEnum, resolve_or_fallback};

/// Separator between the bounds of a range value.
pub const RANGE_DELIMITER: &str = "..";

/// Separator between the items of a list value.
pub const LIST_DELIMITER: char = ',';

/// Coerces a raw string for `field` using default options.
pub fn coerce_value(field: &FilterField, raw: &str) -> FilterValue {
    coerce_value_with(field, raw, &CoercionOptions::default())
}

/// Coerces a raw string for `field`.
pub fn coerce_value_with(field: &FilterField, raw: &str, options: &CoercionOptions) -> FilterValue {
    match field.kind {
        FieldKind::Boolean => FilterValue::Boolean(raw == "true"),
        FieldKind::DateRange => {
            let (min, max) = range_segments(raw);
            FilterValue::DateRange(mpdx_model::DateRange::new(
                min.and_then(|s| parse_date_bound(field.key, s)),
                max.and_then(|s| parse_date_bound(field.key, s)),
            ))
        }
        FieldKind::EnumSet(EnumKind::Status) => {
            FilterValue::Statuses(enum_set::<StatusFilter>(raw, options))
        }
        FieldKind::EnumSet(EnumKind::Newsletter) => {
            FilterValue::Newsletters(enum_set::<NewsletterFilter>(raw, options))
        }
        FieldKind::StringArray => FilterValue::Strings(
            raw.split(LIST_DELIMITER)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        FieldKind::ScalarString => FilterValue::Text(raw.to_string()),
        FieldKind::NumericRange => {
            let (min, max) = range_segments(raw);
            FilterValue::NumericRange(mpdx_model::NumericRange::new(
                min.and_then(|s| parse_numeric_bound(field.key, s)),
                max.and_then(|s| parse_numeric_bound(field.key, s)),
            ))
        }
    }
}

/// Looks up `key` in `table` and coerces `raw` for it.
///
/// Returns `None` for keys the table does not know.
pub fn coerce(
    table: FieldTable,
    key: &str,
    raw: &str,
    options: &CoercionOptions,
) -> Option<(FieldKey, FilterValue)> {
    let Some(field) = table.key(key) else {
        debug!(key, page = %table.page(), "dropping unknown filter key");
        return None;
    };
    Some((field, coerce_value_with(field.field(), raw, options)))
}

/// Splits a range into its first two segments.
fn range_segments(raw: &str) -> (Option<&str>, Option<&str>) {
    let mut segments = raw.split(RANGE_DELIMITER);
    (segments.next(), segments.next())
}

/// Parses one date bound: `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date_bound(key: &str, segment: &str) -> Option<NaiveDate> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    debug!(key, segment = trimmed, "ignoring malformed date bound");
    None
}

/// Parses one numeric bound. Non-finite values are treated as malformed.
pub fn parse_numeric_bound(key: &str, segment: &str) -> Option<f64> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            debug!(key, segment = trimmed, "ignoring malformed numeric bound");
            None
        }
    }
}

/// Splits a comma-joined label list and resolves every token, keeping the
/// first occurrence of each value.
fn enum_set<E: LabelledEnum + PartialEq>(raw: &str, options: &CoercionOptions) -> Vec<E> {
    let mut values: Vec<E> = Vec::new();
    for token in raw.split(LIST_DELIMITER) {
        if token.trim().is_empty() {
            continue;
        }
        let value = resolve_or_fallback::<E>(token, options);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpdx_model::{DateRange, NumericRange};

    fn field(key: &str) -> &'static FilterField {
        FieldTable::contacts().get(key).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_boolean() {
        assert_eq!(coerce_value(field("starred"), "true"), FilterValue::Boolean(true));
        assert_eq!(coerce_value(field("starred"), "false"), FilterValue::Boolean(false));
        assert_eq!(coerce_value(field("reverseCity"), "yes"), FilterValue::Boolean(false));
        assert_eq!(coerce_value(field("pledgeReceived"), ""), FilterValue::Boolean(false));
    }

    #[test]
    fn test_boolean_requires_exact_true() {
        assert_eq!(coerce_value(field("starred"), " true"), FilterValue::Boolean(false));
        assert_eq!(coerce_value(field("starred"), "True"), FilterValue::Boolean(false));
        assert_eq!(coerce_value(field("starred"), "true "), FilterValue::Boolean(false));
    }

    #[test]
    fn test_date_range() {
        assert_eq!(
            coerce_value(field("donationDate"), "2020-01-01..2020-02-01"),
            FilterValue::DateRange(DateRange::new(date(2020, 1, 1), date(2020, 2, 1)))
        );
        assert_eq!(
            coerce_value(field("birthday"), "2020-01-01"),
            FilterValue::DateRange(DateRange::new(date(2020, 1, 1), None))
        );
        assert_eq!(
            coerce_value(field("nextAsk"), "..2021-12-31"),
            FilterValue::DateRange(DateRange::new(None, date(2021, 12, 31)))
        );
    }

    #[test]
    fn test_date_range_accepts_timestamps() {
        assert_eq!(
            coerce_value(field("updatedAt"), "2020-03-01T00:00:00Z..2020-03-31T23:59:59Z"),
            FilterValue::DateRange(DateRange::new(date(2020, 3, 1), date(2020, 3, 31)))
        );
    }

    #[test]
    fn test_malformed_date_bounds_are_open() {
        assert_eq!(
            coerce_value(field("donationDate"), "yesterday..2020-02-01"),
            FilterValue::DateRange(DateRange::new(None, date(2020, 2, 1)))
        );
        assert!(coerce_value(field("donationDate"), "soon..later").is_empty());
        assert!(coerce_value(field("donationDate"), "2020-13-45").is_empty());
    }

    #[test]
    fn test_status_set() {
        assert_eq!(
            coerce_value(field("status"), "Partner - Financial,Never Ask"),
            FilterValue::Statuses(vec![StatusFilter::PartnerFinancial, StatusFilter::NeverAsk])
        );
    }

    #[test]
    fn test_unknown_status_uses_fallback_once() {
        assert_eq!(
            coerce_value(field("status"), "Retired,Partner - Pray,Gone"),
            FilterValue::Statuses(vec![StatusFilter::Null, StatusFilter::PartnerPray])
        );
    }

    #[test]
    fn test_newsletter_set() {
        assert_eq!(
            coerce_value(field("newsletter"), "email,address"),
            FilterValue::Newsletters(vec![NewsletterFilter::Email, NewsletterFilter::Physical])
        );
    }

    #[test]
    fn test_string_array_is_verbatim() {
        assert_eq!(
            coerce_value(field("tags"), "monthly, major donor,,x"),
            FilterValue::Strings(vec![
                "monthly".to_string(),
                " major donor".to_string(),
                "x".to_string()
            ])
        );
        assert!(coerce_value(field("pledgeCurrency"), "").is_empty());
    }

    #[test]
    fn test_scalar_passthrough() {
        assert_eq!(
            coerce_value(field("wildcardSearch"), " Smith.."),
            FilterValue::Text(" Smith..".to_string())
        );
    }

    #[test]
    fn test_numeric_range() {
        assert_eq!(
            coerce_value(field("donationAmountRange"), "10..250.5"),
            FilterValue::NumericRange(NumericRange::new(Some(10.0), Some(250.5)))
        );
        assert_eq!(
            coerce_value(field("donationPeriodCount"), "3"),
            FilterValue::NumericRange(NumericRange::new(Some(3.0), None))
        );
        assert!(coerce_value(field("donationPeriodSum"), "NaN..inf").is_empty());
    }

    #[test]
    fn test_coerce_unknown_key() {
        let table = FieldTable::contacts();
        let options = CoercionOptions::default();
        assert!(coerce(table, "favoriteColor", "blue", &options).is_none());
        let (key, value) = coerce(table, "starred", "true", &options).unwrap();
        assert_eq!(key.as_str(), "starred");
        assert_eq!(value, FilterValue::Boolean(true));
    }
}
