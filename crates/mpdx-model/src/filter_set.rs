//! The in-memory set of applied filters.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fields::FieldKey;
use crate::value::FilterValue;

/// Strongly typed filters currently applied to a list page.
///
/// A key is present only while its value is non-empty: writing an empty
/// value removes the key. Keys are ordered by name, which keeps the
/// serialized form stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActiveFilterSet {
    values: BTreeMap<FieldKey, FilterValue>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&FilterValue> {
        self.values.get(&key)
    }

    /// Looks up a value by its camelCase key name.
    pub fn get_named(&self, key: &str) -> Option<&FilterValue> {
        self.values
            .iter()
            .find(|(field, _)| field.as_str() == key)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    /// Sets a field, or removes it when `value` is empty.
    ///
    /// Values whose shape does not fit the field are rejected. Returns
    /// whether the set changed.
    pub fn set(&mut self, key: FieldKey, value: FilterValue) -> bool {
        if value.is_empty() {
            return self.remove(key);
        }
        if !value.fits(key.kind()) {
            return false;
        }
        if self.values.get(&key) == Some(&value) {
            return false;
        }
        self.values.insert(key, value);
        true
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: FieldKey, value: impl Into<FilterValue>) -> Self {
        self.set(key, value.into());
        self
    }

    pub fn remove(&mut self, key: FieldKey) -> bool {
        self.values.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FilterValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.values.keys().copied()
    }
}

impl FromIterator<(FieldKey, FilterValue)> for ActiveFilterSet {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FilterValue)>>(iter: I) -> Self {
        let mut set = ActiveFilterSet::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::StatusFilter;
    use crate::fields::FieldTable;

    fn key(name: &str) -> FieldKey {
        FieldTable::contacts().key(name).unwrap()
    }

    #[test]
    fn test_empty_value_removes_key() {
        let mut set = ActiveFilterSet::new().with(key("tags"), vec!["monthly".to_string()]);
        assert!(set.contains(key("tags")));

        assert!(set.set(key("tags"), FilterValue::Strings(vec![])));
        assert!(!set.contains(key("tags")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_value_on_missing_key_is_noop() {
        let mut set = ActiveFilterSet::new();
        assert!(!set.set(key("wildcardSearch"), FilterValue::Text(String::new())));
        assert!(set.is_empty());
    }

    #[test]
    fn test_mismatched_shape_is_rejected() {
        let mut set = ActiveFilterSet::new();
        assert!(!set.set(key("starred"), FilterValue::Text("yes".to_string())));
        assert!(set.is_empty());
    }

    #[test]
    fn test_same_value_reports_no_change() {
        let mut set = ActiveFilterSet::new();
        assert!(set.set(key("starred"), FilterValue::Boolean(true)));
        assert!(!set.set(key("starred"), FilterValue::Boolean(true)));
        assert!(set.set(key("starred"), FilterValue::Boolean(false)));
        assert_eq!(set.get_named("starred"), Some(&FilterValue::Boolean(false)));
    }

    #[test]
    fn test_serializes_in_key_order() {
        let set = ActiveFilterSet::new()
            .with(key("status"), vec![StatusFilter::PartnerFinancial])
            .with(key("starred"), true)
            .with(key("appeal"), vec!["a1".to_string()]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"appeal":["a1"],"starred":true,"status":["PARTNER_FINANCIAL"]}"#
        );
    }
}
