//! The active filter state store.

use mpdx_model::{ActiveFilterSet, FieldKey, FilterValue};
use tracing::debug;

/// Holds the active filter set of one page.
///
/// Every change bumps [`version`](Self::version), which consumers compare
/// against to detect stale derived state. Mutations that leave the set as
/// it was do not bump the version.
#[derive(Debug, Clone, Default)]
pub struct ActiveFilterStore {
    filters: ActiveFilterSet,
    version: u64,
}

impl ActiveFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &ActiveFilterSet {
        &self.filters
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets one field.
    ///
    /// `None`, an empty value, or `false` removes the field. A value whose
    /// shape does not fit the field is ignored. Returns whether the set
    /// changed.
    pub fn set_field(&mut self, key: FieldKey, value: Option<FilterValue>) -> bool {
        let changed = match value {
            Some(value) if !is_falsy(&value) => {
                if !value.fits(key.kind()) {
                    debug!(key = %key, kind = %key.kind(), "ignoring value of the wrong shape");
                    return false;
                }
                self.filters.set(key, value)
            }
            _ => self.filters.remove(key),
        };
        self.commit(changed)
    }

    /// Removes every filter.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.filters.is_empty();
        self.filters.clear();
        self.commit(changed)
    }

    /// Replaces the whole set. Nothing of the previous set is kept.
    pub fn replace_all(&mut self, filters: ActiveFilterSet) -> bool {
        let changed = self.filters != filters;
        self.filters = filters;
        self.commit(changed)
    }

    fn commit(&mut self, changed: bool) -> bool {
        if changed {
            self.version += 1;
            debug!(version = self.version, active = self.filters.len(), "filters changed");
        }
        changed
    }
}

fn is_falsy(value: &FilterValue) -> bool {
    value.is_empty() || value.as_bool() == Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpdx_model::{FieldTable, StatusFilter};

    fn key(name: &str) -> FieldKey {
        FieldTable::contacts().key(name).unwrap()
    }

    #[test]
    fn test_set_and_remove() {
        let mut store = ActiveFilterStore::new();
        assert!(store.set_field(key("starred"), Some(true.into())));
        assert_eq!(store.version(), 1);
        assert!(store.get().contains(key("starred")));

        assert!(store.set_field(key("starred"), None));
        assert!(store.get().is_empty());
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn test_empty_and_false_values_delete() {
        let mut store = ActiveFilterStore::new();
        store.set_field(key("status"), Some(vec![StatusFilter::NeverAsk].into()));
        store.set_field(key("anyTags"), Some(true.into()));

        assert!(store.set_field(key("status"), Some(FilterValue::Statuses(Vec::new()))));
        assert!(store.set_field(key("anyTags"), Some(false.into())));
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_unchanged_values_keep_version() {
        let mut store = ActiveFilterStore::new();
        store.set_field(key("wildcardSearch"), Some("smith".into()));
        assert!(!store.set_field(key("wildcardSearch"), Some("smith".into())));
        assert!(!store.set_field(key("tags"), None));
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_wrong_shape_is_ignored() {
        let mut store = ActiveFilterStore::new();
        assert!(!store.set_field(key("starred"), Some("yes".into())));
        assert!(store.get().is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_replace_all_discards_previous() {
        let mut store = ActiveFilterStore::new();
        store.set_field(key("starred"), Some(true.into()));

        let replacement = ActiveFilterSet::new().with(key("tags"), vec!["a".to_string()]);
        assert!(store.replace_all(replacement.clone()));
        assert_eq!(store.get(), &replacement);
        assert!(!store.replace_all(replacement));
    }

    #[test]
    fn test_clear_all() {
        let mut store = ActiveFilterStore::new();
        assert!(!store.clear_all());
        store.set_field(key("starred"), Some(true.into()));
        assert!(store.clear_all());
        assert!(store.get().is_empty());
        assert_eq!(store.version(), 2);
    }
}
