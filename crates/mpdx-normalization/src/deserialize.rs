//! Saved filter deserialization.

use mpdx_model::document::{ACCOUNT_LIST_KEYS, PARAMS_KEY};
use mpdx_model::{
    ActiveFilterSet, CoercionOptions, FieldKind, FieldTable, FilterDocument, FilterValue,
    RawValue, SavedFilter, SavedFilterPayload,
};
use tracing::debug;

use crate::coerce::coerce;
use crate::keys::normalize_key;
use crate::typed::set_from_map;

/// Fields a legacy document may hold outside `params`.
pub const TOP_LEVEL_FIELDS: [&str; 4] = ["tags", "excludeTags", "anyTags", "wildcardSearch"];

/// Deserializes a contacts-page document with default options.
pub fn deserialize(doc: &FilterDocument) -> ActiveFilterSet {
    deserialize_with(doc, FieldTable::contacts(), &CoercionOptions::default())
}

/// Deserializes a persisted document into a typed filter set.
///
/// Entries under `params` are read first and the top-level tag and search
/// entries after them, so a top-level entry wins over a `params` entry for
/// the same field. The account list id is not a filter. Unknown keys and
/// values that coerce to nothing are left out.
///
/// The result is a complete filter set: applying it replaces whatever was
/// active before.
pub fn deserialize_with(
    doc: &FilterDocument,
    table: FieldTable,
    options: &CoercionOptions,
) -> ActiveFilterSet {
    let mut set = ActiveFilterSet::new();

    match doc.get(PARAMS_KEY) {
        Some(RawValue::Map(params)) => {
            for (name, raw) in params {
                apply(&mut set, table, &normalize_key(name), raw, options);
            }
        }
        Some(other) => debug!(?other, "ignoring params entry that is not an object"),
        None => {}
    }

    for (name, raw) in doc.iter() {
        if name == PARAMS_KEY || ACCOUNT_LIST_KEYS.contains(&name) {
            continue;
        }
        let key = normalize_key(name);
        if !TOP_LEVEL_FIELDS.contains(&key.as_str()) {
            debug!(key = name, "ignoring top-level entry");
            continue;
        }
        apply(&mut set, table, &key, raw, options);
    }

    set
}

/// Deserializes a saved filter using its page's field table.
pub fn deserialize_saved_filter(saved: &SavedFilter, options: &CoercionOptions) -> ActiveFilterSet {
    let table = FieldTable::for_page(saved.page);
    match &saved.payload {
        SavedFilterPayload::Legacy(doc) => deserialize_with(doc, table, options),
        SavedFilterPayload::Typed(map) => set_from_map(table, map, options),
    }
}

fn apply(
    set: &mut ActiveFilterSet,
    table: FieldTable,
    key: &str,
    raw: &RawValue,
    options: &CoercionOptions,
) {
    // Lists aimed at list fields are already split; joining them again
    // would break items that contain the delimiter.
    if let RawValue::List(items) = raw
        && let Some(field) = table.key(key)
        && field.kind() == FieldKind::StringArray
    {
        let values = items
            .iter()
            .filter_map(RawValue::as_text)
            .filter(|item| !item.is_empty())
            .collect();
        set.set(field, FilterValue::Strings(values));
        return;
    }
    let Some(text) = raw.as_text() else {
        debug!(key, "ignoring filter entry without a scalar value");
        return;
    };
    if let Some((field, value)) = coerce(table, key, &text, options) {
        set.set(field, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpdx_model::{FilterValue, PageKind, StatusFilter};

    #[test]
    fn test_account_list_id_is_not_a_filter() {
        let doc = FilterDocument::new()
            .with_entry("account_list_id", "abc")
            .with_entry("accountListId", "abc");
        assert!(deserialize(&doc).is_empty());
    }

    #[test]
    fn test_top_level_entries_are_limited() {
        let doc = FilterDocument::from_json_str(
            r#"{"starred": "true", "any_tags": "true", "wildcard_search": "smith"}"#,
        )
        .unwrap();
        let set = deserialize(&doc);
        assert_eq!(set.len(), 2);
        assert!(set.get_named("starred").is_none());
        assert_eq!(set.get_named("anyTags"), Some(&FilterValue::Boolean(true)));
    }

    #[test]
    fn test_top_level_wins_over_params() {
        let doc = FilterDocument::from_json_str(
            r#"{"tags": ["top"], "params": {"tags": "nested"}}"#,
        )
        .unwrap();
        assert_eq!(
            deserialize(&doc).get_named("tags"),
            Some(&FilterValue::Strings(vec!["top".to_string()]))
        );
    }

    #[test]
    fn test_boolean_and_list_top_level_values() {
        let doc = FilterDocument::from_json_str(
            r#"{"any_tags": false, "exclude_tags": ["a", "b"]}"#,
        )
        .unwrap();
        let set = deserialize(&doc);
        assert_eq!(set.get_named("anyTags"), Some(&FilterValue::Boolean(false)));
        assert_eq!(
            set.get_named("excludeTags"),
            Some(&FilterValue::Strings(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_list_items_keep_commas() {
        let doc = FilterDocument::from_json_str(
            r#"{"tags": ["Smith, John", "vip", ""], "params": {"church": ["First, Second"]}}"#,
        )
        .unwrap();
        let set = deserialize(&doc);
        assert_eq!(
            set.get_named("tags"),
            Some(&FilterValue::Strings(vec![
                "Smith, John".to_string(),
                "vip".to_string()
            ]))
        );
        assert_eq!(
            set.get_named("church"),
            Some(&FilterValue::Strings(vec!["First, Second".to_string()]))
        );
    }

    #[test]
    fn test_saved_filter_uses_page_table() {
        let saved = SavedFilter::from_user_option(
            "saved_tasks_filter_Open",
            Some(r#"{"account_list_id":"a","params":{"completed":"false","contact_status":"Never Ask","donation_date":"2020-01-01"}}"#),
        )
        .unwrap()
        .unwrap();
        assert_eq!(saved.page, PageKind::Tasks);

        let set = deserialize_saved_filter(&saved, &CoercionOptions::default());
        assert_eq!(set.get_named("completed"), Some(&FilterValue::Boolean(false)));
        assert_eq!(
            set.get_named("contactStatus"),
            Some(&FilterValue::Statuses(vec![StatusFilter::NeverAsk]))
        );
        assert!(set.get_named("donationDate").is_none());
    }

    #[test]
    fn test_typed_saved_filter() {
        let saved = SavedFilter::from_user_option(
            "graphql_saved_contacts_filter_Partners",
            Some(r#"{"accountListId":"a","status":["PARTNER_FINANCIAL"],"starred":true}"#),
        )
        .unwrap()
        .unwrap();
        let set = deserialize_saved_filter(&saved, &CoercionOptions::default());
        assert_eq!(set.len(), 2);
    }
}
