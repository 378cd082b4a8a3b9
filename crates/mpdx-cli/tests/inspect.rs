//! Integration tests for the inspection commands.

use std::fs;

use mpdx_cli::inspect::{decode_query, deserialize_file, load_config, saved_filters_file};
use mpdx_model::{FilterConfig, FilterValue, MatchingMode, PageKind, StatusFilter};
use tempfile::tempdir;

#[test]
fn deserialize_file_produces_query() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filter.json");
    fs::write(
        &path,
        r#"{"account_list_id":"acc","params":{"starred":"true","status":"Partner - Financial,Never Ask"}}"#,
    )
    .unwrap();

    let report = deserialize_file(&path, PageKind::Contacts, &FilterConfig::default()).unwrap();
    assert_eq!(report.filters.len(), 2);
    assert_eq!(
        report.query,
        "filters=%7B%22starred%22:true,%22status%22:%5B%22PARTNER_FINANCIAL%22,%22NEVER_ASK%22%5D%7D"
    );
    assert!(report.to_json().unwrap().contains("\"NEVER_ASK\""));
}

#[test]
fn deserialize_file_rejects_non_object() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filter.json");
    fs::write(&path, "[1, 2]").unwrap();

    let error = deserialize_file(&path, PageKind::Contacts, &FilterConfig::default()).unwrap_err();
    assert!(format!("{error:#}").contains("expected a JSON object"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");
    assert!(deserialize_file(&path, PageKind::Tasks, &FilterConfig::default()).is_err());
}

#[test]
fn decode_query_never_fails() {
    let config = FilterConfig::default();
    assert!(decode_query("?filters=%7Bbroken", PageKind::Contacts, &config).filters.is_empty());

    let report = decode_query("?filters=%7B%22completed%22:true%7D", PageKind::Tasks, &config);
    assert_eq!(
        report.filters.get_named("completed"),
        Some(&FilterValue::Boolean(true))
    );
}

#[test]
fn config_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("filters.toml");
    fs::write(
        &path,
        "[coercion]\nmatching = \"Strict\"\n\n[coercion.custom_status_labels]\n\"Monthly\" = \"PARTNER_FINANCIAL\"\n",
    )
    .unwrap();

    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.coercion.matching, MatchingMode::Strict);
    assert_eq!(load_config(None).unwrap(), FilterConfig::default());

    let report = decode_query(
        "filters=%7B%22status%22:%5B%22Monthly%22%5D%7D",
        PageKind::Contacts,
        &config,
    );
    assert_eq!(
        report.filters.get_named("status"),
        Some(&FilterValue::Statuses(vec![StatusFilter::PartnerFinancial]))
    );
}

#[test]
fn saved_filters_are_listed_and_applied() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"[
            {"key": "saved_contacts_filter_Zebra", "value": "{\"account_list_id\":\"acc\",\"params\":{\"starred\":\"true\"}}"},
            {"key": "graphql_saved_contacts_filter_Appeal_Targets", "value": "{\"accountListId\":\"acc\",\"appeal\":[\"a1\"]}"},
            {"key": "saved_contacts_filter_Other_Account", "value": "{\"account_list_id\":\"other\"}"},
            {"key": "saved_contacts_filter_Broken", "value": "not json"},
            {"key": "contacts_view", "value": "flows"}
        ]"#,
    )
    .unwrap();

    let listing =
        saved_filters_file(&path, "acc", PageKind::Contacts, &FilterConfig::default()).unwrap();
    let names: Vec<&str> = listing.filters.iter().map(|f| f.saved.name.as_str()).collect();
    assert_eq!(names, vec!["Appeal Targets", "Zebra"]);
    assert_eq!(listing.errors.len(), 1);

    let zebra = &listing.filters[1].report;
    assert_eq!(zebra.filters.len(), 1);
    assert_eq!(zebra.query, "filters=%7B%22starred%22:true%7D");
}
