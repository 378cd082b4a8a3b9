//! Saved filters stored as user options.
//!
//! The settings store keeps each saved filter as a `(key, value)` record:
//!
//! - `saved_contacts_filter_Major_Donors` with a legacy [`FilterDocument`]
//! - `graphql_saved_tasks_filter_Calls` with the typed camelCase filter object
//!
//! Records whose key matches neither form belong to other settings.

use serde::{Deserialize, Serialize};

use crate::document::FilterDocument;
use crate::error::{FilterError, Result};
use crate::page::PageKind;

const GRAPHQL_PREFIX: &str = "graphql_";
const CONTACTS_PREFIX: &str = "saved_contacts_filter_";
const TASKS_PREFIX: &str = "saved_tasks_filter_";

/// A user option record as returned by the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOption {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Payload of a saved filter.
#[derive(Debug, Clone, PartialEq)]
pub enum SavedFilterPayload {
    /// Snake_case document with stringified values and a `params` map.
    Legacy(FilterDocument),
    /// Object in the typed camelCase schema used by the URL parameter.
    Typed(serde_json::Map<String, serde_json::Value>),
}

/// A named filter saved for one account list and page.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFilter {
    /// Display name derived from the option key.
    pub name: String,
    /// Original option key.
    pub key: String,
    pub page: PageKind,
    pub account_list_id: Option<String>,
    pub payload: SavedFilterPayload,
}

/// Parsed form of a saved-filter option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedFilterKey<'a> {
    pub page: PageKind,
    pub typed: bool,
    pub raw_name: &'a str,
}

impl<'a> SavedFilterKey<'a> {
    /// Parses an option key; `None` for keys that are not saved filters.
    pub fn parse(key: &'a str) -> Option<Self> {
        let (typed, rest) = match key.strip_prefix(GRAPHQL_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, key),
        };
        let (page, raw_name) = if let Some(name) = rest.strip_prefix(CONTACTS_PREFIX) {
            (PageKind::Contacts, name)
        } else if let Some(name) = rest.strip_prefix(TASKS_PREFIX) {
            (PageKind::Tasks, name)
        } else {
            return None;
        };
        Some(Self {
            page,
            typed,
            raw_name,
        })
    }

    /// Name shown to the user: underscores become spaces.
    pub fn display_name(&self) -> String {
        self.raw_name.replace('_', " ")
    }
}

impl SavedFilter {
    /// Reads a saved filter from a user option record.
    ///
    /// Returns `Ok(None)` when the key does not name a saved filter.
    ///
    /// # Errors
    ///
    /// Returns an error when the key names a saved filter but the value is
    /// missing or is not a JSON object.
    pub fn from_user_option(key: &str, value: Option<&str>) -> Result<Option<Self>> {
        let Some(parsed) = SavedFilterKey::parse(key) else {
            return Ok(None);
        };
        let invalid = |message: String| FilterError::InvalidUserOption {
            key: key.to_string(),
            message,
        };
        let text = value.ok_or_else(|| invalid("missing value".to_string()))?;
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|err| invalid(err.to_string()))?;

        let (account_list_id, payload) = if parsed.typed {
            let serde_json::Value::Object(map) = json else {
                return Err(invalid("expected a JSON object".to_string()));
            };
            let account = map
                .get("accountListId")
                .or_else(|| map.get("account_list_id"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
            (account, SavedFilterPayload::Typed(map))
        } else {
            let doc = FilterDocument::from_json_value(json)
                .map_err(|err| invalid(err.to_string()))?;
            (doc.account_list_id(), SavedFilterPayload::Legacy(doc))
        };

        Ok(Some(Self {
            name: parsed.display_name(),
            key: key.to_string(),
            page: parsed.page,
            account_list_id,
            payload,
        }))
    }

    pub fn belongs_to(&self, account_list_id: &str, page: PageKind) -> bool {
        self.page == page && self.account_list_id.as_deref() == Some(account_list_id)
    }
}

/// Outcome of scanning user options for saved filters.
#[derive(Debug, Default)]
pub struct SavedFilterScan {
    /// Saved filters for the requested account list and page, sorted by name.
    pub filters: Vec<SavedFilter>,
    /// Saved-filter options that could not be read.
    pub errors: Vec<FilterError>,
}

/// Collects the saved filters of one account list and page.
///
/// Unreadable records are reported in [`SavedFilterScan::errors`] instead of
/// failing the whole scan.
pub fn saved_filters_for(
    options: &[UserOption],
    account_list_id: &str,
    page: PageKind,
) -> SavedFilterScan {
    let mut scan = SavedFilterScan::default();
    for option in options {
        match SavedFilter::from_user_option(&option.key, option.value.as_deref()) {
            Ok(Some(filter)) if filter.belongs_to(account_list_id, page) => {
                scan.filters.push(filter);
            }
            Ok(_) => {}
            Err(err) => scan.errors.push(err),
        }
    }
    scan.filters.sort_by(|a, b| a.name.cmp(&b.name));
    scan
}
