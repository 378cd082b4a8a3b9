//! List pages that own a filter set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The list page a filter set belongs to.
///
/// Contacts and tasks expose different filter dimensions, so every field
/// table and saved filter is scoped to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Contacts,
    Tasks,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Contacts => "contacts",
            PageKind::Tasks => "tasks",
        }
    }

    pub fn all() -> &'static [PageKind] {
        &[PageKind::Contacts, PageKind::Tasks]
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contacts" | "contact" => Ok(PageKind::Contacts),
            "tasks" | "task" => Ok(PageKind::Tasks),
            _ => Err(format!("Unknown page kind: {s}")),
        }
    }
}
