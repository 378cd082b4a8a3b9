//! Configuration options for filter coercion and URL synchronization.
//!
//! Every field has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! [coercion]
//! matching = "Strict"
//!
//! [coercion.custom_status_labels]
//! "Partner - Monthly" = "PARTNER_FINANCIAL"
//!
//! [url]
//! param = "filters"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{NewsletterFilter, StatusFilter};
use crate::error::Result;

/// Query-string parameter carrying the encoded filter set.
pub const DEFAULT_URL_PARAM: &str = "filters";

/// Mode for resolving enum labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchingMode {
    /// Legacy labels and canonical identifiers only.
    Strict,
    /// Also match ignoring case and non-alphanumeric characters.
    #[default]
    Lenient,
}

/// Options for value coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionOptions {
    /// Label matching strictness.
    pub matching: MatchingMode,

    /// Extra status labels (raw label -> status), consulted before the
    /// built-in table.
    pub custom_status_labels: BTreeMap<String, StatusFilter>,

    /// Extra newsletter labels, consulted before the built-in table.
    pub custom_newsletter_labels: BTreeMap<String, NewsletterFilter>,
}

impl CoercionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            matching: MatchingMode::Strict,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_matching(mut self, matching: MatchingMode) -> Self {
        self.matching = matching;
        self
    }

    #[must_use]
    pub fn with_status_label(mut self, label: &str, status: StatusFilter) -> Self {
        self.custom_status_labels.insert(label.to_string(), status);
        self
    }

    #[must_use]
    pub fn with_newsletter_label(mut self, label: &str, newsletter: NewsletterFilter) -> Self {
        self.custom_newsletter_labels
            .insert(label.to_string(), newsletter);
        self
    }
}

/// Options for the URL synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlOptions {
    /// Name of the query-string parameter.
    pub param: String,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            param: DEFAULT_URL_PARAM.to_string(),
        }
    }
}

/// Top-level filter configuration (TOML).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub coercion: CoercionOptions,
    pub url: UrlOptions,
}

impl FilterConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FilterConfig::from_toml_str("").unwrap();
        assert_eq!(config, FilterConfig::default());
        assert_eq!(config.url.param, "filters");
        assert_eq!(config.coercion.matching, MatchingMode::Lenient);
    }

    #[test]
    fn test_parse_full_config() {
        let config = FilterConfig::from_toml_str(
            r#"
            [coercion]
            matching = "Strict"

            [coercion.custom_status_labels]
            "Partner - Monthly" = "PARTNER_FINANCIAL"

            [coercion.custom_newsletter_labels]
            paper = "PHYSICAL"

            [url]
            param = "f"
            "#,
        )
        .unwrap();
        assert_eq!(config.coercion.matching, MatchingMode::Strict);
        assert_eq!(
            config.coercion.custom_status_labels.get("Partner - Monthly"),
            Some(&StatusFilter::PartnerFinancial)
        );
        assert_eq!(
            config.coercion.custom_newsletter_labels.get("paper"),
            Some(&NewsletterFilter::Physical)
        );
        assert_eq!(config.url.param, "f");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = FilterConfig::from_toml_str("[coercion]\nmatching = \"Fuzzy\"").unwrap_err();
        assert!(matches!(err, FilterError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.toml");
        std::fs::write(&path, "[url]\nparam = \"q\"\n").unwrap();
        let config = FilterConfig::load(&path).unwrap();
        assert_eq!(config.url.param, "q");

        let missing = FilterConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, FilterError::Io(_)));
    }
}
