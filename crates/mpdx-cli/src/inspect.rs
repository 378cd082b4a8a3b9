//! Filter inspection behind the CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mpdx_model::{
    ActiveFilterSet, FilterConfig, FilterDocument, FilterError, PageKind, SavedFilter, UserOption,
    saved_filters_for,
};
use mpdx_state::PageFilterContext;
use tracing::{info, warn};

/// A filter set as a page would hold it.
#[derive(Debug, Clone)]
pub struct FilterReport {
    pub page: PageKind,
    pub filters: ActiveFilterSet,
    /// Query string carrying the set.
    pub query: String,
}

impl FilterReport {
    fn from_context(context: &PageFilterContext) -> Self {
        Self {
            page: context.page(),
            filters: context.filters().clone(),
            query: context.query().to_string(),
        }
    }

    /// The set as pretty-printed query variables.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.filters).context("serialize filters")
    }
}

/// A saved filter together with the set it applies.
#[derive(Debug, Clone)]
pub struct SavedFilterReport {
    pub saved: SavedFilter,
    pub report: FilterReport,
}

/// Saved filters of one account list and page.
#[derive(Debug, Default)]
pub struct SavedListing {
    pub filters: Vec<SavedFilterReport>,
    pub errors: Vec<FilterError>,
}

/// Loads the filter configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    match path {
        Some(path) => FilterConfig::load(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(FilterConfig::default()),
    }
}

/// Deserializes a saved filter document file for `page`.
pub fn deserialize_file(path: &Path, page: PageKind, config: &FilterConfig) -> Result<FilterReport> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let doc = FilterDocument::from_json_str(&text)
        .with_context(|| format!("parse filter document {}", path.display()))?;

    let mut context = PageFilterContext::new(page, config);
    context.apply_document(&doc);
    info!(path = %path.display(), active = context.filters().len(), "deserialized filter document");
    Ok(FilterReport::from_context(&context))
}

/// Decodes the filter set of a query string for `page`.
pub fn decode_query(query: &str, page: PageKind, config: &FilterConfig) -> FilterReport {
    let mut context = PageFilterContext::new(page, config);
    context.load(query);
    FilterReport::from_context(&context)
}

/// Reads user option records and applies every saved filter of the account
/// list and page in turn.
pub fn saved_filters_file(
    path: &Path,
    account_list_id: &str,
    page: PageKind,
    config: &FilterConfig,
) -> Result<SavedListing> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let options: Vec<UserOption> = serde_json::from_str(&text)
        .with_context(|| format!("parse user options {}", path.display()))?;

    let scan = saved_filters_for(&options, account_list_id, page);
    for error in &scan.errors {
        warn!(%error, "skipping unreadable saved filter");
    }

    let mut context = PageFilterContext::new(page, config);
    let filters = scan
        .filters
        .into_iter()
        .map(|saved| {
            context.apply_saved_filter(&saved);
            SavedFilterReport {
                saved,
                report: FilterReport::from_context(&context),
            }
        })
        .collect();
    Ok(SavedListing {
        filters,
        errors: scan.errors,
    })
}
