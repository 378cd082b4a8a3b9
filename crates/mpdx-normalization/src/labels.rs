//! Enum label resolution.

use mpdx_model::{CoercionOptions, MatchingMode, NewsletterFilter, StatusFilter};
use std::collections::BTreeMap;

/// An enum whose values are persisted as labels.
pub trait LabelledEnum: Copy + Sized + 'static {
    /// Value for labels nothing recognizes.
    const FALLBACK: Self;

    fn variants() -> &'static [Self];

    /// Exact lookup in the built-in label table.
    fn from_exact_label(label: &str) -> Option<Self>;

    /// Every spelling the lenient matcher compares against.
    fn spellings(&self) -> Vec<&'static str>;

    /// Caller-supplied labels consulted before the built-in table.
    fn custom_labels(options: &CoercionOptions) -> &BTreeMap<String, Self>;
}

impl LabelledEnum for StatusFilter {
    const FALLBACK: Self = StatusFilter::DEFAULT;

    fn variants() -> &'static [Self] {
        StatusFilter::all()
    }

    fn from_exact_label(label: &str) -> Option<Self> {
        StatusFilter::from_label(label)
    }

    fn spellings(&self) -> Vec<&'static str> {
        vec![self.as_str(), self.legacy_label()]
    }

    fn custom_labels(options: &CoercionOptions) -> &BTreeMap<String, Self> {
        &options.custom_status_labels
    }
}

impl LabelledEnum for NewsletterFilter {
    const FALLBACK: Self = NewsletterFilter::DEFAULT;

    fn variants() -> &'static [Self] {
        NewsletterFilter::all()
    }

    fn from_exact_label(label: &str) -> Option<Self> {
        NewsletterFilter::from_label(label)
    }

    fn spellings(&self) -> Vec<&'static str> {
        let mut spellings = vec![self.as_str()];
        spellings.extend_from_slice(self.legacy_labels());
        spellings
    }

    fn custom_labels(options: &CoercionOptions) -> &BTreeMap<String, Self> {
        &options.custom_newsletter_labels
    }
}

/// Creates a compact key by keeping only uppercase alphanumeric characters.
fn compact_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

fn resolve_lenient<E: LabelledEnum>(trimmed: &str, options: &CoercionOptions) -> Option<E> {
    let input_compact = compact_key(trimmed);
    if input_compact.is_empty() {
        return None;
    }
    let custom = E::custom_labels(options)
        .iter()
        .find(|(label, _)| compact_key(label) == input_compact)
        .map(|(_, value)| *value);
    if custom.is_some() {
        return custom;
    }
    E::variants().iter().copied().find(|variant| {
        variant
            .spellings()
            .iter()
            .any(|spelling| compact_key(spelling) == input_compact)
    })
}

/// Resolves a label according to the matching mode.
///
/// Returns `None` when nothing matches; see [`resolve_or_fallback`].
pub fn resolve_label<E: LabelledEnum>(raw: &str, options: &CoercionOptions) -> Option<E> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 1. Custom labels
    if let Some(value) = E::custom_labels(options).get(trimmed) {
        return Some(*value);
    }

    // 2. Built-in table
    if let Some(value) = E::from_exact_label(trimmed) {
        return Some(value);
    }

    // 3. Compact comparison
    match options.matching {
        MatchingMode::Strict => None,
        MatchingMode::Lenient => resolve_lenient(trimmed, options),
    }
}

/// Resolves a label, mapping unrecognized labels to the enum's fallback.
pub fn resolve_or_fallback<E: LabelledEnum>(raw: &str, options: &CoercionOptions) -> E {
    resolve_label(raw, options).unwrap_or_else(|| {
        tracing::debug!(label = raw, "unrecognized filter label, using fallback");
        E::FALLBACK
    })
}
