//! Consumers notified of filter changes.

use mpdx_model::{ActiveFilterSet, FieldKey};

/// What caused a filter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// Initial load from the page URL.
    Load,
    /// Back/forward navigation re-derived the set from the URL.
    Navigate,
    /// One field was set or removed.
    Field(FieldKey),
    /// All filters were cleared.
    Cleared,
    /// A saved filter or document replaced the active set.
    Replaced,
}

/// A committed filter change, delivered before the mutating call returns.
#[derive(Debug, Clone, Copy)]
pub struct FilterChange<'a> {
    pub filters: &'a ActiveFilterSet,
    pub version: u64,
    pub cause: ChangeCause,
    /// Page query string after the change.
    pub query: &'a str,
}

/// Receives every change of a page's active filters.
pub trait FilterObserver {
    fn filters_changed(&mut self, change: &FilterChange<'_>);
}

impl<F> FilterObserver for F
where
    F: FnMut(&FilterChange<'_>),
{
    fn filters_changed(&mut self, change: &FilterChange<'_>) {
        self(change);
    }
}
