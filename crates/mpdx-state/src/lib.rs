//! Active filter state for MPDX list pages.
//!
//! - **store**: [`ActiveFilterStore`], the versioned filter set
//! - **url**: the `filters` query parameter
//! - **query**: superseding stale list queries
//! - **selection**: mass selection of list rows
//! - **observer**: change notification
//! - **context**: [`PageFilterContext`], which ties them together per page

pub mod context;
pub mod observer;
pub mod query;
pub mod selection;
pub mod store;
pub mod url;

pub use context::PageFilterContext;
pub use observer::{ChangeCause, FilterChange, FilterObserver};
pub use query::{ListQueryTracker, QueryTicket, Versioned};
pub use selection::{MassSelection, SelectionState};
pub use store::ActiveFilterStore;
pub use url::{
    UrlSynchronizer, decode_filters, encode_filters, query_param, read_query, write_query,
};
