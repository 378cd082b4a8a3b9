//! Typed filter model for MPDX list pages.
//!
//! - **fields**: static per-page field tables and [`FieldKey`]
//! - **value**: typed filter values
//! - **filter_set**: [`ActiveFilterSet`], the applied filters
//! - **document**: persisted [`FilterDocument`]s
//! - **saved**: saved filters read from user options
//! - **options**: coercion and URL configuration

pub mod document;
pub mod enums;
pub mod error;
pub mod fields;
pub mod filter_set;
pub mod options;
pub mod page;
pub mod saved;
pub mod value;

pub use document::{FilterDocument, RawValue};
pub use enums::{NewsletterFilter, StatusFilter};
pub use error::{FilterError, Result};
pub use fields::{EnumKind, FieldKey, FieldKind, FieldTable, FilterField};
pub use filter_set::ActiveFilterSet;
pub use options::{CoercionOptions, FilterConfig, MatchingMode, UrlOptions};
pub use page::PageKind;
pub use saved::{
    SavedFilter, SavedFilterKey, SavedFilterPayload, SavedFilterScan, UserOption,
    saved_filters_for,
};
pub use value::{DateRange, FilterValue, NumericRange};
