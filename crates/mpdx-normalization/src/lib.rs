//! Saved filter normalization.
//!
//! Converts the loosely typed JSON clients persisted for saved filters into
//! the typed [`ActiveFilterSet`](mpdx_model::ActiveFilterSet):
//!
//! - **keys**: snake_case to camelCase key normalization
//! - **labels**: legacy enum label resolution (strict or lenient)
//! - **coerce**: per-kind value coercion
//! - **typed**: reading the typed camelCase schema
//! - **deserialize**: whole-document deserialization

pub mod coerce;
pub mod deserialize;
pub mod keys;
pub mod labels;
pub mod typed;

pub use coerce::{coerce, coerce_value, coerce_value_with};
pub use deserialize::{deserialize, deserialize_saved_filter, deserialize_with};
pub use keys::normalize_key;
pub use labels::{resolve_label, resolve_or_fallback};
pub use typed::{set_from_json, set_from_map, value_from_json};
