//! Library side of the `mpdx-filters` CLI.

pub mod inspect;
pub mod logging;
