//! CLI argument definitions for `mpdx-filters`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mpdx_model::PageKind;

#[derive(Parser)]
#[command(
    name = "mpdx-filters",
    version,
    about = "Inspect MPDX saved filters and filter URLs",
    long_about = "Inspect MPDX list-page filters.\n\n\
                  Deserializes saved filter documents into typed filter sets, \
                  decodes the `filters` URL parameter, and lists the saved \
                  filters stored in user options."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deserialize a saved filter document (JSON) into the active filter set.
    Deserialize(DeserializeArgs),

    /// Decode the filter set carried by a URL query string.
    DecodeUrl(DecodeUrlArgs),

    /// List the saved filters of an account list.
    Saved(SavedArgs),

    /// List the filter fields of a page.
    Fields(PageArgs),
}

#[derive(Parser)]
pub struct PageArgs {
    /// List page the filters belong to.
    #[arg(long = "page", value_enum, default_value = "contacts")]
    pub page: PageArg,

    /// Filter configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DeserializeArgs {
    /// Path to the saved filter document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Parser)]
pub struct DecodeUrlArgs {
    /// Query string, with or without the leading `?`.
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Parser)]
pub struct SavedArgs {
    /// JSON file holding an array of user option records.
    #[arg(value_name = "USER_OPTIONS_JSON")]
    pub file: PathBuf,

    /// Account list whose saved filters are listed.
    #[arg(long = "account-list-id", value_name = "ID")]
    pub account_list_id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PageArg {
    Contacts,
    Tasks,
}

impl From<PageArg> for PageKind {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Contacts => PageKind::Contacts,
            PageArg::Tasks => PageKind::Tasks,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
