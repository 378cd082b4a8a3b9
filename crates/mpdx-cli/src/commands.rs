use anyhow::Result;
use tracing::info_span;

use mpdx_cli::inspect::{
    FilterReport, SavedListing, decode_query, deserialize_file, load_config, saved_filters_file,
};
use mpdx_model::{FieldTable, PageKind};

use crate::cli::{DecodeUrlArgs, DeserializeArgs, PageArgs, SavedArgs};

pub fn run_deserialize(args: &DeserializeArgs) -> Result<FilterReport> {
    let page = PageKind::from(args.page.page);
    let span = info_span!("deserialize", file = %args.file.display(), %page);
    let _guard = span.enter();
    let config = load_config(args.page.config.as_deref())?;
    let report = deserialize_file(&args.file, page, &config)?;
    println!("{}", report.to_json()?);
    Ok(report)
}

pub fn run_decode_url(args: &DecodeUrlArgs) -> Result<FilterReport> {
    let page = PageKind::from(args.page.page);
    let config = load_config(args.page.config.as_deref())?;
    let report = decode_query(&args.query, page, &config);
    println!("{}", report.to_json()?);
    Ok(report)
}

pub fn run_saved(args: &SavedArgs) -> Result<SavedListing> {
    let page = PageKind::from(args.page.page);
    let span = info_span!("saved", account_list_id = %args.account_list_id, %page);
    let _guard = span.enter();
    let config = load_config(args.page.config.as_deref())?;
    saved_filters_file(&args.file, &args.account_list_id, page, &config)
}

pub fn run_fields(args: &PageArgs) -> FieldTable {
    FieldTable::for_page(PageKind::from(args.page))
}
