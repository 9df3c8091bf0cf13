use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{currency_context, issue_counts, load_snapshot};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TransactionsData;
use crate::money::Currency;
use crate::view::PageSize;

#[derive(Debug, Default)]
pub struct TransactionsRunOptions<'a> {
    pub currency: Currency,
    pub page_index: usize,
    pub page_size: PageSize,
    pub data_dir: Option<&'a Path>,
}

pub fn run(currency: Currency, page_index: usize, page_size: PageSize) -> ClientResult<SuccessEnvelope> {
    run_with_options(TransactionsRunOptions {
        currency,
        page_index,
        page_size,
        data_dir: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TransactionsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_snapshot(options.data_dir)?;
    let snapshot = &loaded.snapshot;
    let (page, rows) =
        snapshot.transaction_page(options.currency, options.page_index, options.page_size.get());

    let data = TransactionsData {
        data_dir: loaded.data_dir.display().to_string(),
        currency: currency_context(options.currency),
        page,
        rows,
        issues: issue_counts(snapshot),
    };

    success("transactions", &snapshot.cycle_id, data)
}
