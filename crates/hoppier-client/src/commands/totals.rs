use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{currency_context, issue_counts, load_snapshot};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TotalsData;
use crate::money::Currency;

#[derive(Debug, Default)]
pub struct TotalsRunOptions<'a> {
    pub currency: Currency,
    pub data_dir: Option<&'a Path>,
}

pub fn run(currency: Currency) -> ClientResult<SuccessEnvelope> {
    run_with_options(TotalsRunOptions {
        currency,
        data_dir: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TotalsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_snapshot(options.data_dir)?;
    let snapshot = &loaded.snapshot;

    let data = TotalsData {
        data_dir: loaded.data_dir.display().to_string(),
        currency: currency_context(options.currency),
        rows: snapshot.user_ranking(options.currency),
        issues: issue_counts(snapshot),
    };

    success("totals", &snapshot.cycle_id, data)
}
