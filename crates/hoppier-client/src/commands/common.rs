use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ClientResult;
use crate::contracts::types::{CurrencyContext, IssueCounts};
use crate::money::{CONVERSION_RATE, Currency};
use crate::session::{Snapshot, ViewSession};
use crate::source::DirectorySource;
use crate::state::resolve_data_dir;

pub(crate) struct LoadedSnapshot {
    pub(crate) data_dir: PathBuf,
    pub(crate) snapshot: Arc<Snapshot>,
}

pub(crate) fn load_snapshot(data_dir: Option<&Path>) -> ClientResult<LoadedSnapshot> {
    let data_dir = resolve_data_dir(data_dir)?;
    let source = DirectorySource::new(&data_dir);
    let snapshot = ViewSession::new().refresh(&source)?;
    Ok(LoadedSnapshot { data_dir, snapshot })
}

pub(crate) fn currency_context(currency: Currency) -> CurrencyContext {
    CurrencyContext {
        code: currency.code().to_string(),
        index: currency.index(),
        conversion_rate: CONVERSION_RATE,
    }
}

pub(crate) fn issue_counts(snapshot: &Snapshot) -> IssueCounts {
    let (total, excluded) = snapshot
        .issues()
        .fold((0i64, 0i64), |(total, excluded), issue| {
            let excluded = excluded + i64::from(issue.kind.excludes_record());
            (total + 1, excluded)
        });
    IssueCounts {
        total,
        excluded_records: excluded,
    }
}
