use std::collections::HashSet;
use std::path::Path;

use crate::ClientResult;
use crate::aggregate::IssueKind;
use crate::commands::common::{issue_counts, load_snapshot};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CheckData, Conservation, RecordCounts};
use crate::money::CONVERSION_RATE;
use crate::session::Snapshot;

#[derive(Debug, Default)]
pub struct CheckRunOptions<'a> {
    pub data_dir: Option<&'a Path>,
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(CheckRunOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: CheckRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_snapshot(options.data_dir)?;
    let snapshot = &loaded.snapshot;
    let aggregate = &snapshot.aggregate;

    let data = CheckData {
        data_dir: loaded.data_dir.display().to_string(),
        counts: RecordCounts {
            users: snapshot.users.len() as i64,
            merchants: snapshot.merchants.len() as i64,
            transactions: snapshot.transactions.len() as i64,
            priced_transactions: aggregate.transaction_amounts.len() as i64,
            card_holders: aggregate.user_totals.len() as i64,
        },
        conservation: conservation(snapshot),
        issue_counts: issue_counts(snapshot),
        issues: snapshot.issues().cloned().collect(),
    };

    success("check", &snapshot.cycle_id, data)
}

// Sums run in i128 so any number of in-range totals can be added.
fn conservation(snapshot: &Snapshot) -> Conservation {
    let left_out_rows = snapshot
        .aggregate
        .issues
        .iter()
        .filter(|issue| issue.kind == IssueKind::TotalOutOfRange)
        .map(|issue| issue.row)
        .collect::<HashSet<i64>>();
    let transaction_usd_cents = snapshot
        .transactions
        .iter()
        .enumerate()
        .filter(|(index, _)| !left_out_rows.contains(&((*index as i64) + 1)))
        .filter_map(|(_, transaction)| transaction.amount_in_usd_cents.cents())
        .map(i128::from)
        .sum::<i128>();
    let (user_total_usd_cents, user_total_secondary_cents, pairs_exact) = snapshot
        .aggregate
        .user_totals
        .values()
        .fold((0i128, 0f64, true), |(usd, secondary, exact), pair| {
            (
                usd + i128::from(pair.usd_cents()),
                secondary + pair.secondary_cents(),
                exact && pair.secondary_cents() == pair.usd_cents() as f64 * CONVERSION_RATE,
            )
        });

    Conservation {
        transaction_usd_cents: clamp_to_i64(transaction_usd_cents),
        user_total_usd_cents: clamp_to_i64(user_total_usd_cents),
        user_total_secondary_cents,
        balanced: transaction_usd_cents == user_total_usd_cents && pairs_exact,
    }
}

fn clamp_to_i64(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}
