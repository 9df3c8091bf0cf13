use serde::Serialize;

use crate::aggregate::RecordIssue;
use crate::view::{PageWindow, TransactionRow, UserTotalRow};

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyContext {
    pub code: String,
    pub index: usize,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueCounts {
    pub total: i64,
    pub excluded_records: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionsData {
    pub data_dir: String,
    pub currency: CurrencyContext,
    pub page: PageWindow,
    pub rows: Vec<TransactionRow>,
    pub issues: IssueCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsData {
    pub data_dir: String,
    pub currency: CurrencyContext,
    pub rows: Vec<UserTotalRow>,
    pub issues: IssueCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordCounts {
    pub users: i64,
    pub merchants: i64,
    pub transactions: i64,
    pub priced_transactions: i64,
    pub card_holders: i64,
}

/// Cross-check that every priced cent landed in exactly one user total.
#[derive(Debug, Clone, Serialize)]
pub struct Conservation {
    pub transaction_usd_cents: i64,
    pub user_total_usd_cents: i64,
    pub user_total_secondary_cents: f64,
    pub balanced: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckData {
    pub data_dir: String,
    pub counts: RecordCounts,
    pub conservation: Conservation,
    pub issue_counts: IssueCounts,
    pub issues: Vec<RecordIssue>,
}
