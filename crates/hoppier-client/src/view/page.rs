use serde::Serialize;

use crate::aggregate::{AmountIndex, NameIndex};
use crate::money::Currency;
use crate::records::Transaction;
use crate::view::date::{format_display_date, parse_transaction_date};
use crate::view::{UNAVAILABLE, UNKNOWN_NAME};
use crate::{ClientError, ClientResult};

/// Page sizes offered by the transaction history table.
pub const ALLOWED_PAGE_SIZES: [usize; 2] = [8, 11];
pub const DEFAULT_PAGE_SIZE: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(value: usize) -> ClientResult<Self> {
        if ALLOWED_PAGE_SIZES.contains(&value) {
            return Ok(Self(value));
        }
        let allowed = ALLOWED_PAGE_SIZES
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(", ");
        Err(ClientError::invalid_argument_for_command(
            &format!("page size must be one of: {allowed}; got {value}"),
            Some("transactions"),
        ))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub amount_cents: Option<f64>,
    pub card_holder: String,
    pub merchant: String,
    /// Set when any cell shows the unavailable marker.
    pub unavailable: bool,
}

/// Position of one page within the full transaction list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub page_count: usize,
    /// 1-based label bounds; both 0 when the page is empty.
    pub first_row: usize,
    pub last_row: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageWindow {
    pub fn new(total_rows: usize, page_index: usize, page_size: usize) -> Self {
        let page_count = if page_size == 0 {
            0
        } else {
            total_rows.div_ceil(page_size)
        };
        let (first_row, last_row) = match page_bounds(total_rows, page_index, page_size) {
            Some((start, end)) => (start + 1, end),
            None => (0, 0),
        };

        Self {
            page_index,
            page_size,
            total_rows,
            page_count,
            first_row,
            last_row,
            has_previous: page_index > 0 && page_count > 0,
            has_next: page_index.saturating_add(1) < page_count,
        }
    }
}

pub fn project_transaction_page(
    transactions: &[Transaction],
    amounts: &AmountIndex,
    user_names: &NameIndex,
    merchant_names: &NameIndex,
    currency: Currency,
    page_index: usize,
    page_size: usize,
) -> Vec<TransactionRow> {
    let Some((start, end)) = page_bounds(transactions.len(), page_index, page_size) else {
        return Vec::new();
    };

    transactions[start..end]
        .iter()
        .map(|transaction| project_row(transaction, amounts, user_names, merchant_names, currency))
        .collect()
}

fn project_row(
    transaction: &Transaction,
    amounts: &AmountIndex,
    user_names: &NameIndex,
    merchant_names: &NameIndex,
    currency: Currency,
) -> TransactionRow {
    let date = transaction
        .date
        .as_deref()
        .and_then(parse_transaction_date)
        .map(|value| format_display_date(&value));
    // A shared id must not lend another record's amount to an unpriced row.
    let pair = transaction
        .amount_in_usd_cents
        .cents()
        .and_then(|_| amounts.get(&transaction.id));

    TransactionRow {
        id: transaction.id.clone(),
        unavailable: date.is_none() || pair.is_none(),
        date: date.unwrap_or_else(|| UNAVAILABLE.to_string()),
        amount: pair
            .map(|value| value.formatted(currency))
            .unwrap_or_else(|| UNAVAILABLE.to_string()),
        amount_cents: pair.map(|value| value.amount(currency)),
        card_holder: resolve_name(user_names, &transaction.card_id),
        merchant: resolve_name(merchant_names, &transaction.merchant_network_id),
    }
}

pub(crate) fn resolve_name(names: &NameIndex, key: &str) -> String {
    names
        .get(key)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn page_bounds(total_rows: usize, page_index: usize, page_size: usize) -> Option<(usize, usize)> {
    if page_size == 0 {
        return None;
    }
    let start = page_index.checked_mul(page_size)?;
    if start >= total_rows {
        return None;
    }
    let end = start.saturating_add(page_size).min(total_rows);
    Some((start, end))
}
