pub mod issues;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::money::MoneyPair;
use crate::records::{Merchant, RawAmount, RecordKind, Transaction, User};

pub use issues::{IssueKind, IssueSeverity, RecordIssue};

/// Identifier → display name, in first-seen order.
pub type NameIndex = IndexMap<String, String>;

/// Identifier → amount pair, in first-seen order.
pub type AmountIndex = IndexMap<String, MoneyPair>;

/// Everything derived from one set of users, merchants, and transactions.
///
/// Built in one go by [`aggregate`] and never patched afterwards; a new
/// cycle produces a new value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregateResult {
    pub user_names: NameIndex,
    pub merchant_names: NameIndex,
    pub transaction_amounts: AmountIndex,
    pub user_totals: AmountIndex,
    pub issues: Vec<RecordIssue>,
}

impl AggregateResult {
    pub fn user_name(&self, card_id: &str) -> Option<&str> {
        self.user_names.get(card_id).map(String::as_str)
    }

    pub fn merchant_name(&self, network_id: &str) -> Option<&str> {
        self.merchant_names.get(network_id).map(String::as_str)
    }

    pub fn excluded_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.kind.excludes_record())
            .count()
    }
}

pub fn aggregate(
    users: &[User],
    merchants: &[Merchant],
    transactions: &[Transaction],
) -> AggregateResult {
    let mut issues = Vec::new();
    let user_names = index_user_names(users, &mut issues);
    let merchant_names = index_merchant_names(merchants, &mut issues);

    let folded = transactions.iter().enumerate().fold(
        TransactionFold::default(),
        |mut acc, (index, transaction)| {
            acc.push(
                (index as i64) + 1,
                transaction,
                &user_names,
                &merchant_names,
            );
            acc
        },
    );
    issues.extend(folded.issues);

    debug!(
        users = user_names.len(),
        merchants = merchant_names.len(),
        priced_transactions = folded.amounts.len(),
        card_holders = folded.totals.len(),
        issues = issues.len(),
        "aggregate pass complete"
    );

    AggregateResult {
        user_names,
        merchant_names,
        transaction_amounts: folded.amounts,
        user_totals: folded.totals,
        issues,
    }
}

fn index_user_names(users: &[User], issues: &mut Vec<RecordIssue>) -> NameIndex {
    let mut names = NameIndex::with_capacity(users.len());
    for (index, user) in users.iter().enumerate() {
        if names
            .insert(user.card_id.clone(), user.display_name())
            .is_some()
        {
            warn!(card_id = %user.card_id, "duplicate card id; later user wins");
            issues.push(
                RecordIssue::new(
                    IssueKind::DuplicateCardId,
                    RecordKind::User,
                    (index as i64) + 1,
                    format!(
                        "cardId \"{}\" appears more than once; the later user's name is used.",
                        user.card_id
                    ),
                )
                .with_key(&user.card_id)
                .with_field("cardId"),
            );
        }
    }
    names
}

fn index_merchant_names(merchants: &[Merchant], issues: &mut Vec<RecordIssue>) -> NameIndex {
    let mut names = NameIndex::with_capacity(merchants.len());
    for (index, merchant) in merchants.iter().enumerate() {
        if names
            .insert(merchant.network_id.clone(), merchant.name.clone())
            .is_some()
        {
            warn!(network_id = %merchant.network_id, "duplicate network id; later merchant wins");
            issues.push(
                RecordIssue::new(
                    IssueKind::DuplicateNetworkId,
                    RecordKind::Merchant,
                    (index as i64) + 1,
                    format!(
                        "networkId \"{}\" appears more than once; the later merchant's name is used.",
                        merchant.network_id
                    ),
                )
                .with_key(&merchant.network_id)
                .with_field("networkId"),
            );
        }
    }
    names
}

#[derive(Default)]
struct TransactionFold {
    amounts: AmountIndex,
    totals: AmountIndex,
    issues: Vec<RecordIssue>,
}

impl TransactionFold {
    fn push(
        &mut self,
        row: i64,
        transaction: &Transaction,
        user_names: &NameIndex,
        merchant_names: &NameIndex,
    ) {
        if !user_names.contains_key(&transaction.card_id) {
            self.issues.push(
                RecordIssue::new(
                    IssueKind::MissingUserReference,
                    RecordKind::Transaction,
                    row,
                    format!(
                        "cardId \"{}\" does not match any user.",
                        transaction.card_id
                    ),
                )
                .with_key(&transaction.id)
                .with_field("cardId")
                .with_received(&transaction.card_id),
            );
        }
        if !merchant_names.contains_key(&transaction.merchant_network_id) {
            self.issues.push(
                RecordIssue::new(
                    IssueKind::MissingMerchantReference,
                    RecordKind::Transaction,
                    row,
                    format!(
                        "merchantNetworkId \"{}\" does not match any merchant.",
                        transaction.merchant_network_id
                    ),
                )
                .with_key(&transaction.id)
                .with_field("merchantNetworkId")
                .with_received(&transaction.merchant_network_id),
            );
        }

        let cents = match &transaction.amount_in_usd_cents {
            RawAmount::Cents(value) => *value,
            RawAmount::Missing => {
                warn!(transaction_id = %transaction.id, "transaction skipped: amount missing");
                self.issues.push(
                    RecordIssue::new(
                        IssueKind::MissingAmount,
                        RecordKind::Transaction,
                        row,
                        "amountInUSDCents must be present.".to_string(),
                    )
                    .with_key(&transaction.id)
                    .with_field("amountInUSDCents"),
                );
                return;
            }
            RawAmount::Invalid(raw) => {
                warn!(transaction_id = %transaction.id, amount = %raw, "transaction skipped: amount invalid");
                self.issues.push(
                    RecordIssue::new(
                        IssueKind::InvalidAmount,
                        RecordKind::Transaction,
                        row,
                        format!("amountInUSDCents must be a whole number of cents; got \"{raw}\""),
                    )
                    .with_key(&transaction.id)
                    .with_field("amountInUSDCents")
                    .with_received(raw),
                );
                return;
            }
        };

        let pair = MoneyPair::from_usd_cents(cents);
        if self
            .amounts
            .insert(transaction.id.clone(), pair)
            .is_some()
        {
            warn!(transaction_id = %transaction.id, "duplicate transaction id; later amount wins");
            self.issues.push(
                RecordIssue::new(
                    IssueKind::DuplicateTransactionId,
                    RecordKind::Transaction,
                    row,
                    format!(
                        "id \"{}\" appears more than once; the later amount is shown for it.",
                        transaction.id
                    ),
                )
                .with_key(&transaction.id)
                .with_field("id"),
            );
        }

        let current = self
            .totals
            .get(&transaction.card_id)
            .copied()
            .unwrap_or_default();
        match current.checked_add(pair) {
            Some(total) => {
                self.totals.insert(transaction.card_id.clone(), total);
            }
            None => {
                warn!(transaction_id = %transaction.id, card_id = %transaction.card_id, "total out of range; transaction left out of it");
                self.issues.push(
                    RecordIssue::new(
                        IssueKind::TotalOutOfRange,
                        RecordKind::Transaction,
                        row,
                        format!(
                            "adding this amount would push the total for card \"{}\" past the largest exact amount; it is left out of that total.",
                            transaction.card_id
                        ),
                    )
                    .with_key(&transaction.id)
                    .with_field("amountInUSDCents")
                    .with_received(&cents.to_string()),
                );
            }
        }
    }
}
