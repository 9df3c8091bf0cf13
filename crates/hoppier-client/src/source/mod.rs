mod directory;
pub(crate) mod parse;
mod validate;

use std::thread;

use tracing::debug;

use crate::aggregate::RecordIssue;
use crate::records::{Merchant, RecordKind, Transaction, User};
use crate::{ClientError, ClientResult};

pub use directory::DirectorySource;
pub use parse::SourceFormat;

/// Records from one read, plus the entries that had to be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch<T> {
    pub records: Vec<T>,
    pub issues: Vec<RecordIssue>,
}

impl<T> Default for SourceBatch<T> {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

impl<T> SourceBatch<T> {
    pub fn from_records(records: Vec<T>) -> Self {
        Self {
            records,
            issues: Vec::new(),
        }
    }
}

/// Three independent reads; any of them may run on its own thread.
pub trait DataSource: Sync {
    fn users(&self) -> ClientResult<SourceBatch<User>>;
    fn merchants(&self) -> ClientResult<SourceBatch<Merchant>>;
    fn transactions(&self) -> ClientResult<SourceBatch<Transaction>>;
}

/// All three record sets of one cycle, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSets {
    pub users: Vec<User>,
    pub merchants: Vec<Merchant>,
    pub transactions: Vec<Transaction>,
    pub issues: Vec<RecordIssue>,
}

/// In-memory source, for callers that already hold the records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub users: Vec<User>,
    pub merchants: Vec<Merchant>,
    pub transactions: Vec<Transaction>,
}

impl DataSource for StaticSource {
    fn users(&self) -> ClientResult<SourceBatch<User>> {
        Ok(SourceBatch::from_records(self.users.clone()))
    }

    fn merchants(&self) -> ClientResult<SourceBatch<Merchant>> {
        Ok(SourceBatch::from_records(self.merchants.clone()))
    }

    fn transactions(&self) -> ClientResult<SourceBatch<Transaction>> {
        Ok(SourceBatch::from_records(self.transactions.clone()))
    }
}

/// Runs the three reads concurrently and waits for all of them.
///
/// Fails if any read fails; partial record sets are never returned.
pub fn fetch_all(source: &dyn DataSource) -> ClientResult<RecordSets> {
    let (users, merchants, transactions) = thread::scope(|scope| {
        let users = scope.spawn(|| source.users());
        let merchants = scope.spawn(|| source.merchants());
        let transactions = scope.spawn(|| source.transactions());
        (
            join_read(users.join(), RecordKind::User),
            join_read(merchants.join(), RecordKind::Merchant),
            join_read(transactions.join(), RecordKind::Transaction),
        )
    });
    let users = users?;
    let merchants = merchants?;
    let transactions = transactions?;

    debug!(
        users = users.records.len(),
        merchants = merchants.records.len(),
        transactions = transactions.records.len(),
        "all source reads joined"
    );

    let mut issues = users.issues;
    issues.extend(merchants.issues);
    issues.extend(transactions.issues);

    Ok(RecordSets {
        users: users.records,
        merchants: merchants.records,
        transactions: transactions.records,
        issues,
    })
}

fn join_read<T>(
    joined: thread::Result<ClientResult<SourceBatch<T>>>,
    kind: RecordKind,
) -> ClientResult<SourceBatch<T>> {
    match joined {
        Ok(result) => result,
        Err(_) => Err(ClientError::fetch_failed(kind, "the reader stopped unexpectedly")),
    }
}
