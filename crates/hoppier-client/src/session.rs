use std::sync::Arc;

use tracing::{debug, info};
use ulid::Ulid;

use crate::aggregate::{AggregateResult, RecordIssue, aggregate};
use crate::money::Currency;
use crate::records::{Merchant, Transaction, User};
use crate::source::{DataSource, RecordSets, fetch_all};
use crate::view::{
    PageWindow, TransactionRow, UserTotalRow, project_transaction_page, project_user_ranking,
};
use crate::{ClientError, ClientResult};

/// The raw records of one cycle together with everything derived from them.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub cycle_id: String,
    pub users: Vec<User>,
    pub merchants: Vec<Merchant>,
    pub transactions: Vec<Transaction>,
    pub source_issues: Vec<RecordIssue>,
    pub aggregate: AggregateResult,
}

impl Snapshot {
    pub fn build(cycle_id: &str, records: RecordSets) -> Self {
        let aggregate = aggregate(&records.users, &records.merchants, &records.transactions);
        Self {
            cycle_id: cycle_id.to_string(),
            users: records.users,
            merchants: records.merchants,
            transactions: records.transactions,
            source_issues: records.issues,
            aggregate,
        }
    }

    pub fn issues(&self) -> impl Iterator<Item = &RecordIssue> {
        self.source_issues.iter().chain(self.aggregate.issues.iter())
    }

    pub fn transaction_page(
        &self,
        currency: Currency,
        page_index: usize,
        page_size: usize,
    ) -> (PageWindow, Vec<TransactionRow>) {
        let rows = project_transaction_page(
            &self.transactions,
            &self.aggregate.transaction_amounts,
            &self.aggregate.user_names,
            &self.aggregate.merchant_names,
            currency,
            page_index,
            page_size,
        );
        let window = PageWindow::new(self.transactions.len(), page_index, page_size);
        (window, rows)
    }

    pub fn user_ranking(&self, currency: Currency) -> Vec<UserTotalRow> {
        project_user_ranking(
            &self.aggregate.user_totals,
            &self.aggregate.user_names,
            currency,
        )
    }
}

/// Claim on the cycle started by [`ViewSession::begin_cycle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    generation: u64,
    cycle_id: String,
}

impl CycleTicket {
    pub fn cycle_id(&self) -> &str {
        &self.cycle_id
    }
}

/// Holds the current snapshot and replaces it wholesale on each refresh.
///
/// Only the most recently started cycle may install its result. Results of
/// cycles started earlier are dropped.
#[derive(Debug, Default)]
pub struct ViewSession {
    generation: u64,
    current: Option<Arc<Snapshot>>,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    pub fn begin_cycle(&mut self) -> CycleTicket {
        self.generation += 1;
        let ticket = CycleTicket {
            generation: self.generation,
            cycle_id: format!("cyc_{}", Ulid::new()),
        };
        debug!(cycle_id = %ticket.cycle_id, generation = ticket.generation, "aggregate cycle started");
        ticket
    }

    pub fn is_current(&self, ticket: &CycleTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Installs `snapshot` if `ticket` still names the newest cycle.
    pub fn complete(&mut self, ticket: &CycleTicket, snapshot: Snapshot) -> Option<Arc<Snapshot>> {
        if !self.is_current(ticket) {
            debug!(cycle_id = %ticket.cycle_id, "stale aggregate cycle discarded");
            return None;
        }
        let installed = Arc::new(snapshot);
        self.current = Some(Arc::clone(&installed));
        info!(
            cycle_id = %ticket.cycle_id,
            transactions = installed.transactions.len(),
            issues = installed.issues().count(),
            "snapshot installed"
        );
        Some(installed)
    }

    pub fn refresh(&mut self, source: &dyn DataSource) -> ClientResult<Arc<Snapshot>> {
        let ticket = self.begin_cycle();
        let records = fetch_all(source)?;
        let snapshot = Snapshot::build(ticket.cycle_id(), records);
        self.complete(&ticket, snapshot)
            .ok_or_else(|| ClientError::cycle_superseded(ticket.cycle_id()))
    }
}
