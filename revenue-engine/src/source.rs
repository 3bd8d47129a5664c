use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RevenueResult;
use crate::models::{BillableRecord, DateWindow, ExpenseRecord};

/// Storage collaborator feeding the revenue engine
///
/// `fetch_candidates` must return every pre-paid/serviced record regardless
/// of its dates, plus every record whose service date lies in `window`.
/// Pre-filtering pre-paid/serviced records by service date would hide the
/// ones whose creation date places them in `window`.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_candidates(&self, window: &DateWindow) -> RevenueResult<Vec<BillableRecord>>;

    async fn fetch_expenses(&self, window: &DateWindow) -> RevenueResult<Vec<ExpenseRecord>>;
}

/// Seed file layout: `{ "records": [...], "expenses": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    #[serde(default)]
    pub records: Vec<BillableRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

/// Immutable in-memory record store
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSource {
    snapshot: RecordSnapshot,
}

impl InMemoryRecordSource {
    pub fn new(records: Vec<BillableRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            snapshot: RecordSnapshot { records, expenses },
        }
    }

    pub fn from_snapshot(snapshot: RecordSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn record_count(&self) -> usize {
        self.snapshot.records.len()
    }

    pub fn expense_count(&self) -> usize {
        self.snapshot.expenses.len()
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch_candidates(&self, window: &DateWindow) -> RevenueResult<Vec<BillableRecord>> {
        Ok(self
            .snapshot
            .records
            .iter()
            .filter(|record| {
                record.status.as_ref().is_some_and(|s| s.is_pre_paid_serviced())
                    || window.contains(record.service_date)
            })
            .cloned()
            .collect())
    }

    async fn fetch_expenses(&self, window: &DateWindow) -> RevenueResult<Vec<ExpenseRecord>> {
        Ok(self
            .snapshot
            .expenses
            .iter()
            .filter(|expense| window.contains(expense.expense_date))
            .cloned()
            .collect())
    }
}
