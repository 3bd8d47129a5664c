use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::attribution::{attribution_date, filter_attributed, sum_attributed_amount};
use crate::models::{BillableRecord, DateWindow, ExpenseRecord};

/// Group key for records without a doctor or insurer
pub const UNASSIGNED_GROUP: &str = "unassigned";

/// Headline revenue figures for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub total_revenue: Decimal,
    pub record_count: usize,
    /// Records that carry a collected amount
    pub paid_record_count: usize,
    pub average_ticket: Decimal,
}

/// Revenue for one doctor or insurer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRevenue {
    pub key: String,
    pub total_revenue: Decimal,
    pub record_count: usize,
    pub average_ticket: Decimal,
}

/// Granularity of a revenue timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Day,
    /// ISO weeks, starting Monday
    Week,
    #[default]
    Month,
}

/// Revenue falling in one timeline bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRevenue {
    pub bucket_start: NaiveDate,
    pub total_revenue: Decimal,
    pub record_count: usize,
}

/// Revenue against expenses for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub net_income: Decimal,
    pub attributed_record_count: usize,
    pub expense_count: usize,
}

pub fn revenue_summary(records: &[BillableRecord], window: &DateWindow) -> RevenueSummary {
    let attributed = filter_attributed(records, window);
    let total_revenue: Decimal = attributed
        .iter()
        .map(|record| record.paid_amount.unwrap_or(Decimal::ZERO))
        .sum();
    let paid_record_count = attributed.iter().filter(|r| r.paid_amount.is_some()).count();

    RevenueSummary {
        period_start: window.start,
        period_end: window.end,
        total_revenue,
        record_count: attributed.len(),
        paid_record_count,
        average_ticket: average(total_revenue, attributed.len()),
    }
}

pub fn revenue_by_doctor(records: &[BillableRecord], window: &DateWindow) -> Vec<GroupRevenue> {
    group_revenue(records, window, |record| record.doctor.as_deref())
}

pub fn revenue_by_insurer(records: &[BillableRecord], window: &DateWindow) -> Vec<GroupRevenue> {
    group_revenue(records, window, |record| record.insurer.as_deref())
}

/// Revenue per bucket, keyed by each record's attribution date
///
/// Only non-empty buckets are returned, oldest first.
pub fn revenue_timeline(
    records: &[BillableRecord],
    window: &DateWindow,
    bucket: TimeBucket,
) -> Vec<BucketRevenue> {
    let mut buckets: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();

    for record in filter_attributed(records, window) {
        let key = bucket_start(attribution_date(record), bucket);
        let entry = buckets.entry(key).or_insert((Decimal::ZERO, 0));
        entry.0 += record.paid_amount.unwrap_or(Decimal::ZERO);
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket_start, (total_revenue, record_count))| BucketRevenue {
            bucket_start,
            total_revenue,
            record_count,
        })
        .collect()
}

pub fn financial_summary(
    records: &[BillableRecord],
    expenses: &[ExpenseRecord],
    window: &DateWindow,
) -> FinancialSummary {
    let revenue = sum_attributed_amount(records, window);
    let attributed_record_count = filter_attributed(records, window).len();

    let in_window: Vec<&ExpenseRecord> = expenses
        .iter()
        .filter(|expense| window.contains(expense.expense_date))
        .collect();
    let expenses_total: Decimal = in_window.iter().map(|expense| expense.amount).sum();

    FinancialSummary {
        period_start: window.start,
        period_end: window.end,
        revenue,
        expenses: expenses_total,
        net_income: revenue - expenses_total,
        attributed_record_count,
        expense_count: in_window.len(),
    }
}

/// First day of the bucket containing `instant` (UTC calendar)
pub fn bucket_start(instant: DateTime<Utc>, bucket: TimeBucket) -> NaiveDate {
    let date = instant.date_naive();
    match bucket {
        TimeBucket::Day => date,
        TimeBucket::Week => {
            date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
        }
        TimeBucket::Month => date.with_day(1).unwrap_or(date),
    }
}

fn group_revenue<F>(records: &[BillableRecord], window: &DateWindow, key_of: F) -> Vec<GroupRevenue>
where
    F: Fn(&BillableRecord) -> Option<&str>,
{
    let mut groups: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();

    for record in filter_attributed(records, window) {
        let key = key_of(record)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .unwrap_or(UNASSIGNED_GROUP);
        let entry = groups.entry(key.to_string()).or_insert((Decimal::ZERO, 0));
        entry.0 += record.paid_amount.unwrap_or(Decimal::ZERO);
        entry.1 += 1;
    }

    let mut rows: Vec<GroupRevenue> = groups
        .into_iter()
        .map(|(key, (total_revenue, record_count))| GroupRevenue {
            key,
            total_revenue,
            record_count,
            average_ticket: average(total_revenue, record_count),
        })
        .collect();

    // BTreeMap already yields keys ascending; the stable sort keeps that order on ties
    rows.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
    rows
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}
