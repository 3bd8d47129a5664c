//! Period attribution for billable records
//!
//! Callers fetch a broad candidate set from storage (everything whose service
//! date falls in the window, plus every pre-paid/serviced record regardless of
//! date) and hand it here. Ordinary records are already in scope by the time
//! they arrive. Pre-paid/serviced records are reconsidered: they count toward
//! the period containing the earlier of their service date and their creation
//! date, so a booking paid months before the visit shows up exactly once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{Billable, DateWindow};

/// Date that decides which period a record belongs to
///
/// For pre-paid/serviced records this is the creation date when it is
/// strictly earlier than the service date; ties and later creation dates
/// keep the service date. Every other record is governed by its service date.
pub fn attribution_date<R: Billable + ?Sized>(record: &R) -> DateTime<Utc> {
    let service_date = record.service_date();

    if !is_pre_paid_serviced(record) {
        return service_date;
    }

    match record.record_created_date() {
        Some(created) if created < service_date => created,
        _ => service_date,
    }
}

/// Whether `record` counts toward `window`
pub fn should_attribute_to_period<R: Billable + ?Sized>(record: &R, window: &DateWindow) -> bool {
    if !is_pre_paid_serviced(record) {
        return true;
    }

    window.contains(attribution_date(record))
}

/// Records that count toward `window`, in input order
pub fn filter_attributed<'a, R: Billable>(records: &'a [R], window: &DateWindow) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| should_attribute_to_period(*record, window))
        .collect()
}

/// Collected amount of the records that count toward `window`
///
/// Missing amounts contribute zero.
pub fn sum_attributed_amount<R: Billable>(records: &[R], window: &DateWindow) -> Decimal {
    records
        .iter()
        .filter(|record| should_attribute_to_period(*record, window))
        .map(|record| record.paid_amount().unwrap_or(Decimal::ZERO))
        .sum()
}

fn is_pre_paid_serviced<R: Billable + ?Sized>(record: &R) -> bool {
    record
        .status()
        .is_some_and(|status| status.is_pre_paid_serviced())
}
