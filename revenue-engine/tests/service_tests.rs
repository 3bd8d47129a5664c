//! Revenue service tests over the in-memory record source
//!
//! Covers the storage contract (pre-paid/serviced records are always
//! fetched), default windows on an injected clock, and the aggregations the
//! dashboard renders.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use revenue_engine::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn december_2025() -> DateWindow {
    DateWindow::new(day(2025, 12, 1), day(2025, 12, 31))
}

fn january_2026() -> DateWindow {
    DateWindow::new(day(2026, 1, 1), day(2026, 1, 31))
}

fn expense(description: &str, amount: i64, date: DateTime<Utc>) -> ExpenseRecord {
    ExpenseRecord {
        id: Uuid::new_v4(),
        description: description.to_string(),
        category: Some("operations".to_string()),
        amount: Decimal::from(amount),
        expense_date: date,
    }
}

/// A small month of clinic activity
fn clinic_records() -> Vec<BillableRecord> {
    vec![
        // Booked and paid in December, seen in January
        BillableRecord::new(day(2026, 1, 20))
            .with_status(PRE_PAID_SERVICED_LABEL)
            .with_created_date(day(2025, 12, 1))
            .with_paid_amount(Decimal::from(500))
            .with_doctor("Dra. Souza")
            .with_insurer("Unimed"),
        BillableRecord::new(day(2026, 1, 5))
            .with_status("PAGO")
            .with_paid_amount(Decimal::from(300))
            .with_doctor("Dr. Lima")
            .with_insurer("Bradesco Saúde"),
        BillableRecord::new(day(2026, 1, 12))
            .with_status("PAGO")
            .with_paid_amount(Decimal::from(200))
            .with_doctor("Dra. Souza"),
        BillableRecord::new(day(2026, 1, 28))
            .with_status("AGENDADO")
            .with_doctor("Dr. Lima")
            .with_insurer("Unimed"),
        // Old ordinary record, outside every window below
        BillableRecord::new(day(2025, 6, 1))
            .with_status("PAGO")
            .with_paid_amount(Decimal::from(999)),
    ]
}

fn service_over(records: Vec<BillableRecord>, expenses: Vec<ExpenseRecord>) -> RevenueService {
    RevenueService::new(Arc::new(InMemoryRecordSource::new(records, expenses)))
        .with_clock(Arc::new(FixedClock(day(2026, 1, 31))))
}

#[tokio::test]
async fn test_source_returns_prepaid_records_outside_window() {
    let source = InMemoryRecordSource::new(clinic_records(), Vec::new());

    let december = source.fetch_candidates(&december_2025()).await.unwrap();
    assert_eq!(december.len(), 1);
    assert_eq!(december[0].status, Some(BillingStatus::PrePaidServiced));

    let january = source.fetch_candidates(&january_2026()).await.unwrap();
    assert_eq!(january.len(), 4);
}

#[tokio::test]
async fn test_prepaid_revenue_lands_in_booking_month() {
    let service = service_over(clinic_records(), Vec::new());

    let december = service.revenue_summary(&december_2025()).await.unwrap();
    assert_eq!(december.total_revenue, Decimal::from(500));
    assert_eq!(december.record_count, 1);

    let january = service.revenue_summary(&january_2026()).await.unwrap();
    assert_eq!(january.total_revenue, Decimal::from(500));
    assert_eq!(january.record_count, 3);
    assert_eq!(january.paid_record_count, 2);
    assert_eq!(january.average_ticket, Decimal::new(16667, 2));
}

#[tokio::test]
async fn test_attributed_records_keep_source_order() {
    let service = service_over(clinic_records(), Vec::new());

    let records = service.attributed_records(&january_2026()).await.unwrap();
    let dates: Vec<_> = records.iter().map(|r| r.service_date).collect();
    assert_eq!(dates, vec![day(2026, 1, 5), day(2026, 1, 12), day(2026, 1, 28)]);
}

#[tokio::test]
async fn test_revenue_by_doctor_orders_by_total() {
    let service = service_over(clinic_records(), Vec::new());
    let window = DateWindow::new(day(2025, 12, 1), day(2026, 1, 31));

    let rows = service.revenue_by_doctor(&window).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key, "Dra. Souza");
    assert_eq!(rows[0].total_revenue, Decimal::from(700));
    assert_eq!(rows[0].record_count, 2);
    assert_eq!(rows[0].average_ticket, Decimal::from(350));
    assert_eq!(rows[1].key, "Dr. Lima");
    assert_eq!(rows[1].total_revenue, Decimal::from(300));
    assert_eq!(rows[1].record_count, 2);
}

#[tokio::test]
async fn test_revenue_by_insurer_groups_self_pay_as_unassigned() {
    let service = service_over(clinic_records(), Vec::new());

    let rows = service.revenue_by_insurer(&january_2026()).await.unwrap();
    let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["Bradesco Saúde", UNASSIGNED_GROUP, "Unimed"]);

    let unimed = rows.iter().find(|r| r.key == "Unimed").unwrap();
    assert_eq!(unimed.total_revenue, Decimal::ZERO);
    assert_eq!(unimed.record_count, 1);
}

#[tokio::test]
async fn test_timeline_buckets_prepaid_by_attribution_date() {
    let service = service_over(clinic_records(), Vec::new());
    let window = DateWindow::new(day(2025, 12, 1), day(2026, 1, 31));

    let buckets = service.revenue_timeline(&window, TimeBucket::Month).await.unwrap();
    assert_eq!(
        buckets,
        vec![
            BucketRevenue {
                bucket_start: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
                total_revenue: Decimal::from(500),
                record_count: 1,
            },
            BucketRevenue {
                bucket_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                total_revenue: Decimal::from(500),
                record_count: 3,
            },
        ]
    );
}

#[tokio::test]
async fn test_financial_summary_nets_expenses() {
    let expenses = vec![
        expense("Aluguel", 150, day(2026, 1, 10)),
        expense("Material", 50, day(2026, 1, 31)),
        expense("Aluguel", 150, day(2025, 12, 10)),
    ];
    let service = service_over(clinic_records(), expenses);

    let summary = service.financial_summary(&january_2026()).await.unwrap();
    assert_eq!(summary.revenue, Decimal::from(500));
    assert_eq!(summary.expenses, Decimal::from(200));
    assert_eq!(summary.net_income, Decimal::from(300));
    assert_eq!(summary.expense_count, 2);
    assert_eq!(summary.attributed_record_count, 3);
}

#[tokio::test]
async fn test_financial_summary_can_go_negative() {
    let service = service_over(Vec::new(), vec![expense("Aluguel", 150, day(2026, 1, 10))]);

    let summary = service.financial_summary(&january_2026()).await.unwrap();
    assert_eq!(summary.revenue, Decimal::ZERO);
    assert_eq!(summary.net_income, Decimal::from(-150));
}

#[test]
fn test_resolve_window_uses_injected_clock() {
    let service = service_over(Vec::new(), Vec::new()).with_default_window_days(7).unwrap();

    let window = service.resolve_window(None, None);
    assert_eq!(window.end, day(2026, 1, 31));
    assert_eq!(window.start, day(2026, 1, 24));

    let explicit_end = service.resolve_window(None, Some(day(2025, 12, 31)));
    assert_eq!(explicit_end.start, day(2025, 12, 24));

    let explicit = service.resolve_window(Some(day(2025, 12, 1)), None);
    assert_eq!(explicit, DateWindow::new(day(2025, 12, 1), day(2026, 1, 31)));
}

#[test]
fn test_default_start_clamps_at_earliest_instant() {
    let service = service_over(Vec::new(), Vec::new());
    let near_floor = DateTime::<Utc>::MIN_UTC + chrono::Duration::days(10);

    let window = service.resolve_window(None, Some(near_floor));
    assert_eq!(window.start, DateTime::<Utc>::MIN_UTC);
    assert_eq!(window.end, near_floor);

    let far_past_end = parse_window_end("-262143-01-01").unwrap();
    let parsed = service.resolve_window(None, Some(far_past_end));
    assert!(parsed.start <= parsed.end);

    let floor = service.resolve_window(None, Some(DateTime::<Utc>::MIN_UTC));
    assert_eq!(floor.start, DateTime::<Utc>::MIN_UTC);
}

#[test]
fn test_zero_day_default_window_rejected() {
    let result = service_over(Vec::new(), Vec::new()).with_default_window_days(0);
    assert!(matches!(result, Err(RevenueError::Config(_))));
}

struct OfflineSource;

#[async_trait]
impl RecordSource for OfflineSource {
    async fn fetch_candidates(&self, _window: &DateWindow) -> RevenueResult<Vec<BillableRecord>> {
        Err(RevenueError::Source("connection refused".to_string()))
    }

    async fn fetch_expenses(&self, _window: &DateWindow) -> RevenueResult<Vec<ExpenseRecord>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_source_failures_propagate() {
    let service = RevenueService::new(Arc::new(OfflineSource));

    let err = service.revenue_summary(&january_2026()).await.unwrap_err();
    assert!(matches!(err, RevenueError::Source(_)));
    assert_eq!(err.code(), error_common::codes::revenue::SOURCE_UNAVAILABLE);
}

#[tokio::test]
async fn test_concurrent_requests_share_one_service() {
    let service = Arc::new(service_over(clinic_records(), Vec::new()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let window = if i % 2 == 0 { december_2025() } else { january_2026() };
                service.revenue_summary(&window).await.map(|s| s.total_revenue)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), Decimal::from(500));
    }
}

#[test]
fn test_snapshot_parses_seed_layout() {
    let json = r#"{
        "records": [
            {
                "id": "0d7f3c9a-55b5-4b0e-8d49-1f7c0f6f3e21",
                "status": "PRÉ-PAGO ATENDIDO",
                "service_date": "2026-01-20T00:00:00Z",
                "record_created_date": "2025-12-01T00:00:00Z",
                "paid_amount": "500.00",
                "doctor": "Dra. Souza"
            }
        ]
    }"#;

    let snapshot: RecordSnapshot = serde_json::from_str(json).unwrap();
    assert!(snapshot.expenses.is_empty());
    let source = InMemoryRecordSource::from_snapshot(snapshot);
    assert_eq!(source.record_count(), 1);
    assert_eq!(source.expense_count(), 0);
}
