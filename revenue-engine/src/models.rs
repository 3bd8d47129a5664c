use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status label the clinic system writes for pre-paid appointments that
/// have already been serviced
pub const PRE_PAID_SERVICED_LABEL: &str = "PRÉ-PAGO ATENDIDO";

/// Workflow state of a billing record
///
/// Only the pre-paid/serviced state changes attribution. The remaining
/// states come from the upstream clinic system as free text and are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillingStatus {
    PrePaidServiced,
    Other(String),
}

impl BillingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillingStatus::PrePaidServiced => PRE_PAID_SERVICED_LABEL,
            BillingStatus::Other(label) => label,
        }
    }

    pub fn is_pre_paid_serviced(&self) -> bool {
        matches!(self, BillingStatus::PrePaidServiced)
    }
}

impl From<String> for BillingStatus {
    fn from(label: String) -> Self {
        if label == PRE_PAID_SERVICED_LABEL {
            BillingStatus::PrePaidServiced
        } else {
            BillingStatus::Other(label)
        }
    }
}

impl From<&str> for BillingStatus {
    fn from(label: &str) -> Self {
        BillingStatus::from(label.to_string())
    }
}

impl From<BillingStatus> for String {
    fn from(status: BillingStatus) -> Self {
        match status {
            BillingStatus::PrePaidServiced => PRE_PAID_SERVICED_LABEL.to_string(),
            BillingStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the fields that decide attribution
///
/// Anything stored with a status, a service date, an optional creation date
/// and an optional collected amount can be attributed without first being
/// converted into a [`BillableRecord`].
pub trait Billable {
    fn status(&self) -> Option<&BillingStatus>;
    fn service_date(&self) -> DateTime<Utc>;
    fn record_created_date(&self) -> Option<DateTime<Utc>>;
    fn paid_amount(&self) -> Option<Decimal>;
}

/// Appointment billing line as fetched for a dashboard request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillableRecord {
    pub id: Uuid,
    #[serde(default)]
    pub status: Option<BillingStatus>,
    pub service_date: DateTime<Utc>,
    #[serde(default)]
    pub record_created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_amount: Option<Decimal>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub insurer: Option<String>,
}

impl BillableRecord {
    pub fn new(service_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: None,
            service_date,
            record_created_date: None,
            paid_amount: None,
            doctor: None,
            insurer: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<BillingStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_created_date(mut self, created: DateTime<Utc>) -> Self {
        self.record_created_date = Some(created);
        self
    }

    pub fn with_paid_amount(mut self, amount: Decimal) -> Self {
        self.paid_amount = Some(amount);
        self
    }

    pub fn with_doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor = Some(doctor.into());
        self
    }

    pub fn with_insurer(mut self, insurer: impl Into<String>) -> Self {
        self.insurer = Some(insurer.into());
        self
    }
}

impl Billable for BillableRecord {
    fn status(&self) -> Option<&BillingStatus> {
        self.status.as_ref()
    }

    fn service_date(&self) -> DateTime<Utc> {
        self.service_date
    }

    fn record_created_date(&self) -> Option<DateTime<Utc>> {
        self.record_created_date
    }

    fn paid_amount(&self) -> Option<Decimal> {
        self.paid_amount
    }
}

impl<T: Billable + ?Sized> Billable for &T {
    fn status(&self) -> Option<&BillingStatus> {
        (**self).status()
    }

    fn service_date(&self) -> DateTime<Utc> {
        (**self).service_date()
    }

    fn record_created_date(&self) -> Option<DateTime<Utc>> {
        (**self).record_created_date()
    }

    fn paid_amount(&self) -> Option<Decimal> {
        (**self).paid_amount()
    }
}

/// Clinic expense (rent, supplies, payroll...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: Decimal,
    pub expense_date: DateTime<Utc>,
}

/// Inclusive reporting period `[start, end]`
///
/// Not validated: a window whose start is after its end contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_round_trips_through_label() {
        let status: BillingStatus = serde_json::from_str("\"PRÉ-PAGO ATENDIDO\"").unwrap();
        assert_eq!(status, BillingStatus::PrePaidServiced);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"PRÉ-PAGO ATENDIDO\"");

        let other: BillingStatus = serde_json::from_str("\"PAGO\"").unwrap();
        assert_eq!(other, BillingStatus::Other("PAGO".to_string()));
    }

    #[test]
    fn test_status_match_is_exact() {
        assert!(!BillingStatus::from("pré-pago atendido").is_pre_paid_serviced());
        assert!(!BillingStatus::from("PRE-PAGO ATENDIDO").is_pre_paid_serviced());
        assert!(BillingStatus::from(PRE_PAID_SERVICED_LABEL).is_pre_paid_serviced());
    }

    #[test]
    fn test_record_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": "6f1c1f9e-8f3a-4a4e-9f57-3f0b8c1f2a10",
            "service_date": "2025-06-01T00:00:00Z"
        }"#;
        let record: BillableRecord = serde_json::from_str(json).unwrap();
        assert!(record.status.is_none());
        assert!(record.paid_amount.is_none());
        assert!(record.record_created_date.is_none());
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let window = DateWindow::new(start, end);

        assert!(window.contains(start));
        assert!(window.contains(end));
        assert!(!window.contains(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_inverted_window_contains_nothing() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let window = DateWindow::new(start, end);

        assert!(window.is_empty());
        assert!(!window.contains(start));
        assert!(!window.contains(end));
    }
}
