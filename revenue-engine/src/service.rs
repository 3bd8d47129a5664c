use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

use crate::attribution::filter_attributed;
use crate::clock::{Clock, SystemClock};
use crate::error::{RevenueError, RevenueResult};
use crate::models::{BillableRecord, DateWindow};
use crate::reporting::{self, BucketRevenue, FinancialSummary, GroupRevenue, RevenueSummary, TimeBucket};
use crate::source::RecordSource;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Aggregation entry point used by the dashboard endpoints
///
/// Resolves the requested window, fetches candidates from the record source
/// and runs the attribution engine over them.
#[derive(Clone)]
pub struct RevenueService {
    source: Arc<dyn RecordSource>,
    clock: Arc<dyn Clock>,
    default_window_days: u32,
}

impl RevenueService {
    /// Create a revenue service on the wall clock
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_default_window_days(mut self, days: u32) -> RevenueResult<Self> {
        if days == 0 {
            return Err(RevenueError::Config(
                "default window must span at least one day".to_string(),
            ));
        }
        self.default_window_days = days;
        Ok(self)
    }

    pub fn default_window_days(&self) -> u32 {
        self.default_window_days
    }

    /// Fill in missing boundaries
    ///
    /// The end defaults to the injected clock's "now" and the start to
    /// `default_window_days` before the end, clamped to the earliest
    /// representable instant. An explicit start after the end is kept as-is
    /// and matches no pre-paid/serviced record.
    pub fn resolve_window(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> DateWindow {
        let end = end.unwrap_or_else(|| self.clock.now());
        let start = start.unwrap_or_else(|| {
            end.checked_sub_signed(Duration::days(i64::from(self.default_window_days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        });

        let window = DateWindow::new(start, end);
        if window.is_empty() {
            debug!(start = %window.start, end = %window.end, "Window starts after it ends");
        }
        window
    }

    #[instrument(skip(self, window), fields(start = %window.start, end = %window.end))]
    pub async fn attributed_records(&self, window: &DateWindow) -> RevenueResult<Vec<BillableRecord>> {
        let candidates = self.candidates(window).await?;
        let attributed: Vec<BillableRecord> =
            filter_attributed(&candidates, window).into_iter().cloned().collect();
        debug!(attributed = attributed.len(), "Attributed records selected");
        Ok(attributed)
    }

    #[instrument(skip(self, window), fields(start = %window.start, end = %window.end))]
    pub async fn revenue_summary(&self, window: &DateWindow) -> RevenueResult<RevenueSummary> {
        let candidates = self.candidates(window).await?;
        let summary = reporting::revenue_summary(&candidates, window);
        debug!(
            total_revenue = %summary.total_revenue,
            records = summary.record_count,
            "Revenue summary computed"
        );
        Ok(summary)
    }

    #[instrument(skip(self, window), fields(start = %window.start, end = %window.end))]
    pub async fn revenue_by_doctor(&self, window: &DateWindow) -> RevenueResult<Vec<GroupRevenue>> {
        let candidates = self.candidates(window).await?;
        Ok(reporting::revenue_by_doctor(&candidates, window))
    }

    #[instrument(skip(self, window), fields(start = %window.start, end = %window.end))]
    pub async fn revenue_by_insurer(&self, window: &DateWindow) -> RevenueResult<Vec<GroupRevenue>> {
        let candidates = self.candidates(window).await?;
        Ok(reporting::revenue_by_insurer(&candidates, window))
    }

    #[instrument(skip(self, window), fields(start = %window.start, end = %window.end))]
    pub async fn revenue_timeline(
        &self,
        window: &DateWindow,
        bucket: TimeBucket,
    ) -> RevenueResult<Vec<BucketRevenue>> {
        let candidates = self.candidates(window).await?;
        Ok(reporting::revenue_timeline(&candidates, window, bucket))
    }

    #[instrument(skip(self, window), fields(start = %window.start, end = %window.end))]
    pub async fn financial_summary(&self, window: &DateWindow) -> RevenueResult<FinancialSummary> {
        let candidates = self.candidates(window).await?;
        let expenses = self.source.fetch_expenses(window).await?;
        let summary = reporting::financial_summary(&candidates, &expenses, window);
        debug!(
            revenue = %summary.revenue,
            expenses = %summary.expenses,
            net_income = %summary.net_income,
            "Financial summary computed"
        );
        Ok(summary)
    }

    async fn candidates(&self, window: &DateWindow) -> RevenueResult<Vec<BillableRecord>> {
        let candidates = self.source.fetch_candidates(window).await?;
        debug!(candidates = candidates.len(), "Candidate records fetched");
        Ok(candidates)
    }
}
