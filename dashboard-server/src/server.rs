use std::sync::Arc;
use std::time::Instant;

use config_engine::DashboardConfig;
use error_common::{ClinicError, Result};
use logger_redacted::{PiiRedactor, RedactionConfig};
use revenue_engine::{
    parse_optional_window, Clock, DateWindow, InMemoryRecordSource, RecordSource, RevenueError,
    RevenueService,
};
use tracing::info;

use crate::error::ApiError;
use crate::storage;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct DashboardServer {
    pub revenue: RevenueService,
    redactor: PiiRedactor,
    started_at: Instant,
}

impl DashboardServer {
    pub fn new(revenue: RevenueService, redaction_enabled: bool) -> Self {
        let redaction = if redaction_enabled {
            RedactionConfig::default()
        } else {
            RedactionConfig::disabled()
        };

        Self {
            revenue,
            redactor: PiiRedactor::new(redaction),
            started_at: Instant::now(),
        }
    }

    /// Build the server from configuration, loading the seed file if one is set
    pub async fn from_config(config: &DashboardConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let source = match &config.data.seed_file {
            Some(path) => storage::load_seed_file(path).await?,
            None => {
                info!("No seed file configured; serving an empty record set");
                InMemoryRecordSource::default()
            }
        };

        Self::with_source(Arc::new(source), config, clock)
    }

    pub fn with_source(
        source: Arc<dyn RecordSource>,
        config: &DashboardConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let revenue = RevenueService::new(source)
            .with_clock(clock)
            .with_default_window_days(config.revenue.default_window_days)
            .map_err(ClinicError::from)?;

        Ok(Self::new(revenue, config.logging.redaction_enabled))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Parse the raw query boundaries and fill the defaults
    pub fn resolve_window(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> std::result::Result<DateWindow, ApiError> {
        let (start, end) = parse_optional_window(start, end)
            .map_err(|e| self.api_error(RevenueError::from(e)))?;
        Ok(self.revenue.resolve_window(start, end))
    }

    /// Convert an engine error, scrubbing PII from its message
    pub fn api_error(&self, err: impl Into<ApiError>) -> ApiError {
        err.into().map_message(|message| self.redactor.redact(message))
    }
}
