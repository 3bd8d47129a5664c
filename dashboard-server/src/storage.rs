use std::path::Path;

use error_common::{ClinicError, Result};
use revenue_engine::{InMemoryRecordSource, RecordSnapshot};
use tracing::info;

/// Load billing records and expenses exported from the clinic database
pub async fn load_seed_file(path: &Path) -> Result<InMemoryRecordSource> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        ClinicError::ConfigError(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;

    let snapshot: RecordSnapshot = serde_json::from_str(&raw).map_err(|e| {
        ClinicError::ConfigError(format!("Failed to parse seed file {}: {}", path.display(), e))
    })?;

    let source = InMemoryRecordSource::from_snapshot(snapshot);
    info!(
        path = %path.display(),
        records = source.record_count(),
        expenses = source.expense_count(),
        "Seed file loaded"
    );

    Ok(source)
}
