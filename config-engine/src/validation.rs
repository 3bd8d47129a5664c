use crate::error::{ConfigError, Result};
use crate::settings::DashboardConfig;

/// Semantic checks that deserialization alone cannot express
pub trait ConfigValidator {
    fn validate(&self) -> Result<()>;
}

impl ConfigValidator for DashboardConfig {
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }

        if self.revenue.default_window_days == 0 {
            return Err(ConfigError::ValidationError(
                "revenue.default_window_days must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
