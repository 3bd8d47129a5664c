use std::path::PathBuf;

use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};

/// Top-level dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub revenue: RevenueSettings,
    pub logging: LoggerConfig,
    pub data: DataSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Revenue reporting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueSettings {
    /// Length of the window used when a request omits `start`
    pub default_window_days: u32,
}

impl Default for RevenueSettings {
    fn default() -> Self {
        Self {
            default_window_days: 30,
        }
    }
}

/// Where billing records come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// JSON file with `records` and `expenses` arrays
    pub seed_file: Option<PathBuf>,
}
