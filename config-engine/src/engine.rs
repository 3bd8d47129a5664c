use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::settings::DashboardConfig;
use crate::validation::ConfigValidator;

pub const ENV_PREFIX: &str = "CLINIC_";

/// Builder that layers configuration sources into a [`DashboardConfig`]
#[derive(Debug, Clone)]
pub struct ConfigEngine {
    file: Option<PathBuf>,
    require_file: bool,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self {
            file: None,
            require_file: false,
        }
    }

    /// YAML file merged over the defaults; skipped if it does not exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// YAML file that must exist
    pub fn with_required_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self.require_file = true;
        self
    }

    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(DashboardConfig::default()));

        if let Some(path) = &self.file {
            figment = figment.merge(Yaml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate the layered configuration
    pub fn load(&self) -> Result<DashboardConfig> {
        if let Some(path) = &self.file {
            if self.require_file && !path.exists() {
                return Err(ConfigError::SourceNotFound(path.display().to_string()));
            }
        }

        let config: DashboardConfig = self
            .figment()
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;

        debug!(
            file = ?self.file,
            port = config.server.port,
            default_window_days = config.revenue.default_window_days,
            "Configuration loaded"
        );

        Ok(config)
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}
