use error_common::{codes, ClinicError};
use thiserror::Error;

/// A date that could not be parsed at the request boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date for '{field}': '{input}' (expected RFC 3339 or YYYY-MM-DD)")]
pub struct InvalidDateError {
    pub field: String,
    pub input: String,
}

#[derive(Error, Debug)]
pub enum RevenueError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    #[error("Record source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RevenueError {
    pub fn code(&self) -> &'static str {
        match self {
            RevenueError::InvalidDate(_) => codes::validation::INVALID_DATE,
            RevenueError::Source(_) => codes::revenue::SOURCE_UNAVAILABLE,
            RevenueError::Config(_) => codes::configuration::INVALID_CONFIGURATION,
        }
    }
}

impl From<RevenueError> for ClinicError {
    fn from(err: RevenueError) -> Self {
        match err {
            RevenueError::InvalidDate(_) => ClinicError::ValidationError(err.to_string()),
            RevenueError::Source(_) => ClinicError::RevenueError(err.to_string()),
            RevenueError::Config(_) => ClinicError::ConfigError(err.to_string()),
        }
    }
}

pub type RevenueResult<T> = Result<T, RevenueError>;
