use thiserror::Error;

use crate::codes;

/// Workspace-wide error enum
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Server startup and serving errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Revenue computation or record source errors
    #[error("Revenue error: {0}")]
    RevenueError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClinicError {
    /// Stable error code for API responses and log correlation
    pub fn code(&self) -> &'static str {
        match self {
            ClinicError::ServerError(_) => codes::server::INTERNAL,
            ClinicError::NetworkError(_) => codes::server::BIND_FAILED,
            ClinicError::ValidationError(_) => codes::validation::INVALID_INPUT,
            ClinicError::RevenueError(_) => codes::revenue::SOURCE_UNAVAILABLE,
            ClinicError::ConfigError(_) => codes::configuration::INVALID_CONFIGURATION,
            ClinicError::InternalError(_) | ClinicError::Other(_) => codes::server::INTERNAL,
        }
    }
}

/// Result type alias for clinic dashboard operations
pub type Result<T> = std::result::Result<T, ClinicError>;

/// Log an error together with the place it surfaced
pub fn log_error(context: &str, error: &ClinicError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "Clinic dashboard error occurred"
    );
}
