use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::codes;
use revenue_engine::RevenueError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error type
    pub error_type: String,
    /// Stable error code from `error_common::codes`
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Main API error enum
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation { message: String, code: &'static str },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Malformed query string, e.g. an unknown timeline bucket
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::INVALID_FORMAT,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::ServiceUnavailable { .. } => "service_unavailable",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. } => *code,
            ApiError::ServiceUnavailable { .. } => codes::revenue::SOURCE_UNAVAILABLE,
            ApiError::Internal { .. } => codes::server::INTERNAL,
        }
    }

    /// Rewrite the message, e.g. to strip PII before it is logged or returned
    pub fn map_message(self, f: impl FnOnce(&str) -> String) -> Self {
        match self {
            ApiError::Validation { message, code } => ApiError::Validation {
                message: f(&message),
                code,
            },
            ApiError::ServiceUnavailable { message } => ApiError::ServiceUnavailable {
                message: f(&message),
            },
            ApiError::Internal { message } => ApiError::Internal {
                message: f(&message),
            },
        }
    }
}

impl From<RevenueError> for ApiError {
    fn from(err: RevenueError) -> Self {
        let code = err.code();
        match err {
            RevenueError::InvalidDate(_) => ApiError::Validation {
                message: err.to_string(),
                code,
            },
            RevenueError::Source(_) => ApiError::ServiceUnavailable {
                message: err.to_string(),
            },
            RevenueError::Config(_) => ApiError::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_query(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        error!(
            error_id = %error_id,
            error_type = %self.error_type(),
            error_code = self.code(),
            status_code = %status_code.as_u16(),
            error = %self,
            "API error occurred"
        );

        let message = match &self {
            ApiError::Validation { message, .. } => message.clone(),
            // Source failures can carry connection details
            ApiError::ServiceUnavailable { .. } => "Billing records are temporarily unavailable".to_string(),
            ApiError::Internal { .. } => "An internal error occurred".to_string(),
        };

        let body = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            message,
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revenue_engine::InvalidDateError;

    #[test]
    fn test_invalid_date_maps_to_bad_request() {
        let err: ApiError = RevenueError::from(InvalidDateError {
            field: "start".to_string(),
            input: "ontem".to_string(),
        })
        .into();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), codes::validation::INVALID_DATE);
    }

    #[test]
    fn test_source_failure_maps_to_server_error() {
        let err: ApiError = RevenueError::Source("db down".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), codes::revenue::SOURCE_UNAVAILABLE);
    }

    #[test]
    fn test_map_message_keeps_code() {
        let err = ApiError::invalid_query("bad 123.456.789-09").map_message(|m| m.replace("123.456.789-09", "***"));
        assert_eq!(err.to_string(), "Validation error: bad ***");
        assert_eq!(err.code(), codes::validation::INVALID_FORMAT);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
