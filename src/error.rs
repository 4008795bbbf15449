//! Error types for the animal images service
//!
//! Upstream fetch failures are described by `FetchError`; everything the
//! HTTP layer can return is an `AppError`, which implements `IntoResponse`
//! for proper HTTP error responses.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure while obtaining an image URL from a provider
///
/// Produced by the strategies and passed through the dispatcher
/// unchanged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Animal type outside {cat, dog, bear} (400)
    #[error("Unsupported animal type: {0}")]
    UnsupportedType(String),

    /// Upstream call failed or returned an unexpected payload (502)
    #[error("Provider error: {0}")]
    Provider(String),

    /// No acceptable image within the attempt budget (502)
    #[error("No valid image after {attempts} attempts")]
    RetryExhausted { attempts: u32 },
}

impl FetchError {
    pub(crate) fn provider(provider: &str, message: impl std::fmt::Display) -> Self {
        FetchError::Provider(format!("{provider}: {message}"))
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::UnsupportedType(_) => "unsupported_type",
            FetchError::Provider(_) => "provider",
            FetchError::RetryExhausted { .. } => "retry_exhausted",
        }
    }
}

/// Application-wide error type
///
/// This enum represents all possible errors that can occur
/// in the application. It implements `IntoResponse` to
/// automatically convert errors to appropriate HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Image fetch failed (status depends on the cause)
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Requested amount below 1 (400)
    #[error("Amount must be at least 1, got {0}")]
    InvalidAmount(i64),

    /// No record for the requested animal type (404)
    #[error("No image found for this animal type")]
    NotFound,

    /// Validation error (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// HTTP status, user-facing message and metric label for this error
    pub fn parts(&self) -> (StatusCode, String, &'static str) {
        match self {
            AppError::Fetch(FetchError::UnsupportedType(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "unsupported_type")
            }
            AppError::Fetch(FetchError::Provider(_)) => {
                (StatusCode::BAD_GATEWAY, self.to_string(), "provider")
            }
            AppError::Fetch(FetchError::RetryExhausted { .. }) => {
                (StatusCode::BAD_GATEWAY, self.to_string(), "retry_exhausted")
            }
            AppError::InvalidAmount(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "invalid_amount")
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string(), "not_found"),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), "validation"),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
                "database",
            ),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), "config"),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                "internal",
            ),
        }
    }

    /// Log and count the error, returning what the client should see
    pub(crate) fn report(&self) -> (StatusCode, String) {
        let (status, error_message, error_type) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        crate::metrics::ERRORS_TOTAL
            .with_label_values(&[error_type])
            .inc();

        (status, error_message)
    }
}

impl IntoResponse for AppError {
    /// Convert error to HTTP response
    ///
    /// Maps each error variant to appropriate HTTP status code
    /// and JSON error body.
    fn into_response(self) -> Response {
        use axum::Json;

        let (status, error_message) = self.report();

        let body = Json(serde_json::json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_client_or_gateway_status() {
        let unsupported = AppError::from(FetchError::UnsupportedType("fish".to_string()));
        assert_eq!(unsupported.parts().0, StatusCode::BAD_REQUEST);

        let provider = AppError::from(FetchError::provider("cat", "HTTP 503"));
        assert_eq!(provider.parts().0, StatusCode::BAD_GATEWAY);
        assert_eq!(provider.to_string(), "Provider error: cat: HTTP 503");

        let exhausted = AppError::from(FetchError::RetryExhausted { attempts: 10 });
        assert_eq!(exhausted.parts().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn database_errors_hide_details() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let (status, message, error_type) = error.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Database error");
        assert_eq!(error_type, "database");
    }

    #[test]
    fn missing_record_is_not_a_server_error() {
        let (status, _, _) = AppError::NotFound.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidAmount(0).parts().0,
            StatusCode::BAD_REQUEST
        );
    }
}
