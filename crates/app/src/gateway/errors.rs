//! Gateway errors.

use storefront::{products::ProductError, store::StoreConfigError};
use thiserror::Error;

/// Failure talking to a single backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request timed out")]
    Timeout,

    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }

        Self::Http(error)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("backend unavailable")]
    BackendUnavailable(#[source] BackendError),

    #[error("backend timed out")]
    Timeout,

    #[error("{0} not found")]
    NotFound(String),

    #[error("payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl GatewayError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_) | Self::Timeout)
    }
}

impl From<BackendError> for GatewayError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Timeout => Self::Timeout,
            other => Self::BackendUnavailable(other),
        }
    }
}

impl From<ProductError> for GatewayError {
    fn from(error: ProductError) -> Self {
        Self::ValidationFailed(error.to_string())
    }
}

impl From<StoreConfigError> for GatewayError {
    fn from(error: StoreConfigError) -> Self {
        Self::ValidationFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_timeout_maps_to_timeout() {
        let error = GatewayError::from(BackendError::Timeout);

        assert!(matches!(error, GatewayError::Timeout), "got {error:?}");
        assert!(error.is_retryable());
    }

    #[test]
    fn other_backend_errors_map_to_unavailable() {
        let error = GatewayError::from(BackendError::UnexpectedResponse("500".to_string()));

        assert!(
            matches!(error, GatewayError::BackendUnavailable(_)),
            "got {error:?}"
        );
        assert!(error.is_retryable());
    }

    #[test]
    fn validation_errors_are_not_retryable() {
        let error = GatewayError::from(ProductError::MissingName);

        assert!(!error.is_retryable());
        assert_eq!(error.to_string(), "validation failed: product name is required");
    }
}
