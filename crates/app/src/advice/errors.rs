//! Advice errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("advice API key is not configured")]
    NotConfigured,

    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
