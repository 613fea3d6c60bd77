//! Admin gate errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("admin password is not configured")]
    NotConfigured,

    #[error("invalid admin password")]
    InvalidPassword,
}
