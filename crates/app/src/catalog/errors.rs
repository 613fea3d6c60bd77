//! Catalog store errors.

use storefront::{categories::CategoryError, products::ProductError, store::StoreConfigError};
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid product")]
    InvalidProduct(#[from] ProductError),

    #[error("invalid category")]
    InvalidCategory(#[from] CategoryError),

    #[error("invalid store configuration")]
    InvalidConfig(#[from] StoreConfigError),

    #[error("category {0:?} still holds products and cannot be removed")]
    CategoryInUse(String),

    #[error("gateway error")]
    Gateway(#[from] GatewayError),
}

impl CatalogError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(error) => error.is_retryable(),
            _ => false,
        }
    }
}
