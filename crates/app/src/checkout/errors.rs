//! Checkout errors.

use storefront::{
    orders::{CustomerField, OrderReference},
    store::StoreConfigError,
};
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("customer {0} is required")]
    ValidationFailed(CustomerField),

    #[error("store contact is not usable for handoff")]
    InvalidContact(#[from] StoreConfigError),

    #[error("a checkout is already in progress")]
    InProgress,

    #[error("failed to save order")]
    OrderPersistFailed(#[source] GatewayError),

    #[error("order {reference} was saved but the handoff could not be opened")]
    HandoffFailed {
        reference: OrderReference,
        #[source]
        source: HandoffError,
    },
}

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("invalid handoff url: {0}")]
    InvalidUrl(String),

    #[error("handoff channel unavailable: {0}")]
    Unavailable(String),
}
