//! Persistence gateway: products, categories, orders, configuration and
//! images behind one async interface.

pub mod blob;
pub mod documents;
pub mod errors;
pub mod local;
pub mod remote;
pub mod service;

pub use errors::GatewayError;
pub use service::{CatalogGateway, StoreGateway};
