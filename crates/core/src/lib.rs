//! Storefront
//!
//! Catalog, cart, filtering and order domain for a small storefront that
//! takes orders through a messaging handoff instead of a payment gateway.

pub mod cart;
pub mod categories;
pub mod filter;
pub mod fixtures;
pub mod handoff;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod store;
