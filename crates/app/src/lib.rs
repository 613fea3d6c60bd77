//! Storefront services: persistence gateway, catalog store, checkout,
//! shopping advice and admin access.

pub mod admin;
pub mod advice;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod gateway;
pub mod logging;
pub mod secret;
