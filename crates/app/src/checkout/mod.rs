//! Checkout

mod errors;
mod handoff;
mod service;

pub use errors::*;
pub use handoff::*;
pub use service::*;
