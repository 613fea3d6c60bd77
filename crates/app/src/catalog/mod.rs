//! Catalog Store

mod errors;
mod forms;
mod service;

pub use errors::*;
pub use forms::*;
pub use service::*;
