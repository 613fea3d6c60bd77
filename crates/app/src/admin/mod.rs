//! Admin Access

mod errors;
mod gate;

pub use errors::*;
pub use gate::*;
