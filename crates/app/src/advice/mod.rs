//! Shopping Advice

mod chat;
mod errors;
mod gemini;
mod prompt;

pub use chat::*;
pub use errors::*;
pub use gemini::*;
pub use prompt::*;
