//! Messaging handoff: hands the composed order summary to the store's
//! contact.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Url;
use tracing::info;

use crate::checkout::HandoffError;

/// Base of the click-to-chat link.
pub const HANDOFF_BASE_URL: &str = "https://wa.me/";

/// Link opening a chat with `contact`, prefilled with `message`.
///
/// # Errors
///
/// Returns [`HandoffError::InvalidUrl`] when `contact` does not form a valid
/// URL path.
pub fn handoff_url(contact: &str, message: &str) -> Result<Url, HandoffError> {
    Url::parse_with_params(&format!("{HANDOFF_BASE_URL}{contact}"), [("text", message)])
        .map_err(|error| HandoffError::InvalidUrl(error.to_string()))
}

/// Handoff channel that writes the link to stdout for the operator to
/// open.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintHandoff;

#[async_trait]
impl HandoffChannel for PrintHandoff {
    async fn initiate(&self, url: &Url) -> Result<(), HandoffError> {
        info!(%url, "handing order off");

        println!("{url}");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait HandoffChannel: Send + Sync {
    /// Open `url`. Fire and forget: success means the link was handed
    /// over, not that a message was sent.
    async fn initiate(&self, url: &Url) -> Result<(), HandoffError>;
}
