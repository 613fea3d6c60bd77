//! Chat session with the shopping assistant.

use storefront::products::Product;
use tracing::warn;

use crate::advice::{AdviceService, EMPTY_REPLY, FAILURE_REPLY, GREETING, system_instruction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Ask for advice about `catalog`. Never fails: model errors become
/// [`FAILURE_REPLY`] and empty answers become [`EMPTY_REPLY`].
pub async fn advise(
    advisor: &dyn AdviceService,
    store_name: &str,
    catalog: &[Product],
    message: &str,
) -> String {
    let instruction = system_instruction(store_name, catalog);

    match advisor.generate(&instruction, message).await {
        Ok(Some(reply)) => reply,
        Ok(None) => EMPTY_REPLY.to_string(),
        Err(source) => {
            warn!("shopping advice failed: {source}");

            FAILURE_REPLY.to_string()
        }
    }
}

/// Conversation transcript, opened with the assistant's greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Model,
                text: GREETING.to_string(),
            }],
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `message` and record the exchange. Blank messages are ignored.
    pub async fn ask(
        &mut self,
        advisor: &dyn AdviceService,
        store_name: &str,
        catalog: &[Product],
        message: &str,
    ) -> Option<&str> {
        let message = message.trim();

        if message.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: message.to_string(),
        });

        let reply = advise(advisor, store_name, catalog, message).await;

        self.messages.push(ChatMessage {
            role: ChatRole::Model,
            text: reply,
        });

        self.messages.last().map(|last| last.text.as_str())
    }
}
