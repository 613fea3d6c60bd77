//! Store configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store name used until one is configured.
pub const DEFAULT_STORE_NAME: &str = "MelKids";

/// Logo used until one is configured.
pub const DEFAULT_LOGO_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/e/e4/Melkids_Logo.png";

/// Outbound messaging contact used until one is configured.
pub const DEFAULT_CONTACT: &str = "244932853435";

/// Errors raised when a store configuration is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreConfigError {
    /// The store name is blank.
    #[error("store name is required")]
    MissingStoreName,

    /// The contact is empty or carries something other than digits.
    #[error("contact {0:?} must contain digits only")]
    InvalidContact(String),
}

/// Store-wide settings. A singleton, overwritten wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Display name of the store
    pub store_name: String,

    /// Logo URI, may be empty
    #[serde(default)]
    pub logo_url: String,

    /// Messaging contact in international form, digits only
    pub whatsapp_number: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            logo_url: DEFAULT_LOGO_URL.to_string(),
            whatsapp_number: DEFAULT_CONTACT.to_string(),
        }
    }
}

impl StoreConfig {
    /// Check the name and contact.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreConfigError`] for a blank name or a contact that is
    /// not purely digits.
    pub fn validate(&self) -> Result<(), StoreConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(StoreConfigError::MissingStoreName);
        }

        let contact = &self.whatsapp_number;

        if contact.is_empty() || !contact.chars().all(|c| c.is_ascii_digit()) {
            return Err(StoreConfigError::InvalidContact(contact.clone()));
        }

        Ok(())
    }
}

/// Strip everything but digits from a contact typed by an operator,
/// so `+244 932 853 435` becomes `244932853435`.
pub fn normalize_contact(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
