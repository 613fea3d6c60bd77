//! Advice Config

use std::time::Duration;

use clap::Args;

use crate::{
    advice::{DEFAULT_ADVICE_BASE_URL, DEFAULT_ADVICE_MODEL, GeminiConfig},
    secret::Secret,
};

/// Shopping assistant settings.
#[derive(Debug, Args)]
pub struct AdviceConfig {
    /// Gemini API key; the assistant answers with a fallback when unset
    #[arg(long, env = "ADVICE_API_KEY", hide_env_values = true)]
    pub advice_api_key: Option<Secret>,

    /// Gemini model name
    #[arg(long, env = "ADVICE_MODEL", default_value = DEFAULT_ADVICE_MODEL)]
    pub advice_model: String,

    /// Gemini API base URL
    #[arg(long, env = "ADVICE_BASE_URL", default_value = DEFAULT_ADVICE_BASE_URL)]
    pub advice_base_url: String,
}

impl AdviceConfig {
    #[must_use]
    pub fn gemini(&self, timeout: Duration) -> GeminiConfig {
        GeminiConfig {
            base_url: self.advice_base_url.clone(),
            api_key: self.advice_api_key.clone().filter(|key| !key.is_blank()),
            model: self.advice_model.clone(),
            timeout,
        }
    }
}
