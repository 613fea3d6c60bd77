//! Remote Store Config

use std::time::Duration;

use clap::Args;

use crate::{gateway::remote::RemoteStoreConfig, secret::Secret};

/// Remote document store settings.
#[derive(Debug, Args)]
pub struct RemoteConfig {
    /// Remote document store base URL
    #[arg(long, env = "REMOTE_STORE_URL")]
    pub remote_store_url: Option<String>,

    /// Remote document store API key
    #[arg(long, env = "REMOTE_STORE_API_KEY", hide_env_values = true)]
    pub remote_store_api_key: Option<Secret>,

    /// Timeout for every backend request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 15u64)]
    pub request_timeout_secs: u64,
}

impl RemoteConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connection settings, present only when both the URL and the API key
    /// are set.
    #[must_use]
    pub fn store(&self) -> Option<RemoteStoreConfig> {
        let base_url = self.remote_store_url.as_ref().filter(|url| !url.trim().is_empty())?;
        let api_key = self.remote_store_api_key.as_ref().filter(|key| !key.is_blank())?;

        Some(RemoteStoreConfig {
            base_url: base_url.clone(),
            api_key: api_key.clone(),
            timeout: self.timeout(),
        })
    }
}
