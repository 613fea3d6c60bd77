//! Admin Config

use clap::Args;

use crate::{admin::AdminGate, secret::Secret};

/// Admin access settings.
#[derive(Debug, Args)]
pub struct AdminConfig {
    /// Shared admin password; admin commands are refused when unset
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<Secret>,
}

impl AdminConfig {
    #[must_use]
    pub fn gate(&self) -> AdminGate {
        AdminGate::new(self.admin_password.clone().unwrap_or_default())
    }
}
