//! Application configuration module

use clap::Args;

use crate::config::{
    admin::AdminConfig, advice::AdviceConfig, local::LocalStoreConfig, logging::LoggingConfig,
    remote::RemoteConfig,
};

pub mod admin;
pub mod advice;
pub mod local;
pub mod logging;
pub mod remote;

/// Storefront settings, read from flags or the environment.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Remote document store settings.
    #[command(flatten)]
    pub remote: RemoteConfig,

    /// Local data directory and blob store settings.
    #[command(flatten)]
    pub local: LocalStoreConfig,

    /// Shopping assistant settings.
    #[command(flatten)]
    pub advice: AdviceConfig,

    /// Admin access settings.
    #[command(flatten)]
    pub admin: AdminConfig,
}

/// Load a `.env` file into the process environment if one exists.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}
