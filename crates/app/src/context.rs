//! App Context

use std::sync::Arc;

use storefront::fixtures::{Catalog, FixtureError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    admin::AdminGate,
    advice::{AdviceError, AdviceService, GeminiAdvisor},
    catalog::CatalogStore,
    checkout::{CheckoutService, HandoffChannel},
    config::AppConfig,
    gateway::{
        CatalogGateway, GatewayError, StoreGateway,
        blob::{BlobStoreConfig, HttpBlobStore},
        errors::BackendError,
        local::LocalDocumentStore,
        remote::HttpDocumentStore,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to configure remote store")]
    RemoteStore(#[source] BackendError),

    #[error("failed to configure blob store")]
    BlobStore(#[source] BackendError),

    #[error("failed to configure advice client")]
    Advice(#[from] AdviceError),

    #[error("failed to load default catalog")]
    Fixture(#[from] FixtureError),

    #[error("failed to seed default catalog")]
    Seed(#[from] GatewayError),
}

/// Services shared by every command, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub gateway: Arc<dyn CatalogGateway>,
    pub catalog: Arc<CatalogStore>,
    pub checkout: Arc<CheckoutService>,
    pub advice: Arc<dyn AdviceService>,
    pub admin: AdminGate,
    pub defaults: Arc<Catalog>,
}

impl AppContext {
    /// Build the context from configuration.
    ///
    /// Without a remote store the local store is seeded with the default
    /// catalog when empty. A failed catalog load is logged and leaves the
    /// catalog empty until [`CatalogStore::load`] is retried.
    ///
    /// # Errors
    ///
    /// Returns an error when a backend client cannot be built or seeding
    /// fails.
    pub async fn from_config(
        config: &AppConfig,
        handoff: Arc<dyn HandoffChannel>,
    ) -> Result<Self, AppInitError> {
        let timeout = config.remote.timeout();
        let local = Arc::new(LocalDocumentStore::open(&config.local.local_data_dir));

        let mut gateway = StoreGateway::new(local);

        let remote = config.remote.store();
        let blob_key = remote.as_ref().map(|remote| remote.api_key.clone());

        if let Some(remote) = remote {
            debug!(base_url = %remote.base_url, "using remote document store");

            let remote = HttpDocumentStore::new(remote).map_err(AppInitError::RemoteStore)?;

            gateway = gateway.with_remote(Arc::new(remote));
        } else {
            debug!(dir = %config.local.local_data_dir.display(), "using local document store only");
        }

        if let Some(base_url) = &config.local.blob_store_url {
            let blobs = HttpBlobStore::new(BlobStoreConfig {
                base_url: base_url.clone(),
                api_key: blob_key,
                timeout,
            })
            .map_err(AppInitError::BlobStore)?;

            gateway = gateway.with_blob_store(Arc::new(blobs));
        }

        let defaults = Catalog::default_catalog()?;

        if !gateway.remote_configured() && gateway.seed_if_empty(&defaults).await? {
            info!("seeded local store with the default catalog");
        }

        let advice = GeminiAdvisor::new(config.advice.gemini(timeout))?;

        let context = Self::new(
            Arc::new(gateway),
            Arc::new(advice),
            handoff,
            config.admin.gate(),
            defaults,
        );

        if let Err(source) = context.catalog.load().await {
            warn!("catalog unavailable at startup: {source}");
        }

        Ok(context)
    }

    /// Wire services over already-built collaborators.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        advice: Arc<dyn AdviceService>,
        handoff: Arc<dyn HandoffChannel>,
        admin: AdminGate,
        defaults: Catalog,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogStore::new(Arc::clone(&gateway))),
            checkout: Arc::new(CheckoutService::new(Arc::clone(&gateway), handoff)),
            gateway,
            advice,
            admin,
            defaults: Arc::new(defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::{
        checkout::MockHandoffChannel,
        config::{
            admin::AdminConfig,
            advice::AdviceConfig,
            local::LocalStoreConfig,
            logging::{LogFormat, LoggingConfig},
            remote::RemoteConfig,
        },
        secret::Secret,
    };

    use super::*;

    fn config(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            logging: LoggingConfig {
                log_level: "warn".to_string(),
                log_format: LogFormat::Compact,
            },
            remote: RemoteConfig {
                remote_store_url: None,
                remote_store_api_key: None,
                request_timeout_secs: 15,
            },
            local: LocalStoreConfig {
                local_data_dir: dir.to_path_buf(),
                blob_store_url: None,
            },
            advice: AdviceConfig {
                advice_api_key: None,
                advice_model: "gemini-2.5-flash".to_string(),
                advice_base_url: "http://127.0.0.1:9".to_string(),
            },
            admin: AdminConfig {
                admin_password: Some(Secret::new("admin123")),
            },
        }
    }

    #[tokio::test]
    async fn local_only_context_seeds_and_loads_catalog() -> TestResult {
        let dir = tempdir()?;

        let handoff = Arc::new(MockHandoffChannel::new());
        let context = AppContext::from_config(&config(dir.path()), handoff).await?;

        assert!(context.catalog.is_loaded().await);
        assert_eq!(context.catalog.snapshot().await.products.len(), 12);
        assert!(dir.path().join("products.json").exists());
        assert!(context.admin.login("admin123").is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn second_start_keeps_existing_products() -> TestResult {
        let dir = tempdir()?;

        let handoff = Arc::new(MockHandoffChannel::new());
        let first = AppContext::from_config(&config(dir.path()), handoff).await?;

        first.gateway.delete_product(storefront::products::ProductId::new(1)).await?;

        let handoff = Arc::new(MockHandoffChannel::new());
        let second = AppContext::from_config(&config(dir.path()), handoff).await?;

        assert_eq!(second.catalog.snapshot().await.products.len(), 11);

        Ok(())
    }
}
