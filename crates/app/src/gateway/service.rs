//! Catalog gateway service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use storefront::{
    categories::CategorySet,
    fixtures::Catalog,
    orders::{Order, sort_newest_first},
    products::{Product, ProductId, max_id},
    store::StoreConfig,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::gateway::{
    blob::{BlobStore, ImageUpload, MAX_IMAGE_BYTES},
    documents::{CONFIG_CATEGORIES_KEY, CONFIG_MAIN_KEY, Collection, DocumentStore},
    errors::{BackendError, GatewayError},
    local::LocalDocumentStore,
};

#[derive(Debug, Serialize, Deserialize)]
struct CategoriesDocument {
    list: CategorySet,
}

/// Gateway over an optional remote document store and the local store.
///
/// Whether a remote is configured is fixed at construction. With a remote,
/// reads try it first and fall back to the local cache, while writes must
/// reach the remote and are then mirrored locally.
pub struct StoreGateway {
    remote: Option<Arc<dyn DocumentStore>>,
    local: Arc<LocalDocumentStore>,
    blobs: Option<Arc<dyn BlobStore>>,
    next_product_id: Mutex<Option<ProductId>>,
}

impl fmt::Debug for StoreGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreGateway")
            .field("remote_configured", &self.remote.is_some())
            .field("blob_store_configured", &self.blobs.is_some())
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

impl StoreGateway {
    #[must_use]
    pub fn new(local: Arc<LocalDocumentStore>) -> Self {
        Self {
            remote: None,
            local,
            blobs: None,
            next_product_id: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn DocumentStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    #[must_use]
    pub fn with_blob_store(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    #[must_use]
    pub fn remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Value>, GatewayError> {
        if let Some(remote) = &self.remote {
            match remote.list(collection).await {
                Ok(documents) => {
                    self.refresh_cache(collection, &documents).await;

                    return Ok(documents);
                }
                Err(source) => {
                    warn!(%collection, "remote list failed, serving local cache: {source}");
                }
            }
        }

        self.local.list(collection).await.map_err(|source| {
            error!(%collection, "local list failed: {source}");

            GatewayError::from(source)
        })
    }

    async fn read_one(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<Option<Value>, GatewayError> {
        if let Some(remote) = &self.remote {
            match remote.get(collection, key).await {
                Ok(document) => {
                    let cached = match &document {
                        Some(document) => self.local.put(collection, key, document.clone()).await,
                        None => self.local.delete(collection, key).await,
                    };

                    if let Err(source) = cached {
                        warn!(%collection, key, "failed to cache remote document: {source}");
                    }

                    return Ok(document);
                }
                Err(source) => {
                    warn!(%collection, key, "remote get failed, serving local cache: {source}");
                }
            }
        }

        self.local.get(collection, key).await.map_err(|source| {
            error!(%collection, key, "local get failed: {source}");

            GatewayError::from(source)
        })
    }

    /// Products as the authoritative backend holds them. Used on write
    /// paths, so a remote failure is surfaced instead of served from cache.
    async fn products_for_write(&self) -> Result<Vec<Product>, GatewayError> {
        let documents = match &self.remote {
            Some(remote) => remote
                .list(Collection::Products)
                .await
                .map_err(|source| write_failed(Collection::Products, "*", source))?,
            None => self
                .local
                .list(Collection::Products)
                .await
                .map_err(|source| write_failed(Collection::Products, "*", source))?,
        };

        Ok(documents
            .into_iter()
            .filter_map(|document| decode(Collection::Products, document))
            .collect())
    }

    /// Whether `key` exists in the authoritative backend. Fails closed like
    /// [`Self::products_for_write`].
    async fn exists_for_write(
        &self,
        collection: Collection,
        key: &str,
    ) -> Result<bool, GatewayError> {
        let document = match &self.remote {
            Some(remote) => remote.get(collection, key).await,
            None => self.local.get(collection, key).await,
        };

        document
            .map(|document| document.is_some())
            .map_err(|source| write_failed(collection, key, source))
    }

    async fn refresh_cache(&self, collection: Collection, documents: &[Value]) {
        let keyed = documents
            .iter()
            .filter_map(|document| Some((document_key(collection, document)?, document.clone())));

        if let Err(source) = self.local.replace_all(collection, keyed.collect::<Vec<_>>()).await {
            warn!(%collection, "failed to refresh local cache: {source}");
        }
    }

    async fn write(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), GatewayError> {
        if let Some(remote) = &self.remote {
            remote
                .put(collection, key, document.clone())
                .await
                .map_err(|source| write_failed(collection, key, source))?;

            if let Err(source) = self.local.put(collection, key, document).await {
                warn!(%collection, key, "failed to mirror write into local cache: {source}");
            }

            return Ok(());
        }

        self.local
            .put(collection, key, document)
            .await
            .map_err(|source| write_failed(collection, key, source))
    }

    async fn remove(&self, collection: Collection, key: &str) -> Result<(), GatewayError> {
        if let Some(remote) = &self.remote {
            remote
                .delete(collection, key)
                .await
                .map_err(|source| write_failed(collection, key, source))?;

            if let Err(source) = self.local.delete(collection, key).await {
                warn!(%collection, key, "failed to mirror delete into local cache: {source}");
            }

            return Ok(());
        }

        self.local
            .delete(collection, key)
            .await
            .map_err(|source| write_failed(collection, key, source))
    }

    async fn write_products(&self, products: &[Product]) -> Result<(), GatewayError> {
        for product in products {
            self.write(Collection::Products, &product.id.to_string(), to_document(product)?)
                .await?;
        }

        Ok(())
    }
}

fn write_failed(collection: Collection, key: &str, source: BackendError) -> GatewayError {
    error!(%collection, key, "write failed: {source}");

    GatewayError::from(source)
}

fn to_document<T: Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|source| GatewayError::from(BackendError::from(source)))
}

fn decode<T: DeserializeOwned>(collection: Collection, document: Value) -> Option<T> {
    serde_json::from_value(document)
        .inspect_err(|source| warn!(%collection, "skipping malformed document: {source}"))
        .ok()
}

/// Key a listed document is stored under, from its `id` field.
fn document_key(collection: Collection, document: &Value) -> Option<String> {
    let id = document.get("id")?;

    match collection {
        Collection::Products => id.as_u64().map(|id| id.to_string()),
        Collection::Orders => id.as_str().map(ToString::to_string),
        Collection::Config => None,
    }
}

#[async_trait]
impl CatalogGateway for StoreGateway {
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        let mut products: Vec<Product> = self
            .read_all(Collection::Products)
            .await?
            .into_iter()
            .filter_map(|document| decode(Collection::Products, document))
            .collect();

        products.sort_by_key(|product| product.id);

        Ok(products)
    }

    async fn save_product(&self, product: Product) -> Result<Product, GatewayError> {
        product.validate()?;

        let mut next_id = self.next_product_id.lock().await;

        let assigning = product.id.is_unassigned();

        let product = if assigning {
            let id = match *next_id {
                Some(id) => id,
                None => max_id(&self.products_for_write().await?).next(),
            };

            debug!(product_id = %id, "assigned product id");

            product.with_id(id)
        } else {
            let key = product.id.to_string();

            if !self.exists_for_write(Collection::Products, &key).await? {
                return Err(GatewayError::NotFound(format!("product {key}")));
            }

            product
        };

        self.write(Collection::Products, &product.id.to_string(), to_document(&product)?)
            .await?;

        if assigning {
            *next_id = Some(product.id.next());
        }

        info!(product_id = %product.id, "saved product");

        Ok(product)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError> {
        self.remove(Collection::Products, &id.to_string()).await?;

        info!(product_id = %id, "deleted product");

        Ok(())
    }

    async fn list_categories(&self) -> Result<CategorySet, GatewayError> {
        let categories = self
            .read_one(Collection::Config, CONFIG_CATEGORIES_KEY)
            .await?
            .and_then(|document| decode::<CategoriesDocument>(Collection::Config, document))
            .map(|document| document.list)
            .unwrap_or_default();

        Ok(categories)
    }

    async fn save_categories(&self, categories: CategorySet) -> Result<(), GatewayError> {
        let document = to_document(&CategoriesDocument { list: categories })?;

        self.write(Collection::Config, CONFIG_CATEGORIES_KEY, document).await?;

        info!("saved categories");

        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError> {
        let mut orders: Vec<Order> = self
            .read_all(Collection::Orders)
            .await?
            .into_iter()
            .filter_map(|document| decode(Collection::Orders, document))
            .collect();

        sort_newest_first(&mut orders);

        Ok(orders)
    }

    async fn save_order(&self, order: &Order) -> Result<(), GatewayError> {
        if order.items.is_empty() {
            return Err(GatewayError::ValidationFailed("order has no items".to_string()));
        }

        order
            .customer
            .validate()
            .map_err(|source| GatewayError::ValidationFailed(source.to_string()))?;

        self.write(Collection::Orders, order.reference.as_str(), to_document(order)?)
            .await?;

        info!(order_reference = %order.reference, total = order.total, "saved order");

        Ok(())
    }

    async fn get_config(&self) -> Result<StoreConfig, GatewayError> {
        let config = self
            .read_one(Collection::Config, CONFIG_MAIN_KEY)
            .await?
            .and_then(|document| decode(Collection::Config, document))
            .unwrap_or_default();

        Ok(config)
    }

    async fn save_config(&self, config: StoreConfig) -> Result<(), GatewayError> {
        config.validate()?;

        self.write(Collection::Config, CONFIG_MAIN_KEY, to_document(&config)?)
            .await?;

        info!(store_name = %config.store_name, "saved store configuration");

        Ok(())
    }

    async fn upload_image(&self, image: ImageUpload, folder: &str) -> Result<String, GatewayError> {
        if image.len() > MAX_IMAGE_BYTES {
            return Err(GatewayError::PayloadTooLarge {
                size: image.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        if image.is_empty() {
            return Err(GatewayError::ValidationFailed("image is empty".to_string()));
        }

        let Some(blobs) = &self.blobs else {
            warn!(
                size = image.len(),
                "no blob store configured, inlining image as a data URI"
            );

            return Ok(image.to_data_uri());
        };

        let url = blobs.upload(image, folder).await.map_err(|source| {
            error!(folder, "image upload failed: {source}");

            GatewayError::from(source)
        })?;

        info!(folder, %url, "uploaded image");

        Ok(url)
    }

    async fn seed_if_empty(&self, catalog: &Catalog) -> Result<bool, GatewayError> {
        let mut next_id = self.next_product_id.lock().await;

        if !self.products_for_write().await?.is_empty() {
            return Ok(false);
        }

        self.write_products(&catalog.products).await?;
        self.save_categories(catalog.categories.clone()).await?;

        if self.read_one(Collection::Config, CONFIG_MAIN_KEY).await?.is_none() {
            self.save_config(catalog.config.clone()).await?;
        }

        *next_id = None;

        info!(products = catalog.products.len(), "seeded default catalog");

        Ok(true)
    }

    async fn reset_to_defaults(&self, catalog: &Catalog) -> Result<(), GatewayError> {
        let mut next_id = self.next_product_id.lock().await;

        for product in self.products_for_write().await? {
            self.remove(Collection::Products, &product.id.to_string()).await?;
        }

        self.write_products(&catalog.products).await?;
        self.save_categories(catalog.categories.clone()).await?;
        self.save_config(catalog.config.clone()).await?;

        *next_id = None;

        info!(products = catalog.products.len(), "reset catalog to defaults");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// All products, ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError>;

    /// Create (id 0) or update a product, returning it with its id.
    async fn save_product(&self, product: Product) -> Result<Product, GatewayError>;

    /// Delete a product. Deleting a missing product succeeds.
    async fn delete_product(&self, id: ProductId) -> Result<(), GatewayError>;

    /// The stored category set.
    async fn list_categories(&self) -> Result<CategorySet, GatewayError>;

    /// Replace the stored category set.
    async fn save_categories(&self, categories: CategorySet) -> Result<(), GatewayError>;

    /// All orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, GatewayError>;

    /// Persist a placed order.
    async fn save_order(&self, order: &Order) -> Result<(), GatewayError>;

    /// The store configuration, or the default one when none is stored.
    async fn get_config(&self) -> Result<StoreConfig, GatewayError>;

    /// Overwrite the store configuration.
    async fn save_config(&self, config: StoreConfig) -> Result<(), GatewayError>;

    /// Store an image and return a URI for it.
    async fn upload_image(&self, image: ImageUpload, folder: &str) -> Result<String, GatewayError>;

    /// Write `catalog` when no products exist. Returns whether it seeded.
    async fn seed_if_empty(&self, catalog: &Catalog) -> Result<bool, GatewayError>;

    /// Replace products, categories and configuration with `catalog`.
    /// Orders are kept.
    async fn reset_to_defaults(&self, catalog: &Catalog) -> Result<(), GatewayError>;
}
