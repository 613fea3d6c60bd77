//! Catalog store: the in-memory view of products, categories and store
//! settings that shoppers browse and admins edit.

use std::sync::Arc;

use storefront::{
    categories::{CategorySet, UNCATEGORIZED},
    filter::CatalogFilter,
    products::{Product, ProductError, ProductId},
    store::StoreConfig,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    admin::AdminSession,
    catalog::{CatalogError, ConfigForm, ProductForm},
    gateway::{CatalogGateway, blob::ImageUpload},
};

/// Folder product images are uploaded into.
pub const PRODUCT_IMAGE_FOLDER: &str = "products";

/// Point-in-time copy of the catalog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: CategorySet,
    pub config: StoreConfig,

    /// Whether the last load succeeded.
    pub loaded: bool,
}

/// Holds the catalog and applies admin edits through the gateway.
///
/// State only changes after the gateway confirms a write.
pub struct CatalogStore {
    gateway: Arc<dyn CatalogGateway>,
    state: RwLock<CatalogSnapshot>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore").finish_non_exhaustive()
    }
}

impl CatalogStore {
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::default(),
        }
    }

    /// Fetch products, categories and settings.
    ///
    /// On failure the store is left empty and unloaded; call again to retry.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Gateway`] when any of the reads fail.
    pub async fn load(&self) -> Result<(), CatalogError> {
        let loaded = tokio::try_join!(
            self.gateway.list_products(),
            self.gateway.list_categories(),
            self.gateway.get_config(),
        );

        let mut state = self.state.write().await;

        match loaded {
            Ok((products, categories, config)) => {
                let categories = if categories.is_empty() {
                    CategorySet::new(products.iter().map(|product| product.category.clone()))
                } else {
                    categories
                };

                info!(products = products.len(), categories = categories.len(), "loaded catalog");

                *state = CatalogSnapshot {
                    products,
                    categories,
                    config,
                    loaded: true,
                };

                Ok(())
            }
            Err(source) => {
                warn!("failed to load catalog: {source}");

                *state = CatalogSnapshot::default();

                Err(source.into())
            }
        }
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.loaded
    }

    pub async fn config(&self) -> StoreConfig {
        self.state.read().await.config.clone()
    }

    pub async fn product(&self, id: ProductId) -> Option<Product> {
        self.state
            .read()
            .await
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    /// Category tabs, "Todos" first.
    pub async fn display_categories(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .categories
            .display_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Products passing `filter`, in catalog order.
    pub async fn visible_products(&self, filter: &CatalogFilter) -> Vec<Product> {
        filter
            .apply(&self.state.read().await.products)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Create or update a product.
    ///
    /// # Errors
    ///
    /// Returns an error when the form is invalid, names an unknown category,
    /// or the gateway rejects the write.
    pub async fn save_product(
        &self,
        _session: &AdminSession,
        form: ProductForm,
    ) -> Result<Product, CatalogError> {
        let product = form.into_product()?;

        if !self.state.read().await.categories.contains(&product.category) {
            return Err(ProductError::UnknownCategory(product.category).into());
        }

        let saved = self.gateway.save_product(product).await?;

        upsert(&mut self.state.write().await.products, saved.clone());

        Ok(saved)
    }

    /// Delete a product. Deleting a missing product succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway rejects the delete.
    pub async fn delete_product(
        &self,
        _session: &AdminSession,
        id: ProductId,
    ) -> Result<(), CatalogError> {
        self.gateway.delete_product(id).await?;

        self.state
            .write()
            .await
            .products
            .retain(|product| product.id != id);

        Ok(())
    }

    /// Append a category.
    ///
    /// # Errors
    ///
    /// Returns an error for blank, reserved or duplicate names, or when the
    /// gateway rejects the write.
    pub async fn add_category(
        &self,
        _session: &AdminSession,
        name: &str,
    ) -> Result<(), CatalogError> {
        let mut categories = self.state.read().await.categories.clone();

        categories.add(name)?;

        self.gateway.save_categories(categories.clone()).await?;

        self.state.write().await.categories = categories;

        Ok(())
    }

    /// Remove a category, moving its products to "Outros".
    ///
    /// Returns how many products were moved. Removing an unknown category
    /// changes nothing. Products are moved before the category is dropped,
    /// so a call that fails part way can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CategoryInUse`] when removing "Outros" while
    /// products still use it, or a gateway error.
    pub async fn remove_category(
        &self,
        _session: &AdminSession,
        name: &str,
    ) -> Result<usize, CatalogError> {
        let orphans: Vec<Product> = {
            let state = self.state.read().await;

            if !state.categories.contains(name) {
                return Ok(0);
            }

            state
                .products
                .iter()
                .filter(|product| product.category == name)
                .cloned()
                .collect()
        };

        if name == UNCATEGORIZED && !orphans.is_empty() {
            return Err(CatalogError::CategoryInUse(name.to_string()));
        }

        for mut product in orphans.iter().cloned() {
            product.category = UNCATEGORIZED.to_string();

            let saved = self.gateway.save_product(product).await?;

            upsert(&mut self.state.write().await.products, saved);
        }

        let categories = {
            let state = self.state.read().await;
            let mut categories = state.categories.clone();

            categories.remove(name);

            if state
                .products
                .iter()
                .any(|product| product.category == UNCATEGORIZED)
            {
                categories.ensure_uncategorized();
            }

            categories
        };

        self.gateway.save_categories(categories.clone()).await?;

        self.state.write().await.categories = categories;

        info!(category = name, moved = orphans.len(), "removed category");

        Ok(orphans.len())
    }

    /// Update store settings.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name or empty contact, or when the
    /// gateway rejects the write.
    pub async fn save_config(
        &self,
        _session: &AdminSession,
        form: ConfigForm,
    ) -> Result<StoreConfig, CatalogError> {
        let config = form.apply(&self.config().await);

        config.validate()?;

        self.gateway.save_config(config.clone()).await?;

        self.state.write().await.config = config.clone();

        Ok(config)
    }

    /// Upload a product image and return its URI.
    ///
    /// # Errors
    ///
    /// Returns an error for oversized or empty images, or when the upload
    /// fails.
    pub async fn upload_image(
        &self,
        _session: &AdminSession,
        image: ImageUpload,
    ) -> Result<String, CatalogError> {
        Ok(self.gateway.upload_image(image, PRODUCT_IMAGE_FOLDER).await?)
    }
}

fn upsert(products: &mut Vec<Product>, product: Product) {
    match products.iter_mut().find(|existing| existing.id == product.id) {
        Some(existing) => *existing = product,
        None => {
            products.push(product);
            products.sort_by_key(|product| product.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use storefront::categories::CategoryError;
    use testresult::TestResult;

    use crate::{
        admin::test_session,
        gateway::{GatewayError, service::MockCatalogGateway},
    };

    use super::*;

    fn product(id: u64, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: 8500,
            category: category.to_string(),
            description: String::new(),
            image: String::new(),
            is_new: false,
            sold_out: false,
        }
    }

    fn loaded_gateway(products: Vec<Product>, categories: &[&str]) -> MockCatalogGateway {
        let mut gateway = MockCatalogGateway::new();
        let categories = CategorySet::new(categories.iter().copied());

        gateway
            .expect_list_products()
            .once()
            .returning(move || Ok(products.clone()));
        gateway
            .expect_list_categories()
            .once()
            .returning(move || Ok(categories.clone()));
        gateway
            .expect_get_config()
            .once()
            .returning(|| Ok(StoreConfig::default()));

        gateway
    }

    async fn loaded_store(gateway: MockCatalogGateway) -> TestResult<CatalogStore> {
        let store = CatalogStore::new(Arc::new(gateway));

        store.load().await?;

        Ok(store)
    }

    #[tokio::test]
    async fn load_failure_leaves_empty_unloaded_state() {
        let mut gateway = MockCatalogGateway::new();

        gateway
            .expect_list_products()
            .once()
            .returning(|| Err(GatewayError::Timeout));
        gateway
            .expect_list_categories()
            .returning(|| Ok(CategorySet::default()));
        gateway
            .expect_get_config()
            .returning(|| Ok(StoreConfig::default()));

        let store = CatalogStore::new(Arc::new(gateway));

        let result = store.load().await;

        assert!(
            matches!(&result, Err(error) if error.is_retryable()),
            "expected retryable error, got {result:?}"
        );
        assert_eq!(store.snapshot().await, CatalogSnapshot::default());
        assert!(!store.is_loaded().await);
    }

    #[tokio::test]
    async fn categories_fall_back_to_product_categories() -> TestResult {
        let gateway = loaded_gateway(
            vec![
                product(1, "Boné", "Acessórios"),
                product(2, "Vestido", "Roupas"),
                product(3, "Saia", "Roupas"),
            ],
            &[],
        );

        let store = loaded_store(gateway).await?;

        assert_eq!(store.display_categories().await, ["Todos", "Acessórios", "Roupas"]);

        Ok(())
    }

    #[tokio::test]
    async fn visible_products_applies_category_and_query() -> TestResult {
        let gateway = loaded_gateway(
            vec![
                product(1, "Vestido Azul", "Roupas"),
                product(2, "Tênis Azul", "Calçados"),
                product(3, "Saia", "Roupas"),
            ],
            &["Roupas", "Calçados"],
        );

        let store = loaded_store(gateway).await?;

        let visible = store.visible_products(&CatalogFilter::new("Roupas", "azul")).await;
        let ids: Vec<ProductId> = visible.iter().map(|product| product.id).collect();

        assert_eq!(ids, [ProductId::new(1)]);
        assert_eq!(store.visible_products(&CatalogFilter::default()).await.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn save_product_rejects_unknown_category_without_writing() -> TestResult {
        let mut gateway = loaded_gateway(Vec::new(), &["Roupas"]);

        gateway.expect_save_product().never();

        let store = loaded_store(gateway).await?;

        let result = store
            .save_product(
                &test_session(),
                ProductForm {
                    name: "Chapéu".to_string(),
                    category: "Chapéus".to_string(),
                    ..ProductForm::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CatalogError::InvalidProduct(ProductError::UnknownCategory(_)))),
            "expected UnknownCategory, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn saved_product_appears_after_gateway_confirms() -> TestResult {
        let mut gateway = loaded_gateway(vec![product(1, "Saia", "Roupas")], &["Roupas"]);

        gateway
            .expect_save_product()
            .once()
            .returning(|product| Ok(product.with_id(ProductId::new(2))));

        let store = loaded_store(gateway).await?;

        let saved = store
            .save_product(
                &test_session(),
                ProductForm {
                    name: "Vestido".to_string(),
                    price: 9000,
                    category: "Roupas".to_string(),
                    ..ProductForm::default()
                },
            )
            .await?;

        assert_eq!(saved.id, ProductId::new(2));
        assert_eq!(store.product(ProductId::new(2)).await, Some(saved));
        assert_eq!(store.snapshot().await.products.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn failed_save_leaves_state_untouched() -> TestResult {
        let mut gateway = loaded_gateway(vec![product(1, "Saia", "Roupas")], &["Roupas"]);

        gateway
            .expect_save_product()
            .once()
            .returning(|_| Err(GatewayError::Timeout));

        let store = loaded_store(gateway).await?;
        let before = store.snapshot().await;

        let mut form = ProductForm::edit(&product(1, "Saia", "Roupas"));
        form.sold_out = true;

        let result = store.save_product(&test_session(), form).await;

        assert!(result.is_err(), "expected error, got {result:?}");
        assert_eq!(store.snapshot().await, before);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_drops_it_from_state() -> TestResult {
        let mut gateway = loaded_gateway(vec![product(1, "Saia", "Roupas")], &["Roupas"]);

        gateway
            .expect_delete_product()
            .withf(|id| *id == ProductId::new(1))
            .times(2)
            .returning(|_| Ok(()));

        let store = loaded_store(gateway).await?;

        store.delete_product(&test_session(), ProductId::new(1)).await?;
        store.delete_product(&test_session(), ProductId::new(1)).await?;

        assert!(store.snapshot().await.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_category_is_rejected() -> TestResult {
        let mut gateway = loaded_gateway(Vec::new(), &["Roupas"]);

        gateway.expect_save_categories().never();

        let store = loaded_store(gateway).await?;

        let result = store.add_category(&test_session(), "Roupas").await;

        assert!(
            matches!(result, Err(CatalogError::InvalidCategory(CategoryError::Duplicate(_)))),
            "expected Duplicate, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_a_category_moves_products_to_outros() -> TestResult {
        let mut gateway = loaded_gateway(
            vec![product(1, "Boné", "Acessórios"), product(2, "Saia", "Roupas")],
            &["Roupas", "Acessórios"],
        );

        gateway
            .expect_save_categories()
            .withf(|categories| categories.names() == ["Roupas", "Outros"])
            .once()
            .returning(|_| Ok(()));
        gateway
            .expect_save_product()
            .withf(|product| product.id == ProductId::new(1) && product.category == "Outros")
            .once()
            .returning(Ok);

        let store = loaded_store(gateway).await?;

        let moved = store.remove_category(&test_session(), "Acessórios").await?;

        assert_eq!(moved, 1);
        assert_eq!(
            store.product(ProductId::new(1)).await.map(|product| product.category),
            Some("Outros".to_string())
        );
        assert_eq!(store.display_categories().await, ["Todos", "Roupas", "Outros"]);

        Ok(())
    }

    #[tokio::test]
    async fn failed_category_removal_can_be_retried() -> TestResult {
        let mut gateway = loaded_gateway(
            vec![product(1, "Boné", "Acessórios"), product(2, "Saia", "Roupas")],
            &["Roupas", "Acessórios"],
        );
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);

        gateway
            .expect_save_product()
            .withf(|product| product.id == ProductId::new(1) && product.category == "Outros")
            .times(2)
            .returning(move |product| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(GatewayError::Timeout)
                } else {
                    Ok(product)
                }
            });
        gateway
            .expect_save_categories()
            .withf(|categories| categories.names() == ["Roupas", "Outros"])
            .once()
            .returning(|_| Ok(()));

        let store = loaded_store(gateway).await?;

        let first = store.remove_category(&test_session(), "Acessórios").await;

        assert!(
            matches!(first, Err(CatalogError::Gateway(GatewayError::Timeout))),
            "expected Timeout, got {first:?}"
        );
        assert_eq!(
            store.display_categories().await,
            ["Todos", "Roupas", "Acessórios"]
        );

        let moved = store.remove_category(&test_session(), "Acessórios").await?;

        assert_eq!(moved, 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(
            store.product(ProductId::new(1)).await.map(|product| product.category),
            Some("Outros".to_string())
        );
        assert_eq!(store.display_categories().await, ["Todos", "Roupas", "Outros"]);

        Ok(())
    }

    #[tokio::test]
    async fn removing_an_unknown_category_is_a_no_op() -> TestResult {
        let mut gateway = loaded_gateway(Vec::new(), &["Roupas"]);

        gateway.expect_save_categories().never();

        let store = loaded_store(gateway).await?;

        assert_eq!(store.remove_category(&test_session(), "Brinquedos").await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn save_config_normalizes_contact() -> TestResult {
        let mut gateway = loaded_gateway(Vec::new(), &["Roupas"]);

        gateway
            .expect_save_config()
            .withf(|config| config.whatsapp_number == "244923111222")
            .once()
            .returning(|_| Ok(()));

        let store = loaded_store(gateway).await?;

        store
            .save_config(
                &test_session(),
                ConfigForm {
                    whatsapp_number: Some("+244 923 111 222".to_string()),
                    ..ConfigForm::default()
                },
            )
            .await?;

        assert_eq!(store.config().await.whatsapp_number, "244923111222");

        Ok(())
    }

    #[tokio::test]
    async fn save_config_rejects_empty_contact() -> TestResult {
        let mut gateway = loaded_gateway(Vec::new(), &["Roupas"]);

        gateway.expect_save_config().never();

        let store = loaded_store(gateway).await?;

        let result = store
            .save_config(
                &test_session(),
                ConfigForm {
                    whatsapp_number: Some("sem número".to_string()),
                    ..ConfigForm::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CatalogError::InvalidConfig(_))),
            "expected InvalidConfig, got {result:?}"
        );

        Ok(())
    }
}
