//! Admin edit forms.

use storefront::{
    products::{Product, ProductError, ProductId},
    store::{StoreConfig, normalize_contact},
};

/// Product editor input. `id` is `None` when creating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_new: bool,
    pub sold_out: bool,
}

impl ProductForm {
    /// Prefill the form from an existing product.
    #[must_use]
    pub fn edit(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            description: Some(product.description.clone()).filter(|d| !d.is_empty()),
            image: Some(product.image.clone()).filter(|i| !i.is_empty()),
            is_new: product.is_new,
            sold_out: product.sold_out,
        }
    }

    /// Build the product this form describes.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] when a required field is blank.
    pub fn into_product(self) -> Result<Product, ProductError> {
        let product = Product {
            id: self.id.unwrap_or(ProductId::UNASSIGNED),
            name: self.name.trim().to_string(),
            price: self.price,
            category: self.category.trim().to_string(),
            description: self.description.unwrap_or_default().trim().to_string(),
            image: self.image.unwrap_or_default().trim().to_string(),
            is_new: self.is_new,
            sold_out: self.sold_out,
        };

        product.validate()?;

        Ok(product)
    }
}

/// Store settings editor input. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigForm {
    pub store_name: Option<String>,
    pub logo_url: Option<String>,
    pub whatsapp_number: Option<String>,
}

impl ConfigForm {
    /// Apply the form over `current`. The contact is reduced to digits.
    #[must_use]
    pub fn apply(self, current: &StoreConfig) -> StoreConfig {
        StoreConfig {
            store_name: self
                .store_name
                .map_or_else(|| current.store_name.clone(), |name| name.trim().to_string()),
            logo_url: self
                .logo_url
                .map_or_else(|| current.logo_url.clone(), |url| url.trim().to_string()),
            whatsapp_number: self
                .whatsapp_number
                .map_or_else(|| current.whatsapp_number.clone(), |raw| normalize_contact(&raw)),
        }
    }
}
