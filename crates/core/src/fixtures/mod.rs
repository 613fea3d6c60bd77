//! Fixtures
//!
//! The default catalog a fresh store is seeded with.

use std::{fs, path::Path};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    categories::CategorySet,
    fixtures::products::ProductFixture,
    products::{Product, ProductId},
    store::StoreConfig,
};

pub mod products;

const DEFAULT_CATALOG: &str = include_str!("../../fixtures/catalog.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product without an id
    #[error("Product {0:?} has no id")]
    MissingId(String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// Product in a category that is not listed
    #[error("Product {product:?} uses unknown category {category:?}")]
    UnknownCategory {
        /// Product name
        product: String,
        /// Category it refers to
        category: String,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    store: Option<StoreConfig>,
    categories: Vec<String>,
    products: Vec<ProductFixture>,
}

/// A complete catalog: products, categories and store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Products in display order
    pub products: Vec<Product>,

    /// Category set
    pub categories: CategorySet,

    /// Store configuration
    pub config: StoreConfig,
}

impl Catalog {
    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded fixture is malformed.
    pub fn default_catalog() -> Result<Self, FixtureError> {
        Self::from_yaml(DEFAULT_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML, bad prices, missing or duplicate
    /// ids, or products in categories the fixture does not list.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let categories = CategorySet::new(fixture.categories);

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = FxHashSet::default();

        for product in &products {
            if !seen.insert(product.id) {
                return Err(FixtureError::DuplicateId(product.id));
            }

            if !categories.contains(&product.category) {
                return Err(FixtureError::UnknownCategory {
                    product: product.name.clone(),
                    category: product.category.clone(),
                });
            }
        }

        Ok(Self {
            products,
            categories,
            config: fixture.store.unwrap_or_default(),
        })
    }
}
