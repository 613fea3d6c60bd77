//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product identifier.
///
/// [`ProductId::UNASSIGNED`] marks a product that has never been saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Sentinel for a product that still needs an id.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the unassigned sentinel.
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }

    /// The id after this one.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Errors raised when a product fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// The product name is empty or whitespace.
    #[error("product name is required")]
    MissingName,

    /// The product category is empty or whitespace.
    #[error("product category is required")]
    MissingCategory,

    /// The category is not part of the current category set.
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}

/// Product
///
/// Field names serialize in camel case so stored documents keep the
/// `isNew`/`soldOut` shape existing store data already uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id, [`ProductId::UNASSIGNED`] until first saved
    #[serde(default)]
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in whole kwanzas
    pub price: u64,

    /// Category name
    pub category: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Image URI or `data:` reference
    #[serde(default)]
    pub image: String,

    /// Advisory "new" badge
    #[serde(default)]
    pub is_new: bool,

    /// Whether the product can currently be bought
    #[serde(default)]
    pub sold_out: bool,
}

impl Product {
    /// Check the fields every stored product must carry.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] naming the first missing field.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::MissingName);
        }

        if self.category.trim().is_empty() {
            return Err(ProductError::MissingCategory);
        }

        Ok(())
    }

    /// Copy of this product carrying the given id.
    #[must_use]
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = id;
        self
    }

    /// Whether the query appears in the name or description, ignoring case.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Highest id present in `products`, or [`ProductId::UNASSIGNED`] when empty.
pub fn max_id<'a>(products: impl IntoIterator<Item = &'a Product>) -> ProductId {
    products
        .into_iter()
        .map(|product| product.id)
        .max()
        .unwrap_or(ProductId::UNASSIGNED)
}
