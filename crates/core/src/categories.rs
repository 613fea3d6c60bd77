//! Categories

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Synthetic "All" category shown first in listings; never persisted.
pub const ALL_CATEGORY: &str = "Todos";

/// Catch-all category that receives products whose category was removed.
pub const UNCATEGORIZED: &str = "Outros";

/// Errors raised when editing the category set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Category names cannot be blank.
    #[error("category name is required")]
    Blank,

    /// The synthetic "All" category cannot be stored.
    #[error("the \"Todos\" category is reserved")]
    Reserved,

    /// The category is already in the set.
    #[error("category {0:?} already exists")]
    Duplicate(String),
}

/// Ordered set of category names.
///
/// Insertion order is the display order. The set never contains
/// [`ALL_CATEGORY`] or blank names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Build a set from stored names, trimming them and dropping blanks,
    /// duplicates and the "All" sentinel.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = FxHashSet::default();

        let names = names
            .into_iter()
            .map(|name| name.into().trim().to_string())
            .filter(|name| !name.is_empty() && name != ALL_CATEGORY)
            .filter(|name| seen.insert(name.clone()))
            .collect();

        Self { names }
    }

    /// Stored category names, in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names as shown to shoppers: [`ALL_CATEGORY`] followed by the set.
    pub fn display_names(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORY)
            .chain(self.names.iter().map(String::as_str))
            .collect()
    }

    /// Whether `name` is a stored category.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// Number of stored categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no categories are stored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append a category.
    ///
    /// # Errors
    ///
    /// Returns a [`CategoryError`] for blank, reserved or duplicate names.
    pub fn add(&mut self, name: &str) -> Result<(), CategoryError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(CategoryError::Blank);
        }

        if name == ALL_CATEGORY {
            return Err(CategoryError::Reserved);
        }

        if self.contains(name) {
            return Err(CategoryError::Duplicate(name.to_string()));
        }

        self.names.push(name.to_string());

        Ok(())
    }

    /// Remove a category. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();

        self.names.retain(|existing| existing != name);

        self.names.len() != before
    }

    /// Append [`UNCATEGORIZED`] if it is missing.
    pub fn ensure_uncategorized(&mut self) {
        if !self.contains(UNCATEGORIZED) {
            self.names.push(UNCATEGORIZED.to_string());
        }
    }
}

impl From<Vec<String>> for CategorySet {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<CategorySet> for Vec<String> {
    fn from(set: CategorySet) -> Self {
        set.names
    }
}
