//! Document store abstraction shared by the remote and local backends.

use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::gateway::errors::BackendError;

/// Key of the store configuration record in [`Collection::Config`].
pub const CONFIG_MAIN_KEY: &str = "main";

/// Key of the category list record in [`Collection::Config`].
pub const CONFIG_CATEGORIES_KEY: &str = "categories";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    /// Products keyed by their decimal id
    Products,

    /// Orders keyed by reference
    Orders,

    /// Singleton records: [`CONFIG_MAIN_KEY`] and [`CONFIG_CATEGORIES_KEY`]
    Config,
}

impl Collection {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Config => "config",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Keyed JSON documents grouped in collections.
#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, BackendError>;

    /// A single document, `None` when the key is absent.
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, BackendError>;

    /// Create or overwrite the document under `key`.
    async fn put(&self, collection: Collection, key: &str, document: Value)
    -> Result<(), BackendError>;

    /// Remove the document under `key`. Removing a missing key succeeds.
    async fn delete(&self, collection: Collection, key: &str) -> Result<(), BackendError>;
}
