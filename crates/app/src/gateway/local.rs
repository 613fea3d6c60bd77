//! Local document store: one JSON file per collection.
//!
//! Serves as the whole backend when no remote store is configured, and as
//! the read fallback cache when one is.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::{fs, sync::RwLock};

use crate::gateway::{
    documents::{Collection, DocumentStore},
    errors::BackendError,
};

type Documents = BTreeMap<String, Value>;

#[derive(Debug)]
pub struct LocalDocumentStore {
    root: Option<PathBuf>,
    collections: RwLock<FxHashMap<Collection, Documents>>,
}

impl LocalDocumentStore {
    /// Store persisting under `root`, created on first write.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            collections: RwLock::default(),
        }
    }

    /// Store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            root: None,
            collections: RwLock::default(),
        }
    }

    /// Swap the whole collection for `documents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection file cannot be written.
    pub async fn replace_all(
        &self,
        collection: Collection,
        documents: impl IntoIterator<Item = (String, Value)> + Send,
    ) -> Result<(), BackendError> {
        let documents: Documents = documents.into_iter().collect();

        let mut collections = self.collections.write().await;

        self.persist(collection, &documents).await?;

        collections.insert(collection, documents);

        Ok(())
    }

    async fn snapshot(&self, collection: Collection) -> Result<Documents, BackendError> {
        if let Some(documents) = self.collections.read().await.get(&collection) {
            return Ok(documents.clone());
        }

        let mut collections = self.collections.write().await;

        if let Some(documents) = collections.get(&collection) {
            return Ok(documents.clone());
        }

        let documents = self.read(collection).await?;

        collections.insert(collection, documents.clone());

        Ok(documents)
    }

    async fn mutate<F>(&self, collection: Collection, mutate: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut Documents) + Send,
    {
        let mut collections = self.collections.write().await;

        let mut documents = match collections.get(&collection) {
            Some(documents) => documents.clone(),
            None => self.read(collection).await?,
        };

        mutate(&mut documents);

        self.persist(collection, &documents).await?;

        collections.insert(collection, documents);

        Ok(())
    }

    async fn read(&self, collection: Collection) -> Result<Documents, BackendError> {
        let Some(root) = &self.root else {
            return Ok(Documents::new());
        };

        match fs::read(collection_path(root, collection)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Documents::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn persist(
        &self,
        collection: Collection,
        documents: &Documents,
    ) -> Result<(), BackendError> {
        let Some(root) = &self.root else {
            return Ok(());
        };

        fs::create_dir_all(root).await?;

        let content = serde_json::to_vec_pretty(documents)?;
        let tmp_path = root.join(format!(".{}.json.tmp", collection.name()));

        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, collection_path(root, collection)).await?;

        Ok(())
    }
}

fn collection_path(root: &Path, collection: Collection) -> PathBuf {
    root.join(format!("{}.json", collection.name()))
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, BackendError> {
        Ok(self.snapshot(collection).await?.into_values().collect())
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, BackendError> {
        Ok(self.snapshot(collection).await?.remove(key))
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), BackendError> {
        let key = key.to_string();

        self.mutate(collection, move |documents| {
            documents.insert(key, document);
        })
        .await
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), BackendError> {
        self.mutate(collection, |documents| {
            documents.remove(key);
        })
        .await
    }
}
