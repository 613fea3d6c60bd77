//! Remote document store reached over a JSON REST API.
//!
//! Layout: `GET {base}/{collection}` lists documents, and
//! `GET|PUT|DELETE {base}/{collection}/{key}` address a single one. Every
//! request carries the API key as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::{
    gateway::{
        documents::{Collection, DocumentStore},
        errors::BackendError,
    },
    secret::Secret,
};

/// Connection settings for the remote document store.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// Base URL, e.g. `"https://store.example.com/v1"`.
    pub base_url: String,

    /// API key sent as a bearer token.
    pub api_key: Secret,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// [`DocumentStore`] backed by the remote REST API.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    base_url: Url,
    api_key: Secret,
    http: Client,
}

impl HttpDocumentStore {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: RemoteStoreConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url).map_err(|error| {
            BackendError::UnexpectedResponse(format!(
                "invalid base url {:?}: {error}",
                config.base_url
            ))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(BackendError::UnexpectedResponse(format!(
                "base url {:?} cannot hold paths",
                config.base_url
            )));
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            http,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, BackendError> {
        document_url(&self.base_url, segments)
    }
}

/// Append `segments` to `base`, percent-encoding each one.
pub(crate) fn document_url(base: &Url, segments: &[&str]) -> Result<Url, BackendError> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|()| {
            BackendError::UnexpectedResponse(format!("base url {base} cannot hold paths"))
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

async fn unexpected(action: &str, response: reqwest::Response) -> BackendError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    BackendError::UnexpectedResponse(format!("{action} failed with status {status}: {text}"))
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, BackendError> {
        let response = self
            .http
            .get(self.url(&[collection.name()])?)
            .bearer_auth(self.api_key.expose())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unexpected("list", response).await);
        }

        Ok(response.json().await?)
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, BackendError> {
        let response = self
            .http
            .get(self.url(&[collection.name(), key])?)
            .bearer_auth(self.api_key.expose())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(unexpected("get", response).await);
        }

        Ok(Some(response.json().await?))
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        document: Value,
    ) -> Result<(), BackendError> {
        let response = self
            .http
            .put(self.url(&[collection.name(), key])?)
            .bearer_auth(self.api_key.expose())
            .json(&document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(unexpected("put", response).await);
        }

        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.url(&[collection.name(), key])?)
            .bearer_auth(self.api_key.expose())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }

        Err(unexpected("delete", response).await)
    }
}
