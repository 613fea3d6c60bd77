//! Blob storage for product images.

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mockall::automock;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde::Deserialize;

use crate::{
    gateway::{errors::BackendError, remote::document_url},
    secret::Secret,
};

/// Largest image accepted for upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Inline the image as a `data:` URI.
    ///
    /// Documents carrying these grow with every image, so this only suits
    /// stores without a blob backend.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, BASE64.encode(&self.bytes))
    }
}

#[automock]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the image under `folder` and return its public URI.
    async fn upload(&self, image: ImageUpload, folder: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct BlobStoreConfig {
    pub base_url: String,
    pub api_key: Option<Secret>,
    pub timeout: Duration,
}

/// Blob store accepting `POST {base}/{folder}/{object}` with the raw bytes
/// and answering `{"url": "..."}`.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    base_url: Url,
    api_key: Option<Secret>,
    http: Client,
}

impl HttpBlobStore {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: BlobStoreConfig) -> Result<Self, BackendError> {
        let base_url = Url::parse(&config.base_url).map_err(|error| {
            BackendError::UnexpectedResponse(format!(
                "invalid blob store url {:?}: {error}",
                config.base_url
            ))
        })?;

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            http,
        })
    }
}

/// Object name under the folder: upload time in milliseconds, then the
/// uploaded file name.
pub(crate) fn object_name(uploaded_at_ms: i64, file_name: &str) -> String {
    let file_name: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    format!("{uploaded_at_ms}_{file_name}")
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(&self, image: ImageUpload, folder: &str) -> Result<String, BackendError> {
        let name = object_name(jiff::Timestamp::now().as_millisecond(), &image.file_name);
        let url = document_url(&self.base_url, &[folder, name.as_str()])?;

        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, image.content_type)
            .body(image.bytes);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose());
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(BackendError::UnexpectedResponse(format!(
                "upload failed with status {status}: {text}"
            )));
        }

        let parsed: UploadResponse = response.json().await?;

        Ok(parsed.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_carries_content_type_and_base64_body() {
        let image = ImageUpload {
            file_name: "dot.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: b"hello".to_vec(),
        };

        assert_eq!(image.to_data_uri(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn object_name_prefixes_time_and_sanitizes() {
        assert_eq!(
            object_name(1_700_000_000_000, "foto do boné.jpg"),
            "1700000000000_foto_do_bon_.jpg"
        );
    }
}
