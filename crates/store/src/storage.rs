//! Object storage access for project media.

use async_trait::async_trait;

use crate::config::{http_client, StoreConfig};
use crate::error::{error_from_response, StoreError};

/// Fixed bucket holding all project media.
pub const STORAGE_BUCKET: &str = "project-images";

/// Binary object upload/removal under the fixed bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `path`, returning the publicly reachable URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    /// Remove the object at `path`. Only the upload saga's compensation
    /// step calls this; failures there are logged and swallowed.
    async fn remove(&self, path: &str) -> Result<(), StoreError>;
}

/// HTTP implementation of [`ObjectStore`] against the hosted platform.
pub struct ObjectStorage {
    client: reqwest::Client,
    config: StoreConfig,
    bearer: String,
}

impl ObjectStorage {
    pub fn new(config: StoreConfig) -> Self {
        let bearer = config.api_key.clone();
        Self {
            client: http_client(),
            config,
            bearer,
        }
    }

    /// Use a signed-in user's access token; uploads require one.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.bearer = token.into();
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{STORAGE_BUCKET}/{path}",
            self.config.base_url
        )
    }

    /// Public URL for an object in the fixed bucket.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{STORAGE_BUCKET}/{path}",
            self.config.base_url
        )
    }
}

#[async_trait]
impl ObjectStore for ObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.object_url(path))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(self.public_url(path))
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.object_url(path))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.bearer)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
