use async_trait::async_trait;
use serde::Deserialize;

use super::ObjectStore;
use crate::error::StorageError;
use crate::types::BlobItem;

/// Production adapter for the managed blob store.
///
/// Every operation is a single authenticated round trip: list by prefix,
/// write a public object, delete by key. The bearer token is injected once
/// at construction; it is checked before any network I/O so a missing token
/// fails with the configuration message rather than an opaque HTTP error.
pub struct RemoteBlobStore {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    blobs: Vec<BlobItem>,
}

#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    error: String,
}

impl RemoteBlobStore {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        let api_url = api_url.into();
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn token(&self) -> Result<&str, StorageError> {
        self.token.as_deref().ok_or(StorageError::MissingToken)
    }

    fn object_url(&self, pathname: &str) -> String {
        format!("{}/{}", self.api_url, pathname)
    }
}

/// Pass a successful response through, or turn the body into a `Store` error.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, StorageError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let raw = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<StoreErrorBody>(&raw)
        .map(|body| body.error)
        .unwrap_or(raw);
    Err(StorageError::Store {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ObjectStore for RemoteBlobStore {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobItem>, StorageError> {
        let token = self.token()?;
        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("prefix", prefix)])
            .bearer_auth(token)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let body: ListResponse = resp.json().await?;
        tracing::debug!("listed {} blobs under {}", body.blobs.len(), prefix);
        Ok(body.blobs)
    }

    async fn put(
        &self,
        pathname: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<BlobItem, StorageError> {
        let token = self.token()?;
        let mut request = self
            .client
            .put(self.object_url(pathname))
            .query(&[("access", "public")])
            .bearer_auth(token)
            .body(data);
        if let Some(content_type) = content_type {
            request = request.header("x-content-type", content_type);
        }
        let resp = check_status(request.send().await?).await?;
        let blob: BlobItem = resp.json().await?;
        tracing::debug!("stored {}", blob.pathname);
        Ok(blob)
    }

    async fn delete(&self, pathname: &str) -> Result<(), StorageError> {
        let token = self.token()?;
        let resp = self
            .client
            .delete(self.object_url(pathname))
            .bearer_auth(token)
            .send()
            .await?;
        // The store reports unknown keys as 404; deletion is idempotent here.
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("{} already gone", pathname);
            return Ok(());
        }
        check_status(resp).await?;
        tracing::debug!("deleted {}", pathname);
        Ok(())
    }
}
