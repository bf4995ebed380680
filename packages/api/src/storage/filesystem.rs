use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use time::OffsetDateTime;
use tokio::fs;

use super::ObjectStore;
use crate::error::StorageError;
use crate::types::BlobItem;

/// Local-development store: objects live under `base_path` and are served
/// back by the web server at `serve_url`.
pub struct FilesystemStore {
    base_path: PathBuf,
    serve_url: String,
}

impl FilesystemStore {
    pub fn new(base_path: &str, serve_url: &str) -> Self {
        Self {
            base_path: PathBuf::from(base_path),
            serve_url: serve_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, pathname: &str) -> String {
        format!("{}/{}", self.serve_url, pathname)
    }
}

/// Keys come from request bodies, so they must not escape the base directory.
fn validate_key(pathname: &str) -> Result<(), StorageError> {
    let valid = !pathname.is_empty()
        && !pathname.starts_with('/')
        && pathname
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != "..");
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey)
    }
}

#[async_trait]
impl ObjectStore for FilesystemStore {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobItem>, StorageError> {
        let mut blobs = Vec::new();
        let mut pending = vec![self.base_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                // Nothing uploaded yet: the base directory may not exist.
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let meta = entry.metadata().await?;
                if meta.is_dir() {
                    pending.push(path);
                    continue;
                }
                let Ok(rel) = path.strip_prefix(&self.base_path) else {
                    continue;
                };
                let pathname = rel.to_string_lossy().replace('\\', "/");
                if !pathname.starts_with(prefix) {
                    continue;
                }
                let uploaded_at = meta
                    .modified()
                    .map(OffsetDateTime::from)
                    .unwrap_or_else(|_| OffsetDateTime::now_utc());
                blobs.push(BlobItem {
                    url: self.object_url(&pathname),
                    pathname,
                    uploaded_at,
                    size: meta.len(),
                });
            }
        }

        blobs.sort_by(|a, b| a.pathname.cmp(&b.pathname));
        Ok(blobs)
    }

    async fn put(
        &self,
        pathname: &str,
        data: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<BlobItem, StorageError> {
        validate_key(pathname)?;
        let file_path = self.base_path.join(pathname);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let size = data.len() as u64;
        fs::write(&file_path, data).await?;
        tracing::debug!("stored {}", file_path.display());
        Ok(BlobItem {
            pathname: pathname.to_string(),
            uploaded_at: OffsetDateTime::now_utc(),
            size,
            url: self.object_url(pathname),
        })
    }

    async fn delete(&self, pathname: &str) -> Result<(), StorageError> {
        validate_key(pathname)?;
        let file_path = self.base_path.join(pathname);
        match fs::remove_file(&file_path).await {
            Ok(()) => {
                tracing::debug!("deleted {}", file_path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("already deleted: {}", file_path.display());
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
