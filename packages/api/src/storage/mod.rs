use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::BlobItem;

pub mod filesystem;
pub mod memory;
pub mod remote;

/// The three operations this app needs from an object store.
///
/// Handlers and tests only see this trait, so the real external store can be
/// swapped for the filesystem or in-memory implementations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Enumerate objects whose key starts with `prefix`. No pagination is
    /// exposed; callers get whatever the store's first page yields.
    async fn list(&self, prefix: &str) -> Result<Vec<BlobItem>, StorageError>;

    /// Write `data` under the exact key `pathname` as a publicly readable
    /// object and return its metadata.
    async fn put(
        &self,
        pathname: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<BlobItem, StorageError>;

    /// Remove the object with the exact key `pathname`. Deleting a key that
    /// does not exist is treated as success.
    async fn delete(&self, pathname: &str) -> Result<(), StorageError>;
}
