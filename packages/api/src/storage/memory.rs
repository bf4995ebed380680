use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use time::OffsetDateTime;

use super::ObjectStore;
use crate::error::StorageError;
use crate::types::BlobItem;

/// In-memory fake used by tests in place of the real external store.
///
/// Keys are held in a `BTreeMap`, so listings come back in pathname order.
pub struct MemoryStore {
    serve_url: String,
    objects: Mutex<BTreeMap<String, MemoryObject>>,
}

struct MemoryObject {
    data: Vec<u8>,
    uploaded_at: OffsetDateTime,
}

impl MemoryStore {
    pub fn new(serve_url: &str) -> Self {
        Self {
            serve_url: serve_url.trim_end_matches('/').to_string(),
            objects: Mutex::new(BTreeMap::new()),
        }
    }

    fn object_url(&self, pathname: &str) -> String {
        format!("{}/{}", self.serve_url, pathname)
    }

    /// Raw bytes of a stored object, for test assertions.
    pub fn get(&self, pathname: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .expect("memory store poisoned")
            .get(pathname)
            .map(|object| object.data.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobItem>, StorageError> {
        let objects = self.objects.lock().expect("memory store poisoned");
        Ok(objects
            .iter()
            .filter(|(pathname, _)| pathname.starts_with(prefix))
            .map(|(pathname, object)| BlobItem {
                pathname: pathname.clone(),
                uploaded_at: object.uploaded_at,
                size: object.data.len() as u64,
                url: self.object_url(pathname),
            })
            .collect())
    }

    async fn put(
        &self,
        pathname: &str,
        data: Vec<u8>,
        _content_type: Option<&str>,
    ) -> Result<BlobItem, StorageError> {
        let blob = BlobItem {
            pathname: pathname.to_string(),
            uploaded_at: OffsetDateTime::now_utc(),
            size: data.len() as u64,
            url: self.object_url(pathname),
        };
        let mut objects = self.objects.lock().expect("memory store poisoned");
        objects.insert(
            pathname.to_string(),
            MemoryObject {
                data,
                uploaded_at: blob.uploaded_at,
            },
        );
        Ok(blob)
    }

    async fn delete(&self, pathname: &str) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().expect("memory store poisoned");
        objects.remove(pathname);
        Ok(())
    }
}
