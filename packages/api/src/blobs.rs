//! Blob operations and storage-key derivation.
//!
//! This is the service layer the HTTP handlers call: each operation is a
//! single pass-through to the configured [`ObjectStore`], plus the key
//! derivation for uploads.

use time::OffsetDateTime;

/// Key namespace for everything this app writes and lists.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Lowercase the filename and collapse every whitespace run (including
/// leading and trailing ones) to a single hyphen.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace {
            out.push('-');
            in_whitespace = false;
        }
        out.extend(ch.to_lowercase());
    }
    if in_whitespace {
        out.push('-');
    }
    out
}

/// Derive the storage key for an upload: `{prefix}/{epoch-millis}-{name}`.
///
/// Uniqueness rests entirely on this composition; two uploads of the same
/// sanitized name within one millisecond would collide.
pub fn blob_pathname(prefix: &str, file_name: &str, uploaded_at: OffsetDateTime) -> String {
    let millis = uploaded_at.unix_timestamp_nanos() / 1_000_000;
    format!("{prefix}/{millis}-{}", sanitize_file_name(file_name))
}

#[cfg(feature = "server")]
pub use server::{delete_blob, list_blobs, upload_blob};

#[cfg(feature = "server")]
mod server {
    use time::OffsetDateTime;

    use super::{blob_pathname, UPLOAD_PREFIX};
    use crate::error::StorageError;
    use crate::storage::ObjectStore;
    use crate::types::BlobItem;

    pub async fn list_blobs(store: &dyn ObjectStore) -> Result<Vec<BlobItem>, StorageError> {
        store.list(&format!("{UPLOAD_PREFIX}/")).await
    }

    pub async fn upload_blob(
        store: &dyn ObjectStore,
        file_name: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<BlobItem, StorageError> {
        let pathname = blob_pathname(UPLOAD_PREFIX, file_name, OffsetDateTime::now_utc());
        store.put(&pathname, data, content_type).await
    }

    pub async fn delete_blob(store: &dyn ObjectStore, pathname: &str) -> Result<(), StorageError> {
        store.delete(pathname).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn sanitize_lowercases_and_hyphenates() {
        assert_eq!(sanitize_file_name("My File.PNG"), "my-file.png");
        assert_eq!(sanitize_file_name("Test File.txt"), "test-file.txt");
        assert_eq!(sanitize_file_name("already-clean.txt"), "already-clean.txt");
    }

    #[test]
    fn sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize_file_name("a  b\tc"), "a-b-c");
        assert_eq!(sanitize_file_name("  padded  .txt"), "-padded-.txt");
    }

    #[test]
    fn pathname_is_prefix_millis_name() {
        let uploaded_at = datetime!(2026-08-06 12:00:00 UTC);
        let millis = uploaded_at.unix_timestamp_nanos() / 1_000_000;
        assert_eq!(
            blob_pathname(UPLOAD_PREFIX, "Test File.txt", uploaded_at),
            format!("uploads/{millis}-test-file.txt")
        );
    }
}
