#![cfg(all(test, feature = "server"))]

use std::path::PathBuf;

use crate::blobs;
use crate::error::StorageError;
use crate::storage::filesystem::FilesystemStore;
use crate::storage::memory::MemoryStore;
use crate::storage::remote::RemoteBlobStore;
use crate::storage::ObjectStore;

const SERVE_URL: &str = "http://localhost:8080/dev/uploads";

#[tokio::test]
async fn memory_store_round_trip() {
    let store = MemoryStore::new(SERVE_URL);

    let blob = store
        .put("uploads/1-hello.txt", b"hello".to_vec(), Some("text/plain"))
        .await
        .expect("put should succeed");
    assert_eq!(blob.pathname, "uploads/1-hello.txt");
    assert_eq!(blob.size, 5);
    assert_eq!(blob.url, format!("{SERVE_URL}/uploads/1-hello.txt"));

    // Prefix filtering: an object outside the namespace is not listed.
    store
        .put("other/2-skip.txt", b"x".to_vec(), None)
        .await
        .expect("put should succeed");

    let listed = store.list("uploads/").await.expect("list should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pathname, "uploads/1-hello.txt");
    assert_eq!(store.get("uploads/1-hello.txt"), Some(b"hello".to_vec()));

    store
        .delete("uploads/1-hello.txt")
        .await
        .expect("delete should succeed");
    let listed = store.list("uploads/").await.expect("list should succeed");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn memory_store_delete_is_idempotent() {
    let store = MemoryStore::new(SERVE_URL);
    store
        .delete("uploads/never-existed.txt")
        .await
        .expect("deleting an unknown key is not an error");
}

#[tokio::test]
async fn upload_blob_derives_prefixed_key() {
    let store = MemoryStore::new(SERVE_URL);
    let blob = blobs::upload_blob(&store, "Test File.txt", b"0123456789".to_vec(), None)
        .await
        .expect("upload should succeed");

    let rest = blob
        .pathname
        .strip_prefix("uploads/")
        .expect("pathname keeps the uploads/ prefix");
    let (stamp, name) = rest.split_once('-').expect("timestamp-name separator");
    assert!(!stamp.is_empty() && stamp.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(name, "test-file.txt");
    assert_eq!(blob.size, 10);

    let listed = blobs::list_blobs(&store).await.expect("list should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pathname, blob.pathname);

    blobs::delete_blob(&store, &blob.pathname)
        .await
        .expect("delete should succeed");
    let listed = blobs::list_blobs(&store).await.expect("list should succeed");
    assert!(listed.is_empty());
}

fn scratch_dir(tag: &str) -> PathBuf {
    PathBuf::from(format!(".test-uploads-{}-{tag}", std::process::id()))
}

#[tokio::test]
async fn filesystem_store_round_trip() {
    let base = scratch_dir("roundtrip");
    let store = FilesystemStore::new(&base.to_string_lossy(), SERVE_URL);

    let blob = store
        .put("uploads/1-nested.txt", b"abc".to_vec(), None)
        .await
        .expect("put should succeed");
    assert_eq!(blob.size, 3);

    let listed = store.list("uploads/").await.expect("list should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pathname, "uploads/1-nested.txt");
    assert_eq!(listed[0].url, format!("{SERVE_URL}/uploads/1-nested.txt"));

    store
        .delete("uploads/1-nested.txt")
        .await
        .expect("delete should succeed");
    store
        .delete("uploads/1-nested.txt")
        .await
        .expect("second delete is idempotent");
    let listed = store.list("uploads/").await.expect("list should succeed");
    assert!(listed.is_empty());

    let _ = std::fs::remove_dir_all(&base);
}

#[tokio::test]
async fn filesystem_store_rejects_traversal_keys() {
    let base = scratch_dir("traversal");
    let store = FilesystemStore::new(&base.to_string_lossy(), SERVE_URL);

    let err = store
        .put("../escape.txt", b"x".to_vec(), None)
        .await
        .expect_err("traversal key must be rejected");
    assert!(matches!(err, StorageError::InvalidKey));

    let err = store
        .delete("/etc/passwd")
        .await
        .expect_err("absolute key must be rejected");
    assert!(matches!(err, StorageError::InvalidKey));

    let _ = std::fs::remove_dir_all(&base);
}

#[tokio::test]
async fn remote_store_without_token_reports_configuration_error() {
    let store = RemoteBlobStore::new("https://blob.example.com", None);

    // The token check precedes any network I/O, so all three operations
    // fail fast with the configuration-specific message.
    let err = store.list("uploads/").await.expect_err("list must fail");
    assert!(err.to_string().contains("BLOB_READ_WRITE_TOKEN"));

    let err = store
        .put("uploads/1-a.txt", b"x".to_vec(), None)
        .await
        .expect_err("put must fail");
    assert!(matches!(err, StorageError::MissingToken));

    let err = store
        .delete("uploads/1-a.txt")
        .await
        .expect_err("delete must fail");
    assert!(matches!(err, StorageError::MissingToken));
}
