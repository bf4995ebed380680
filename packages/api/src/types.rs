use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One stored object as the external blob store reports it and as the three
/// API endpoints serialize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobItem {
    /// Unique key within the store, e.g. `uploads/1754450000000-report.pdf`.
    pub pathname: String,
    #[serde(with = "time::serde::rfc3339")]
    pub uploaded_at: OffsetDateTime,
    pub size: u64,
    /// Publicly reachable address of the object.
    pub url: String,
}

/// `GET /api/blobs` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobListResponse {
    pub blobs: Vec<BlobItem>,
}

/// `POST /api/upload` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub blob: BlobItem,
}

/// `POST /api/delete` success body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Failure body shared by all endpoints: a plain message, no error taxonomy
/// beyond the HTTP status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
