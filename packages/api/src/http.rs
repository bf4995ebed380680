//! The three HTTP endpoints: list, upload, delete.
//!
//! Each handler is a thin validate-call-respond shim over the storage
//! adapter. Caller input errors map to 400 with a specific message;
//! everything else (missing configuration included) maps to 500 with the
//! adapter's message surfaced verbatim in the JSON `error` field.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::blobs;
use crate::error::StorageError;
use crate::state::AppState;
use crate::types::{BlobListResponse, DeleteResponse, ErrorResponse, UploadResponse};

/// A status code plus the message the client will see.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// `GET /api/blobs`
pub async fn list_blobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BlobListResponse>, ApiError> {
    tracing::debug!("list_blobs");
    let blobs = blobs::list_blobs(state.storage.as_ref()).await?;
    Ok(Json(BlobListResponse { blobs }))
}

/// `POST /api/upload` — multipart form with a `file` field.
pub async fn upload_blob(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    tracing::debug!("upload_blob");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("invalid multipart request: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // A `file` field without a filename is not a file part.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            return Err(ApiError::bad_request("No file uploaded."));
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(format!("failed to read file field: {err}")))?;

        let blob = blobs::upload_blob(
            state.storage.as_ref(),
            &file_name,
            data.to_vec(),
            content_type.as_deref(),
        )
        .await?;
        return Ok(Json(UploadResponse { blob }));
    }

    Err(ApiError::bad_request("No file uploaded."))
}

/// `POST /api/delete` — JSON body `{pathname}`.
///
/// The body is parsed loosely so a missing or non-string pathname yields the
/// documented 400 rather than a framework rejection.
pub async fn delete_blob(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::debug!("delete_blob");
    let pathname = body
        .get("pathname")
        .and_then(Value::as_str)
        .filter(|pathname| !pathname.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing blob pathname."))?;

    blobs::delete_blob(state.storage.as_ref(), pathname).await?;
    Ok(Json(DeleteResponse { ok: true }))
}

/// The API surface, ready to merge into the server's router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/blobs", get(list_blobs))
        .route("/api/upload", post(upload_blob))
        .route("/api/delete", post(delete_blob))
        .with_state(state)
}
