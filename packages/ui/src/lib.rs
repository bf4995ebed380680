//! This crate contains all shared UI for the workspace.

mod blobs;
pub use blobs::BlobBrowser;

mod format;
pub use format::{format_bytes, format_uploaded_at};

mod theme;
pub use theme::AppTheme;
