use anyhow::Result;
use std::sync::Arc;

use crate::config::{AppConfig, AppMode, StorageConfig};
use crate::storage::{filesystem::FilesystemStore, remote::RemoteBlobStore, ObjectStore};

/// Application state shared with every request handler.
///
/// Built once at startup and passed through axum's `State`; nothing in here
/// is mutable between requests.
pub struct AppState {
    pub storage: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.mode {
            AppMode::Local => tracing::info!("🔧 App Mode: LOCAL"),
            AppMode::Production => tracing::info!("🚀 App Mode: PRODUCTION"),
        }

        let storage: Arc<dyn ObjectStore> = match &config.storage {
            StorageConfig::Remote { api_url, token } => {
                tracing::info!("   Storage: remote blob store ({})", api_url);
                if token.is_none() {
                    tracing::warn!(
                        "BLOB_READ_WRITE_TOKEN is not set; blob operations will fail until it is configured"
                    );
                }
                Arc::new(RemoteBlobStore::new(api_url.clone(), token.clone()))
            }
            StorageConfig::Filesystem {
                base_path,
                serve_url,
            } => {
                tracing::info!("   Storage: filesystem ({})", base_path);
                std::fs::create_dir_all(base_path)?;
                Arc::new(FilesystemStore::new(base_path, serve_url))
            }
        };

        Ok(Self { storage })
    }
}
