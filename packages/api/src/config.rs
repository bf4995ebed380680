//! Process configuration, read from the environment once at server startup.

/// Default endpoint of the managed blob-store API.
pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Local,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        match std::env::var("APP_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "local" => AppMode::Local,
            _ => AppMode::Production, // Default to production for safety
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Managed blob store reached over HTTP with a bearer token.
    ///
    /// The token is optional at startup: every adapter call fails with a
    /// configuration-specific message while it is absent.
    Remote {
        api_url: String,
        token: Option<String>,
    },
    /// Local-mode store on disk, served back by the web server.
    Filesystem {
        base_path: String,
        serve_url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: AppMode,
    pub storage: StorageConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mode = AppMode::from_env();
        let host = std::env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);

        let storage = match mode {
            AppMode::Local => {
                let base_url = std::env::var("APP_BASE_URL")
                    .unwrap_or_else(|_| format!("http://localhost:{port}"));
                StorageConfig::Filesystem {
                    base_path: ".dev/uploads".to_string(),
                    serve_url: format!("{}/dev/uploads", base_url.trim_end_matches('/')),
                }
            }
            AppMode::Production => StorageConfig::Remote {
                api_url: std::env::var("BLOB_API_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BLOB_API_URL.to_string()),
                token: std::env::var("BLOB_READ_WRITE_TOKEN")
                    .ok()
                    .filter(|token| !token.trim().is_empty()),
            },
        };

        Self {
            mode,
            storage,
            host,
            port,
        }
    }
}
