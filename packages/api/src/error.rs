use thiserror::Error;

/// Failures surfaced by the storage adapters.
///
/// `MissingToken` is the configuration error; everything else is an
/// operational failure of the store itself. None of these are retried.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(
        "Missing BLOB_READ_WRITE_TOKEN. Create a blob store and add the \
         read/write token to your environment variables."
    )]
    MissingToken,

    #[error("blob store responded with status {status}: {message}")]
    Store { status: u16, message: String },

    #[error("blob store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid object key")]
    InvalidKey,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
