//! Shared wire types and server-side services for the blob upload app.
//!
//! The crate compiles for both the WASM client (types and key derivation
//! only) and the server. Everything that touches the network, the
//! filesystem, or axum lives behind the `server` feature.

pub mod blobs;
pub mod config;
pub mod types;

#[cfg(feature = "server")]
pub mod error;

#[cfg(feature = "server")]
pub mod http;

#[cfg(feature = "server")]
pub mod state;

#[cfg(feature = "server")]
pub mod storage;

#[cfg(feature = "server")]
pub mod test_utils;


#[cfg(all(test, feature = "server"))]
mod domain_tests;
