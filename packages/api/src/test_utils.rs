//! Helpers for handler and integration tests: an `AppState` backed by the
//! in-memory store instead of the real external service.

use std::sync::Arc;

use crate::state::AppState;
use crate::storage::memory::MemoryStore;

pub const TEST_SERVE_URL: &str = "http://localhost:8080/dev/uploads";

pub fn test_state() -> (Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(TEST_SERVE_URL));
    let state = Arc::new(AppState {
        storage: store.clone(),
    });
    (state, store)
}

pub fn test_router() -> axum::Router {
    let (state, _) = test_state();
    crate::http::router(state)
}
