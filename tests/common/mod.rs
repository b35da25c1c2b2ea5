//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{live_catalog, MockBackend};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_fetch_apps() {
//!     let backend = Arc::new(MockBackend::with_fixtures());
//!     let store = live_catalog(&backend);
//!
//!     store.fetch_apps().await;
//!     assert_eq!(store.snapshot().apps.len(), 3);
//! }
//! ```
#![allow(dead_code)]

mod constants;
mod mock_backend;

use appmarket_stores::{BackendMode, CatalogStore, SessionStore};
use std::sync::Arc;

// Public API - this is what tests import
pub use constants::*;
pub use fixtures::{sample_app, test_apps, test_categories, test_user};
pub use mock_backend::MockBackend;
pub use server::TestServer;

pub fn live_catalog(backend: &Arc<MockBackend>) -> CatalogStore {
    CatalogStore::new(backend.clone(), BackendMode::Live)
}

pub fn live_session(backend: &Arc<MockBackend>) -> SessionStore {
    SessionStore::new(backend.clone(), BackendMode::Live)
}
