//! Appmarket client state stores
//!
//! Observable catalog and session stores backed by a pluggable marketplace
//! backend, with a built-in demo catalog when no backend is configured.

pub mod backend;
pub mod catalog_store;
pub mod config;
pub mod error_policy;
pub mod session_store;

// Re-export commonly used types for convenience
pub use backend::{AuthBackend, BackendError, CatalogBackend, RestBackend};
pub use catalog_store::{CatalogState, CatalogStore, FilterUpdate};
pub use config::{AppConfig, BackendMode, SessionModes};
pub use session_store::{AuthStatus, SessionState, SessionStore};
