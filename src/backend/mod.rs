mod error;
mod rest;
mod trait_def;

pub use error::{BackendError, BackendResult};
pub use rest::RestBackend;
pub use trait_def::{AuthBackend, CatalogBackend};
