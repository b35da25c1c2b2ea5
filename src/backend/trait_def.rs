//! Backend service boundary.
//!
//! Both stores talk to the marketplace backend exclusively through these
//! traits, so tests and the CLI can plug in any implementation.

use async_trait::async_trait;

use super::error::BackendResult;
use crate::catalog_store::{AppDetails, AppFilters, Category};
use crate::session_store::{AuthIdentity, AuthSession, User};

/// Catalog queries.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Lists published apps matching `filters`, ordered by the filter's sort mode.
    async fn list_apps(&self, filters: &AppFilters) -> BackendResult<Vec<AppDetails>>;

    /// Fetches a single app. Returns `Err(NotFound)` if no app has the given id.
    async fn get_app(&self, id: &str) -> BackendResult<AppDetails>;

    /// Lists all catalog categories.
    async fn list_categories(&self) -> BackendResult<Vec<Category>>;
}

/// Authentication and user profile operations.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Returns the current session, if any.
    async fn get_session(&self) -> BackendResult<Option<AuthSession>>;

    /// Returns the profile row of the given user.
    /// Returns Ok(None) if the user has no profile.
    async fn get_user_record(&self, user_id: &str) -> BackendResult<Option<User>>;

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<()>;

    /// Creates an account, attaching `full_name` to the user metadata.
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> BackendResult<()>;

    async fn sign_out(&self) -> BackendResult<()>;

    /// Returns the identity behind the current access token.
    /// Returns Ok(None) if nobody is signed in.
    async fn get_current_identity(&self) -> BackendResult<Option<AuthIdentity>>;
}
