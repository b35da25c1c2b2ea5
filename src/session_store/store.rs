//! Observable authentication state and the session-affecting actions.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use super::models::{AuthStatus, User};
use crate::backend::{AuthBackend, BackendError, BackendResult};
use crate::config::SessionModes;
use crate::error_policy::StoreAction;

pub const LOGIN_NOT_CONFIGURED: &str =
    "Please configure backend credentials to enable authentication";
pub const REGISTER_NOT_CONFIGURED: &str =
    "Please configure backend credentials to enable registration";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    /// Loading until `initialize` has settled.
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            error: None,
        }
    }
}

impl SessionState {
    pub fn status(&self) -> AuthStatus {
        match self.user {
            Some(_) => AuthStatus::Authenticated,
            None => AuthStatus::Unauthenticated,
        }
    }
}

/// Session store.
///
/// Same update discipline as the catalog store: one `watch` channel, whole
/// snapshots, last finished action wins.
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    modes: SessionModes,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Takes a single `BackendMode` for both kinds of action, or a
    /// `SessionModes` resolved by `AppConfig::session_modes`.
    pub fn new(backend: Arc<dyn AuthBackend>, modes: impl Into<SessionModes>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            backend,
            modes: modes.into(),
            state,
        }
    }

    pub fn modes(&self) -> SessionModes {
        self.modes
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> AuthStatus {
        self.state.borrow().status()
    }

    fn update(&self, modify: impl FnOnce(&mut SessionState)) {
        self.state.send_modify(modify);
    }

    /// Settles a guarded action after a failure.
    fn settle_failure(&self, action: StoreAction, err: &BackendError) {
        let message = action.handle_failure(err);
        self.update(|state| {
            state.is_loading = false;
            if message.is_some() {
                state.error = message;
            }
        });
    }

    /// Restores the user of an existing session. Never fails: any problem
    /// results in no user and no error.
    pub async fn initialize(&self) {
        self.update(|state| state.is_loading = true);

        let user = if self.modes.restore.is_demo() {
            debug!("Authentication not configured, skipping session restore");
            None
        } else {
            self.restore_user().await
        };

        self.update(|state| {
            state.user = user;
            state.is_loading = false;
            state.error = None;
        });
    }

    async fn restore_user(&self) -> Option<User> {
        let session = match self.backend.get_session().await {
            Ok(session) => session?,
            Err(err) => {
                StoreAction::Initialize.handle_failure(&err);
                return None;
            }
        };

        match self.backend.get_user_record(&session.user.id).await {
            Ok(user) => user,
            Err(err) => {
                StoreAction::Initialize.handle_failure(&err);
                None
            }
        }
    }

    /// Signs in and loads the user's profile.
    ///
    /// Sign-in failures are reported through `error` and return `Ok`. The
    /// profile lookup that follows a successful sign-in is not guarded: its
    /// failure is returned as `Err` and leaves `error` untouched.
    pub async fn login(&self, email: &str, password: &str) -> BackendResult<()> {
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });

        if self.modes.auth.is_demo() {
            let err = BackendError::Configuration(LOGIN_NOT_CONFIGURED.to_string());
            self.settle_failure(StoreAction::Login, &err);
            return Ok(());
        }

        if let Err(err) = self.backend.sign_in(email, password).await {
            self.settle_failure(StoreAction::Login, &err);
            return Ok(());
        }

        match self.load_signed_in_profile().await {
            Ok(profile) => {
                if profile.is_some() {
                    info!("Logged in as {}", email);
                }
                self.update(|state| {
                    // No identity behind the fresh token: keep whatever user we had.
                    if let Some(user) = profile {
                        state.user = user;
                    }
                    state.is_loading = false;
                });
                Ok(())
            }
            Err(err) => {
                StoreAction::LoginProfile.handle_failure(&err);
                self.update(|state| state.is_loading = false);
                Err(err)
            }
        }
    }

    /// Outer `None` means no identity, inner `None` means no profile row.
    async fn load_signed_in_profile(&self) -> BackendResult<Option<Option<User>>> {
        match self.backend.get_current_identity().await? {
            Some(identity) => Ok(Some(self.backend.get_user_record(&identity.id).await?)),
            None => Ok(None),
        }
    }

    /// Creates an account. Does not sign the new user in.
    pub async fn register(&self, email: &str, password: &str, full_name: &str) {
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });

        if self.modes.auth.is_demo() {
            let err = BackendError::Configuration(REGISTER_NOT_CONFIGURED.to_string());
            self.settle_failure(StoreAction::Register, &err);
            return;
        }

        match self.backend.sign_up(email, password, full_name).await {
            Ok(()) => {
                info!("Registered {}", email);
                self.update(|state| state.is_loading = false);
            }
            Err(err) => self.settle_failure(StoreAction::Register, &err),
        }
    }

    /// Signs out. On failure the current user is kept.
    pub async fn logout(&self) {
        self.update(|state| state.is_loading = true);

        match self.backend.sign_out().await {
            Ok(()) => self.update(|state| {
                state.user = None;
                state.is_loading = false;
            }),
            Err(err) => self.settle_failure(StoreAction::Logout, &err),
        }
    }

    pub fn clear_error(&self) {
        self.update(|state| state.error = None);
    }
}
