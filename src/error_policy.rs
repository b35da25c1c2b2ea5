//! How each store action reacts to a backend failure.
//!
//! Actions do not share one error strategy: some surface the failure through
//! the store's `error` field, some swallow it into an empty result, some only
//! log it. The table lives in [`StoreAction::error_policy`].

use tracing::warn;

use crate::backend::BackendError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The failure message is written into the store's `error` field.
    Propagate,
    /// The failure is logged and replaced by an empty/default result.
    SuppressToEmpty,
    /// The failure is logged and the state is left untouched.
    LogOnly,
    /// The failure escapes the action's guard and is returned to the caller.
    Unguarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreAction {
    FetchApps,
    FetchApp,
    LoadCategories,
    Initialize,
    Login,
    /// Profile lookup that follows a successful sign-in.
    LoginProfile,
    Register,
    Logout,
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::FetchApps => "fetch_apps",
            StoreAction::FetchApp => "fetch_app",
            StoreAction::LoadCategories => "load_categories",
            StoreAction::Initialize => "initialize",
            StoreAction::Login => "login",
            StoreAction::LoginProfile => "login_profile",
            StoreAction::Register => "register",
            StoreAction::Logout => "logout",
        }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        match self {
            StoreAction::FetchApps => ErrorPolicy::SuppressToEmpty,
            StoreAction::FetchApp => ErrorPolicy::Propagate,
            StoreAction::LoadCategories => ErrorPolicy::LogOnly,
            StoreAction::Initialize => ErrorPolicy::SuppressToEmpty,
            StoreAction::Login => ErrorPolicy::Propagate,
            StoreAction::LoginProfile => ErrorPolicy::Unguarded,
            StoreAction::Register => ErrorPolicy::Propagate,
            StoreAction::Logout => ErrorPolicy::Propagate,
        }
    }

    /// Message used when a surfaced failure carries no text of its own.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            StoreAction::FetchApps => "Failed to fetch apps",
            StoreAction::FetchApp => "Failed to fetch app details",
            StoreAction::LoadCategories => "Failed to load categories",
            StoreAction::Initialize => "Auth initialization failed",
            StoreAction::Login | StoreAction::LoginProfile => "Failed to login",
            StoreAction::Register => "Failed to register",
            StoreAction::Logout => "Failed to logout",
        }
    }

    /// Applies this action's policy to `err`.
    /// Returns the message to store in the `error` field, if any.
    pub fn handle_failure(&self, err: &BackendError) -> Option<String> {
        match self.error_policy() {
            ErrorPolicy::Propagate => Some(err.message_or(self.fallback_message())),
            ErrorPolicy::SuppressToEmpty | ErrorPolicy::LogOnly => {
                warn!("{}: {}", self.fallback_message(), err);
                None
            }
            ErrorPolicy::Unguarded => None,
        }
    }
}
