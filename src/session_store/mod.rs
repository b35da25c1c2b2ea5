mod models;
mod store;

pub use models::{AuthIdentity, AuthSession, AuthStatus, User};
pub use store::{SessionState, SessionStore, LOGIN_NOT_CONFIGURED, REGISTER_NOT_CONFIGURED};
