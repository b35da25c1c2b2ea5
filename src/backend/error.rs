use thiserror::Error;

/// Failures reported by a backend. The `Display` output is the human-readable
/// message stores surface through their `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("{0}")]
    Transport(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("{0}")]
    Configuration(String),
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        BackendError::Api {
            status,
            message: message.into(),
        }
    }

    /// The message to show for this failure, or `fallback` when there is none.
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
