//! Error types for the SkillSwap client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a `fail` or `error` envelope
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// An operation needing a token was called without a session
    #[error("You are not logged in")]
    NotLoggedIn,

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// `true` for any 401. The session is cleared when this happens.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// The API error taxonomy name, e.g. `DuplicateRequest`.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
