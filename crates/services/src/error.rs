//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use exam_core::forms::FormErrors;
use exam_core::quiz::AttemptError;

/// Errors emitted while loading quiz data from the exam API.
///
/// All of them are terminal for the current load: nothing retries, and no
/// attempt is built from a failed fetch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("missing or invalid session token")]
    Auth,
    #[error("exam api responded with status {0}")]
    Network(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("malformed exam api response: {0}")]
    Decode(String),
    #[error("no questions available")]
    Empty,
}

impl FetchError {
    /// Single user-facing line for the view layer.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Auth => "Please sign in again.",
            FetchError::Empty => "No questions available.",
            FetchError::Network(_) | FetchError::Transport(_) | FetchError::Decode(_) => {
                "Error in Fetch Data"
            }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<exam_core::Error> for FetchError {
    fn from(err: exam_core::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<AttemptError> for FetchError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::NoQuestions => FetchError::Empty,
            other => FetchError::Decode(other.to_string()),
        }
    }
}

/// Errors emitted by sign-in and sign-up.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid form: {0}")]
    Invalid(#[from] FormErrors),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("malformed auth response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Decode(err.to_string())
    }
}

/// Errors emitted while reading service configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid exam api base url {raw}: {reason}")]
    InvalidBaseUrl { raw: String, reason: String },
}
