//! Failure taxonomy for repository calls.

use thiserror::Error;

use crate::token::TokenStoreError;

/// Two-variant outcome of every repository call.
pub type Outcome<T> = Result<T, RepositoryError>;

/// Why a repository call failed.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Timeout, refused connection, TLS failure and the like.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message} - {body}")]
    Http {
        status: u16,
        message: String,
        body: String,
    },

    /// A body was expected but the response had none.
    #[error("empty response")]
    EmptyBody,

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Token storage failed: {0}")]
    Storage(#[from] TokenStoreError),

    #[error("Not signed in")]
    NotSignedIn,
}

impl RepositoryError {
    /// Short human-readable reason: the status text for HTTP failures,
    /// the full message otherwise.
    pub fn reason(&self) -> String {
        match self {
            RepositoryError::Http {
                status, message, ..
            } if message.is_empty() => format!("HTTP {}", status),
            RepositoryError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
