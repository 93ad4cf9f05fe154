//! Error types for the MailHog client.

use reqwest::StatusCode;
use thiserror::Error;

/// Error type for all MailHog client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built or sent, or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// MailHog answered with something other than `200 OK`.
    #[error("unexpected status: {status}")]
    UnexpectedStatus { status: StatusCode },
    /// The response body did not match the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status associated with the error, if any.
    ///
    /// Useful for telling a missing message (`404`) apart from other failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status } => Some(*status),
            Error::Transport(err) => err.status(),
            Error::Decode(_) => None,
        }
    }
}
