use std::time::Duration;

use thiserror::Error;

/// The remote round-trip itself failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    Validation,
    Authorization,
    Other,
}

/// The server answered but rejected the request.
#[derive(Debug, Error)]
#[error("server rejected the request ({kind:?}): {message}")]
pub struct ApplicationError {
    pub kind: RejectionKind,
    pub message: String,
}

/// Everything a list fetch can fail with.
///
/// `Busy` and `Exhausted` are flow-control outcomes: callers treat them as
/// "try again later" and "stop appending", not as user-facing failures.
#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("another fetch is already in flight")]
    Busy,

    #[error("no further pages to fetch")]
    Exhausted,
}

impl From<reqwest::Error> for ListError {
    fn from(err: reqwest::Error) -> Self {
        ListError::Transport(TransportError::Network(err))
    }
}

impl ListError {
    /// Flow-control outcomes are not surfaced to the user.
    pub fn is_flow_control(&self) -> bool {
        matches!(self, ListError::Busy | ListError::Exhausted)
    }
}
