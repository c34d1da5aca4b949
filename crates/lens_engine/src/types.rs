use std::fmt;

use lens_core::{ItemId, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The call for `item` has been handed to the extraction service.
    ExtractionStarted { session: SessionId, item: ItemId },
    ExtractionCompleted {
        session: SessionId,
        item: ItemId,
        result: Result<String, ExtractError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ExtractError {
    pub kind: FailureKind,
    pub message: String,
}

impl ExtractError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected credentials or missing permission.
    Unauthorized,
    /// Transient capacity problem on the service side.
    Overloaded,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::Overloaded => write!(f, "service overloaded"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
