//! Central error type for session operations
//!
//! All failures a [`Session`](crate::Session) can surface are consolidated
//! here so callers can branch on the failure category instead of catching a
//! generic error. Close-time transport failures are deliberately absent:
//! they are recorded on the session as diagnostics, never raised.

use crate::response::status::StatusWord;
use crate::session::State;
use crate::transport::TransportError;

/// Result type for session operations
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport could not be opened
    #[error("connection error: failed to open transport")]
    Connection(#[source] TransportError),

    /// An exchange failed after the connection was established
    #[error("transmit error: exchange failed")]
    Transmit(#[source] TransportError),

    /// An operation was invoked in a state that forbids it
    #[error("{operation} is not allowed in state {state}")]
    InvalidState {
        /// The operation that was rejected
        operation: &'static str,
        /// The session state at the time of the call
        state: State,
    },

    /// An APDU command must carry at least one byte
    #[error("empty APDU command")]
    EmptyCommand,

    /// A serialized command was malformed
    #[error("invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// A response was shorter than the 2-byte status word
    #[error("incomplete response: {0} byte(s), need at least 2")]
    IncompleteResponse(usize),

    /// The card answered with a non-success status word
    #[error("status word {status}: {}", .status.description())]
    Status {
        /// The offending status word
        status: StatusWord,
    },
}

impl Error {
    /// Create an invalid-state error
    pub const fn invalid_state(operation: &'static str, state: State) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Create a status word error
    pub const fn status(status: StatusWord) -> Self {
        Self::Status { status }
    }

    /// The payload-free category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Transmit(_) => ErrorKind::Transmit,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::EmptyCommand => ErrorKind::EmptyCommand,
            Self::InvalidCommandLength(_) => ErrorKind::InvalidCommandLength,
            Self::IncompleteResponse(_) => ErrorKind::IncompleteResponse,
            Self::Status { .. } => ErrorKind::Status,
        }
    }
}

/// Payload-free error category, kept on the session as the last observed
/// error diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The transport could not be opened
    Connection,
    /// An exchange failed mid-session
    Transmit,
    /// Precondition violation on the session state
    InvalidState,
    /// Empty APDU command
    EmptyCommand,
    /// Malformed serialized command
    InvalidCommandLength,
    /// Response shorter than a status word
    IncompleteResponse,
    /// Non-success status word
    Status,
}
