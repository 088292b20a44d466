//! Error types for Thai ID card reading

use tapcard_session::StatusWord;

/// Result type for Thai ID operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Thai ID operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Session-level failure (connection, transmit, state)
    #[error(transparent)]
    Session(#[from] tapcard_session::Error),

    /// The card rejected a field read
    #[error("reading {field} failed with status {status} ({})", .status.description())]
    FieldStatus {
        /// The field that was being read
        field: &'static str,
        /// The status word the card answered with
        status: StatusWord,
    },
}
