//! Error types specific to card transports

/// Transport error type
///
/// Concrete transports map their platform failures onto these categories so
/// the session layer can classify them without knowing the platform.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The link could not be established
    #[error("failed to connect to device")]
    Connection,

    /// An exchange failed on an established link
    #[error("failed to transmit data")]
    Transmission,

    /// The device itself reported an error
    #[error("device error")]
    Device,

    /// The operation exceeded the transport's timeout
    #[error("operation timed out")]
    Timeout,

    /// Other error with message
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Create a general other error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other(message.into())
    }

    /// Whether this error was raised while establishing the link
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection)
    }
}
