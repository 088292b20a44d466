//! Error types for the PC/SC transport

use tapcard_session::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// Error reported by the PC/SC stack
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    #[error("no readers available")]
    NoReadersAvailable,

    /// Reader not found
    #[error("reader not found: {0}")]
    ReaderNotFound(String),

    /// No card present in reader
    #[error("no card present in reader: {0}")]
    NoCard(String),
}

// Collapse PC/SC failures onto the transport capability taxonomy the
// session layer classifies by.
impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::Pcsc(pcsc::Error::Timeout) => Self::Timeout,
            PcscError::Pcsc(
                pcsc::Error::NoSmartcard
                | pcsc::Error::ReaderUnavailable
                | pcsc::Error::UnknownReader,
            ) => Self::Connection,
            PcscError::Pcsc(
                pcsc::Error::ResetCard | pcsc::Error::RemovedCard | pcsc::Error::CommError,
            ) => Self::Transmission,
            PcscError::NoReadersAvailable | PcscError::ReaderNotFound(_) | PcscError::NoCard(_) => {
                Self::Connection
            }
            other => Self::other(other.to_string()),
        }
    }
}
