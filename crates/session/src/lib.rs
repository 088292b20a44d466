//! Platform-independent APDU session management for smart cards
//!
//! This crate provides the session layer that sits between application code
//! issuing APDU commands (ISO/IEC 7816-4) and the raw byte transport beneath
//! it (PC/SC, NFC, a simulated card, ...). It consists of:
//!
//! - [`Transport`] — the capability contract a byte transport must satisfy
//! - [`Session`] — the connect/transmit/disconnect lifecycle state machine
//! - [`Command`], [`Response`] and [`StatusWord`] — the APDU data model
//!
//! The session enforces its state invariants and surfaces failures as typed
//! errors so callers can branch on the failure category. It never retries on
//! its own: smart-card exchanges are frequently non-idempotent, so retry
//! policy belongs to the layer above, which can observe [`State::Failed`]
//! and decide to [`Session::reset`] and reconnect.
//!
//! ```no_run
//! # fn run(transport: impl tapcard_session::Transport) -> tapcard_session::Result<()> {
//! use tapcard_session::Session;
//!
//! let mut session = Session::new(transport);
//! session.connect()?;
//! let response = session.transmit(&[0x00, 0xA4, 0x04, 0x00])?;
//! session.disconnect();
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

// Main modules
pub mod command;
pub mod response;
pub mod session;
pub mod transport;

// Core error types
mod error;
pub use error::{Error, ErrorKind, Result};

// Re-exports for common types
pub use command::Command;
pub use response::Response;
pub use response::status::StatusWord;
pub use session::{Session, State};
pub use transport::{Transport, TransportError};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        Bytes, BytesMut, Command, Error, ErrorKind, Response, Result, Session, State, StatusWord,
        Transport, TransportError,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test the basic types are re-exported correctly
    #[test]
    fn test_reexports() {
        let cmd = Command::new(0x00, 0xA4, 0x04, 0x00);
        assert_eq!(cmd.cla, 0x00);
        assert_eq!(cmd.ins, 0xA4);

        let resp = Response::from_bytes(&[0x01, 0x02, 0x90, 0x00]).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
    }
}
