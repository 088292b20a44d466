//! Transport capability for APDU communication with cards
//!
//! A transport is the raw byte-exchange link beneath a
//! [`Session`](crate::Session): a contact-less NFC link, a PC/SC reader, a
//! USB-CCID device or a simulated card. It has no knowledge of command
//! structure or session state; it only moves bytes.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

use std::fmt;

use bytes::Bytes;
pub use error::TransportError;

/// Trait for raw smart-card byte transports
///
/// The transport's underlying hardware handle is owned by whoever constructs
/// the transport; a [`Session`](crate::Session) only opens and closes it.
/// `open`, `exchange` and `close` are the only operations that may block,
/// bounded by the transport's own timeout.
pub trait Transport: Send + fmt::Debug {
    /// Bring the link up
    ///
    /// Implementations should make this a no-op when the link is already
    /// open, but sessions avoid calling it in that situation anyway.
    fn open(&mut self) -> Result<(), TransportError>;

    /// Perform one blocking command/response exchange
    ///
    /// Takes raw APDU bytes and returns raw response bytes. Implementations
    /// must not replay a command on failure: exchanges are frequently
    /// non-idempotent at the card level.
    fn exchange(&mut self, command: &[u8]) -> Result<Bytes, TransportError>;

    /// Tear the link down, best effort
    fn close(&mut self) -> Result<(), TransportError>;

    /// Whether the link is currently open
    fn is_open(&self) -> bool;
}

// A session can borrow a caller-owned transport instead of taking it over.
impl<T: Transport + ?Sized> Transport for &mut T {
    fn open(&mut self) -> Result<(), TransportError> {
        (**self).open()
    }

    fn exchange(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        (**self).exchange(command)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
