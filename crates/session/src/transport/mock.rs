//! Scripted transport for tests and examples
//!
//! [`MockTransport`] plays the role of the simulated card named by the
//! transport contract: responses are scripted up front, every command is
//! recorded, and open/exchange failures can be injected at chosen points.

use std::collections::VecDeque;

use bytes::Bytes;

use super::{Transport, TransportError};

/// Scripted in-memory transport
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Scripted responses, consumed front to back
    responses: VecDeque<Bytes>,
    /// Commands that were exchanged, in order
    commands: Vec<Bytes>,
    open: bool,
    open_calls: usize,
    close_calls: usize,
    fail_next_open: bool,
    fail_next_close: bool,
    /// Fail the exchange with this zero-based index
    fail_exchange_at: Option<usize>,
    exchanges: usize,
}

impl MockTransport {
    /// Create a closed transport with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed transport scripted with the given responses
    pub fn with_responses<I, B>(responses: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Script one more response
    pub fn push_response(&mut self, response: impl Into<Bytes>) {
        self.responses.push_back(response.into());
    }

    /// Force the link open or closed without going through the trait
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Make the next `open` call fail
    pub fn fail_next_open(&mut self) {
        self.fail_next_open = true;
    }

    /// Make the next `close` call fail
    ///
    /// The link is torn down regardless, mirroring a device that errors on
    /// teardown but releases its handle anyway.
    pub fn fail_next_close(&mut self) {
        self.fail_next_close = true;
    }

    /// Make the exchange with the given zero-based index fail
    pub fn fail_exchange_at(&mut self, index: usize) {
        self.fail_exchange_at = Some(index);
    }

    /// Commands exchanged so far, in order
    pub fn commands(&self) -> &[Bytes] {
        &self.commands
    }

    /// Number of times `open` was called
    pub const fn open_calls(&self) -> usize {
        self.open_calls
    }

    /// Number of times `close` was called
    pub const fn close_calls(&self) -> usize {
        self.close_calls
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        self.open_calls += 1;
        if self.open {
            return Err(TransportError::other("open called on an open transport"));
        }
        if self.fail_next_open {
            self.fail_next_open = false;
            return Err(TransportError::Connection);
        }
        self.open = true;
        Ok(())
    }

    fn exchange(&mut self, command: &[u8]) -> Result<Bytes, TransportError> {
        if !self.open {
            return Err(TransportError::Connection);
        }

        let index = self.exchanges;
        self.exchanges += 1;
        if self.fail_exchange_at == Some(index) {
            return Err(TransportError::Transmission);
        }

        self.commands.push(Bytes::copy_from_slice(command));
        self.responses
            .pop_front()
            .ok_or_else(|| TransportError::other("no scripted response left"))
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.close_calls += 1;
        self.open = false;
        if self.fail_next_close {
            self.fail_next_close = false;
            return Err(TransportError::Device);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_responses_consumed_in_order() {
        let mut transport = MockTransport::with_responses([
            Bytes::from_static(&[0x01, 0x90, 0x00]),
            Bytes::from_static(&[0x90, 0x00]),
        ]);
        transport.open().unwrap();

        assert_eq!(
            transport.exchange(&[0x00, 0xA4, 0x04, 0x00]).unwrap(),
            Bytes::from_static(&[0x01, 0x90, 0x00])
        );
        assert_eq!(
            transport.exchange(&[0x00, 0xB0, 0x00, 0x00]).unwrap(),
            Bytes::from_static(&[0x90, 0x00])
        );
        // Script exhausted
        assert!(transport.exchange(&[0x00, 0xB0, 0x00, 0x00]).is_err());
        assert_eq!(transport.commands().len(), 2);
    }

    #[test]
    fn test_exchange_requires_open_link() {
        let mut transport = MockTransport::with_responses([Bytes::from_static(&[0x90, 0x00])]);
        assert!(matches!(
            transport.exchange(&[0x00, 0xA4, 0x04, 0x00]),
            Err(TransportError::Connection)
        ));
        assert!(transport.commands().is_empty());
    }

    #[test]
    fn test_injected_failures() {
        let mut transport = MockTransport::new();
        transport.fail_next_open();
        assert!(matches!(transport.open(), Err(TransportError::Connection)));
        // Failure is one-shot
        transport.open().unwrap();
        assert!(transport.is_open());

        transport.push_response(Bytes::from_static(&[0x90, 0x00]));
        transport.fail_exchange_at(0);
        assert!(matches!(
            transport.exchange(&[0x00, 0xA4, 0x04, 0x00]),
            Err(TransportError::Transmission)
        ));
    }
}
