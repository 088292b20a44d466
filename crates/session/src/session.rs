//! Session lifecycle state machine over a card transport
//!
//! A [`Session`] owns (or mutably borrows) one [`Transport`] and coordinates
//! the connect/transmit/disconnect lifecycle against it, enforcing the state
//! invariants and classifying failures.
//!
//! Sessions are single-threaded by design: card transports are inherently
//! serial, one outstanding exchange at a time, so at most one
//! `connect`/`transmit`/`disconnect` call may be in flight per session.
//! Callers that share a session across threads must provide their own mutual
//! exclusion; the session does no internal locking that could deadlock
//! against the blocking I/O beneath it.

use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::command::Command;
use crate::error::{Error, ErrorKind, Result};
use crate::response::Response;
use crate::transport::{Transport, TransportError};

/// Lifecycle state of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No connection; the initial state, and the terminal state after an
    /// explicit disconnect
    Disconnected,
    /// A transport open is in flight
    Connecting,
    /// Connected; `transmit` is valid
    Connected,
    /// An unrecoverable transport error occurred; exited only via
    /// [`Session::reset`] or a fresh [`Session::connect`]
    Failed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Stateful coordinator for APDU exchanges against one transport
#[derive(Debug)]
pub struct Session<T: Transport> {
    transport: T,
    state: State,
    /// Completed exchanges, diagnostic only
    exchange_count: u64,
    /// Category of the last connect/transmit failure
    last_error: Option<ErrorKind>,
    /// Close failures are recorded here, never raised
    last_close_error: Option<TransportError>,
}

impl<T: Transport> Session<T> {
    /// Create a session over the given transport
    ///
    /// The session starts in [`State::Disconnected`] regardless of the
    /// transport's own link state; `connect` reconciles the two.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: State::Disconnected,
            exchange_count: 0,
            last_error: None,
            last_close_error: None,
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> State {
        self.state
    }

    /// Whether the session is connected
    pub const fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected)
    }

    /// Number of completed exchanges on this session
    pub const fn exchange_count(&self) -> u64 {
        self.exchange_count
    }

    /// Category of the last connect/transmit failure, if any
    pub const fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// The last close-time transport error, if any
    pub const fn last_close_error(&self) -> Option<&TransportError> {
        self.last_close_error.as_ref()
    }

    /// Get a reference to the underlying transport
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Take ownership of the transport and return it
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Establish the connection
    ///
    /// Valid from [`State::Disconnected`] and [`State::Failed`]. If the
    /// transport already reports an open link, the session adopts it without
    /// a duplicate open call. No retry is attempted here: contact-less link
    /// establishment is often user-triggered (re-tap the card), so the
    /// caller decides whether and when to try again.
    pub fn connect(&mut self) -> Result<()> {
        match self.state {
            State::Disconnected | State::Failed => {}
            state => return Err(Error::invalid_state("connect", state)),
        }

        if self.transport.is_open() {
            debug!("transport already open, adopting connection");
            self.state = State::Connected;
            self.last_error = None;
            return Ok(());
        }

        self.state = State::Connecting;
        match self.transport.open() {
            Ok(()) => {
                debug!("transport opened");
                self.state = State::Connected;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "transport open failed");
                self.state = State::Failed;
                self.last_error = Some(ErrorKind::Connection);
                Err(Error::Connection(e))
            }
        }
    }

    /// Transmit raw APDU bytes and return the raw response
    ///
    /// Valid only in [`State::Connected`]; the command must be non-empty.
    /// Both preconditions are checked before the transport is touched. The
    /// response bytes are returned unmodified, status word included: this
    /// layer does not interpret APDU semantics. Blocks until the transport
    /// answers or its own timeout expires.
    ///
    /// A failed exchange moves the session to [`State::Failed`] and is never
    /// replayed: a partial exchange against a non-idempotent command (GET
    /// RESPONSE sequences, secure-messaging counters) must not be repeated
    /// silently.
    pub fn transmit(&mut self, command: &[u8]) -> Result<Bytes> {
        if self.state != State::Connected {
            return Err(Error::invalid_state("transmit", self.state));
        }
        if command.is_empty() {
            return Err(Error::EmptyCommand);
        }

        trace!(command = %hex::encode(command), "transmitting APDU");
        match self.transport.exchange(command) {
            Ok(response) => {
                self.exchange_count += 1;
                trace!(response = %hex::encode(&response), "received APDU response");
                Ok(response)
            }
            Err(e) => {
                debug!(error = %e, "exchange failed, failing session");
                self.state = State::Failed;
                self.last_error = Some(ErrorKind::Transmit);
                Err(Error::Transmit(e))
            }
        }
    }

    /// Transmit a typed command and parse the response
    ///
    /// Convenience layered on [`Session::transmit`]: serializes the command,
    /// exchanges it, and splits the raw answer into payload and status word.
    pub fn transmit_command(&mut self, command: &Command) -> Result<Response> {
        let raw = self.transmit(&command.to_bytes())?;
        Response::from_bytes(&raw)
    }

    /// Release the connection
    ///
    /// Callable from any state and idempotent: when already disconnected
    /// this is a no-op and the transport is not touched. Close-time errors
    /// are recorded and logged, never raised, and the session always ends up
    /// in [`State::Disconnected`] — safe to call in failure and cleanup
    /// paths without leaking the transport handle.
    pub fn disconnect(&mut self) {
        if self.state == State::Disconnected {
            return;
        }

        if self.transport.is_open() {
            if let Err(e) = self.transport.close() {
                warn!(error = %e, "transport close failed");
                self.last_close_error = Some(e);
            }
        }
        self.state = State::Disconnected;
    }

    /// Acknowledge a failure and return to [`State::Disconnected`]
    ///
    /// Valid only from [`State::Failed`]. Clears the last-error diagnostic
    /// and does not touch the transport.
    pub fn reset(&mut self) -> Result<()> {
        if self.state != State::Failed {
            return Err(Error::invalid_state("reset", self.state));
        }
        self.last_error = None;
        self.state = State::Disconnected;
        Ok(())
    }
}
