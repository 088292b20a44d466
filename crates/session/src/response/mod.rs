//! APDU response definitions
//!
//! A response carries an optional data payload followed by a 2-byte status
//! word (SW1 SW2), per ISO/IEC 7816-4. Anything shorter than the status word
//! is rejected.

pub mod status;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Error;
use status::StatusWord;

/// Parsed APDU response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Response payload data, possibly empty
    payload: Bytes,
    /// Status word
    status: StatusWord,
}

impl Response {
    /// Create a new response from payload and status
    pub fn new(payload: impl Into<Bytes>, status: impl Into<StatusWord>) -> Self {
        Self {
            payload: payload.into(),
            status: status.into(),
        }
    }

    /// Parse a response from raw bytes (payload followed by SW1 SW2)
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < 2 {
            return Err(Error::IncompleteResponse(data.len()));
        }

        let len = data.len();
        Ok(Self {
            payload: Bytes::copy_from_slice(&data[..len - 2]),
            status: StatusWord::new(data[len - 2], data[len - 1]),
        })
    }

    /// Get the response payload
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Get the status word
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Check if the response indicates success
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Consume the response, returning the payload on success and the status
    /// word as a typed error otherwise
    pub fn into_payload(self) -> Result<Bytes, Error> {
        if self.is_success() {
            Ok(self.payload)
        } else {
            Err(Error::status(self.status))
        }
    }
}

impl TryFrom<&[u8]> for Response {
    type Error = Error;

    fn try_from(data: &[u8]) -> Result<Self, Error> {
        Self::from_bytes(data)
    }
}

impl From<Response> for Bytes {
    fn from(response: Response) -> Self {
        let mut buf = BytesMut::with_capacity(response.payload.len() + 2);
        buf.put_slice(&response.payload);
        buf.put_u8(response.status.sw1);
        buf.put_u8(response.status.sw2);
        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_bytes() {
        let resp = Response::from_bytes(&[0x01, 0x02, 0x03, 0x90, 0x00]).unwrap();
        assert_eq!(resp.payload().as_ref(), &[0x01, 0x02, 0x03]);
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
        assert!(resp.is_success());

        let resp = Response::from_bytes(&[0x90, 0x00]).unwrap();
        assert!(resp.payload().is_empty());
        assert!(resp.is_success());
    }

    #[test]
    fn test_response_rejects_short_input() {
        assert!(matches!(
            Response::from_bytes(&[0x90]),
            Err(Error::IncompleteResponse(1))
        ));
        assert!(matches!(
            Response::from_bytes(&[]),
            Err(Error::IncompleteResponse(0))
        ));
    }

    #[test]
    fn test_into_payload() {
        let resp = Response::from_bytes(&[0x01, 0x02, 0x90, 0x00]).unwrap();
        assert_eq!(
            resp.into_payload().unwrap(),
            Bytes::from_static(&[0x01, 0x02])
        );

        let resp = Response::from_bytes(&[0x6A, 0x82]).unwrap();
        match resp.into_payload() {
            Err(Error::Status { status }) => assert_eq!(status.to_u16(), 0x6A82),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_response_round_trip() {
        let resp = Response::new(Bytes::from_static(&[0xAA, 0xBB]), (0x90, 0x00));
        let raw: Bytes = resp.clone().into();
        assert_eq!(raw.as_ref(), &[0xAA, 0xBB, 0x90, 0x00]);
        assert_eq!(Response::from_bytes(&raw).unwrap(), resp);
    }
}
