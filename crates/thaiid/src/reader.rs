//! Thai National ID read flow over a session

use tapcard_session::{Bytes, BytesMut, Command, Response, Session, Transport};
use tracing::{debug, info, trace};

use crate::commands;
use crate::error::{Error, Result};
use crate::types::{Gender, ThaiPerson, be_date, decode_tis620};

/// Reads the personal data file of a Thai National ID card
///
/// Wraps a [`Session`] and drives the fixed sequence the applet expects:
/// SELECT by AID, one READ BINARY per field, twenty photo segments. The
/// session is disconnected when the read finishes, whether it succeeded or
/// not, so the transport handle is never leaked.
#[derive(Debug)]
pub struct ThaiIdReader<T: Transport> {
    session: Session<T>,
}

impl<T: Transport> ThaiIdReader<T> {
    /// Create a reader over the given transport
    pub fn new(transport: T) -> Self {
        Self {
            session: Session::new(transport),
        }
    }

    /// Get a reference to the underlying session
    pub const fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Take ownership of the underlying session
    pub fn into_session(self) -> Session<T> {
        self.session
    }

    /// Read the card's personal data file
    pub fn read(&mut self) -> Result<ThaiPerson> {
        info!("connecting to card");
        self.session.connect().map_err(Error::Session)?;

        let result = self.read_card();
        self.session.disconnect();
        result
    }

    fn read_card(&mut self) -> Result<ThaiPerson> {
        debug!("selecting Thai ID applet");
        self.read_data("applet selection", &commands::select_applet())?;

        debug!("reading citizen id");
        let citizen_id = self.read_text("citizen id", &commands::citizen_id())?;

        debug!("reading names");
        let name_th = self.read_text("Thai name", &commands::full_name_th())?;
        let name_en = self.read_text("English name", &commands::full_name_en())?;

        debug!("reading dates and gender");
        let birthday = be_date(&self.read_text("date of birth", &commands::date_of_birth())?);
        let gender = Gender::from_code(&self.read_text("gender", &commands::gender())?);
        let address = self.read_text("address", &commands::address())?;
        let issue_date = be_date(&self.read_text("issue date", &commands::issue_date())?);
        let expiry_date = be_date(&self.read_text("expiry date", &commands::expiry_date())?);
        let issuer = self.read_text("card issuer", &commands::card_issuer())?;

        debug!("reading photo");
        let mut photo = BytesMut::with_capacity(commands::PHOTO_PARTS * commands::PHOTO_PART_LEN);
        for part in 0..commands::PHOTO_PARTS {
            trace!(part = part + 1, total = commands::PHOTO_PARTS, "photo segment");
            let segment = self.read_data("photo", &commands::photo_part(part))?;
            photo.extend_from_slice(&segment);
        }

        info!("card read complete");
        Ok(ThaiPerson {
            citizen_id,
            name_th,
            name_en,
            birthday,
            gender,
            address,
            issue_date,
            expiry_date,
            issuer,
            photo: photo.to_vec(),
        })
    }

    /// Read one field and decode it as TIS-620 text
    fn read_text(&mut self, field: &'static str, command: &Command) -> Result<String> {
        Ok(decode_tis620(&self.read_data(field, command)?))
    }

    /// Exchange one command, following up with GET RESPONSE when the card
    /// parks the payload behind a 61 XX status (T=0 readers)
    fn read_data(&mut self, field: &'static str, command: &Command) -> Result<Bytes> {
        let mut response = self.transmit(field, command)?;

        if let Some(len) = response.status().remaining_bytes() {
            response = self.transmit(field, &commands::get_response(len))?;
        }

        if !response.is_success() {
            return Err(Error::FieldStatus {
                field,
                status: response.status(),
            });
        }
        Ok(response.payload().clone())
    }

    fn transmit(&mut self, field: &'static str, command: &Command) -> Result<Response> {
        trace!(field, "transmitting");
        self.session
            .transmit_command(command)
            .map_err(Error::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapcard_session::transport::mock::MockTransport;
    use tapcard_session::{ErrorKind, State};

    const OK: &[u8] = &[0x90, 0x00];

    fn with_status(payload: &[u8]) -> Vec<u8> {
        let mut bytes = payload.to_vec();
        bytes.extend_from_slice(OK);
        bytes
    }

    /// Script a full, well-formed card image in the order the reader asks
    fn scripted_card() -> MockTransport {
        let mut transport = MockTransport::new();
        transport.push_response(OK); // SELECT
        transport.push_response(with_status(b"1234567890121")); // citizen id
        transport.push_response(with_status(&[0xA1, 0xD2, 0x20, 0x20])); // Thai name
        transport.push_response(with_status(b"Mr. Somchai  ")); // English name
        transport.push_response(with_status(b"25300115")); // birth, BE 2530
        transport.push_response(with_status(b"1")); // gender
        transport.push_response(with_status(b"123 Main Road  ")); // address
        transport.push_response(with_status(b"25600101")); // issue date
        transport.push_response(with_status(b"25700101")); // expiry date
        transport.push_response(with_status(b"District Office")); // issuer
        for part in 0..commands::PHOTO_PARTS {
            transport.push_response(with_status(&[part as u8; commands::PHOTO_PART_LEN]));
        }
        transport
    }

    #[test]
    fn test_full_read_flow() {
        let mut reader = ThaiIdReader::new(scripted_card());
        let person = reader.read().unwrap();

        assert_eq!(person.citizen_id, "1234567890121");
        assert_eq!(person.name_th, "\u{0E01}\u{0E32}");
        assert_eq!(person.name_en, "Mr. Somchai");
        assert_eq!(
            person.birthday,
            chrono::NaiveDate::from_ymd_opt(1987, 1, 15)
        );
        assert_eq!(person.gender, Gender::Male);
        assert_eq!(person.address, "123 Main Road");
        assert_eq!(
            person.issue_date,
            chrono::NaiveDate::from_ymd_opt(2017, 1, 1)
        );
        assert_eq!(
            person.expiry_date,
            chrono::NaiveDate::from_ymd_opt(2027, 1, 1)
        );
        assert_eq!(person.issuer, "District Office");
        assert_eq!(
            person.photo.len(),
            commands::PHOTO_PARTS * commands::PHOTO_PART_LEN
        );

        // The session was released afterwards.
        let session = reader.into_session();
        assert_eq!(session.state(), State::Disconnected);
        assert!(!session.transport().is_open());
    }

    #[test]
    fn test_commands_sent_in_card_order() {
        let mut reader = ThaiIdReader::new(scripted_card());
        reader.read().unwrap();

        let session = reader.into_session();
        let sent = session.transport().commands();
        assert_eq!(sent[0], commands::select_applet().to_bytes());
        assert_eq!(sent[1], commands::citizen_id().to_bytes());
        assert_eq!(sent[10], commands::photo_part(0).to_bytes());
        assert_eq!(sent.len(), 10 + commands::PHOTO_PARTS);
    }

    #[test]
    fn test_get_response_follow_up() {
        let mut transport = MockTransport::new();
        // Card answers SELECT with "97 bytes pending".
        transport.push_response(&[0x61, 0x61][..]);
        transport.push_response(OK);

        let mut reader = ThaiIdReader::new(transport);
        // The scripted card ends after the SELECT exchange; only the
        // follow-up matters here.
        let _ = reader.read();

        let session = reader.into_session();
        let sent = session.transport().commands();
        assert_eq!(sent[0], commands::select_applet().to_bytes());
        assert_eq!(sent[1], commands::get_response(0x61).to_bytes());
    }

    #[test]
    fn test_field_status_error_disconnects() {
        let mut transport = MockTransport::new();
        // Applet not on this card.
        transport.push_response(&[0x6A, 0x82][..]);

        let mut reader = ThaiIdReader::new(transport);
        match reader.read() {
            Err(Error::FieldStatus { field, status }) => {
                assert_eq!(field, "applet selection");
                assert_eq!(status.to_u16(), 0x6A82);
            }
            other => panic!("expected field status error, got {other:?}"),
        }

        let session = reader.into_session();
        assert_eq!(session.state(), State::Disconnected);
        assert!(!session.transport().is_open());
    }

    #[test]
    fn test_transport_failure_surfaces_as_session_error() {
        let mut transport = scripted_card();
        // Fail the exchange for the citizen id (index 1, after SELECT).
        transport.fail_exchange_at(1);

        let mut reader = ThaiIdReader::new(transport);
        match reader.read() {
            Err(Error::Session(e)) => assert_eq!(e.kind(), ErrorKind::Transmit),
            other => panic!("expected session error, got {other:?}"),
        }

        // disconnect() ran in the cleanup path even though the session
        // had failed.
        let session = reader.into_session();
        assert_eq!(session.state(), State::Disconnected);
    }
}
