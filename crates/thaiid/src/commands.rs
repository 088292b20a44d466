//! APDU commands understood by the Thai National ID applet
//!
//! The applet speaks a READ BINARY dialect of its own: the expected length
//! does not ride in Le but in the data field, as `00 <len>`, giving the
//! seven-byte wire shape `80 B0 <offset hi> <offset lo> 02 00 <len>`.

use tapcard_session::Command;

/// AID of the Thai National ID card applet
pub const APPLET_AID: [u8; 8] = [0xA0, 0x00, 0x00, 0x00, 0x54, 0x48, 0x00, 0x01];

/// Number of photo segments on the card
pub const PHOTO_PARTS: usize = 20;

/// Size of each photo segment in bytes
pub const PHOTO_PART_LEN: usize = 255;

/// SELECT the Thai ID applet by AID
pub fn select_applet() -> Command {
    Command::new_with_data(0x00, 0xA4, 0x04, 0x00, APPLET_AID.to_vec())
}

/// GET RESPONSE for cards that park the payload behind a 61 XX status
pub fn get_response(le: u8) -> Command {
    Command::new_with_le(0x00, 0xC0, 0x00, 0x00, le)
}

/// READ BINARY in the applet's dialect
fn read_field(offset: u16, len: u8) -> Command {
    Command::new_with_data(
        0x80,
        0xB0,
        (offset >> 8) as u8,
        offset as u8,
        vec![0x00, len],
    )
}

/// Citizen ID (13 digits)
pub fn citizen_id() -> Command {
    read_field(0x0004, 0x0D)
}

/// Full name in Thai
pub fn full_name_th() -> Command {
    read_field(0x0011, 0x64)
}

/// Full name in English
pub fn full_name_en() -> Command {
    read_field(0x0075, 0x64)
}

/// Date of birth, Buddhist era `yyyyMMdd`
pub fn date_of_birth() -> Command {
    read_field(0x00D9, 0x08)
}

/// Gender code
pub fn gender() -> Command {
    read_field(0x00E1, 0x01)
}

/// Card issuer
pub fn card_issuer() -> Command {
    read_field(0x00F6, 0x64)
}

/// Card issue date, Buddhist era `yyyyMMdd`
pub fn issue_date() -> Command {
    read_field(0x0167, 0x08)
}

/// Card expiry date, Buddhist era `yyyyMMdd`
pub fn expiry_date() -> Command {
    read_field(0x016F, 0x08)
}

/// Registered address in Thai
pub fn address() -> Command {
    read_field(0x1579, 0x64)
}

/// One of the [`PHOTO_PARTS`] photo segments
///
/// The photo offsets are not contiguous in the obvious way: P1 counts up
/// from 0x01 while P2 counts down from 0x7B, matching the card's layout.
///
/// # Panics
///
/// Panics if `part` is not below [`PHOTO_PARTS`]; the card has no segments
/// beyond that, and a wrapped offset would address arbitrary file content.
pub fn photo_part(part: usize) -> Command {
    assert!(part < PHOTO_PARTS, "photo part {part} out of range");
    Command::new_with_data(
        0x80,
        0xB0,
        0x01 + part as u8,
        0x7B - part as u8,
        vec![0x00, 0xFF],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_applet_wire_format() {
        assert_eq!(
            select_applet().to_bytes().as_ref(),
            &[0x00, 0xA4, 0x04, 0x00, 0x08, 0xA0, 0x00, 0x00, 0x00, 0x54, 0x48, 0x00, 0x01]
        );
    }

    #[test]
    fn test_field_command_wire_format() {
        assert_eq!(
            citizen_id().to_bytes().as_ref(),
            &[0x80, 0xB0, 0x00, 0x04, 0x02, 0x00, 0x0D]
        );
        assert_eq!(
            date_of_birth().to_bytes().as_ref(),
            &[0x80, 0xB0, 0x00, 0xD9, 0x02, 0x00, 0x08]
        );
        assert_eq!(
            address().to_bytes().as_ref(),
            &[0x80, 0xB0, 0x15, 0x79, 0x02, 0x00, 0x64]
        );
    }

    #[test]
    fn test_photo_part_offsets() {
        assert_eq!(
            photo_part(0).to_bytes().as_ref(),
            &[0x80, 0xB0, 0x01, 0x7B, 0x02, 0x00, 0xFF]
        );
        assert_eq!(
            photo_part(19).to_bytes().as_ref(),
            &[0x80, 0xB0, 0x14, 0x68, 0x02, 0x00, 0xFF]
        );
    }

    #[test]
    #[should_panic(expected = "photo part 20 out of range")]
    fn test_photo_part_rejects_out_of_range() {
        let _ = photo_part(PHOTO_PARTS);
    }

    #[test]
    fn test_get_response_wire_format() {
        assert_eq!(
            get_response(0x64).to_bytes().as_ref(),
            &[0x00, 0xC0, 0x00, 0x00, 0x64]
        );
    }
}
