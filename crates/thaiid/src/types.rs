//! Data model and field decoding for Thai National ID cards
//!
//! Card fields arrive TIS-620 encoded with space padding; dates use the
//! Buddhist era. Unknown or blank raw values decode to `None`/`Unknown`
//! rather than an error, since partially filled cards exist in the wild.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;

/// Gender as recorded on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// Code 1
    Male,
    /// Code 2
    Female,
    /// Code 3
    NotSpecified,
    /// Anything else
    Unknown,
}

impl Gender {
    /// Map the card's raw gender code
    pub fn from_code(raw: &str) -> Self {
        match raw.trim() {
            "1" => Self::Male,
            "2" => Self::Female,
            "3" => Self::NotSpecified,
            _ => Self::Unknown,
        }
    }
}

/// Personal data read from a Thai National ID card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThaiPerson {
    /// Citizen ID, 13 digits
    pub citizen_id: String,
    /// Full name in Thai
    pub name_th: String,
    /// Full name in English
    pub name_en: String,
    /// Date of birth (common era)
    pub birthday: Option<NaiveDate>,
    /// Gender
    pub gender: Gender,
    /// Registered address in Thai
    pub address: String,
    /// Card issue date (common era)
    pub issue_date: Option<NaiveDate>,
    /// Card expiry date (common era)
    pub expiry_date: Option<NaiveDate>,
    /// Card issuer
    pub issuer: String,
    /// Photo as raw JPEG bytes
    pub photo: Vec<u8>,
}

impl ThaiPerson {
    /// The photo as a base64 string
    pub fn photo_base64(&self) -> String {
        BASE64.encode(&self.photo)
    }
}

/// Decode a TIS-620 byte sequence into a string, trimming the padding
///
/// TIS-620 is ASCII below 0x80 and maps 0xA1..=0xDA and 0xDF..=0xFB onto
/// U+0E01..=U+0E5B at a fixed offset. No crate in common use covers it, so
/// the mapping is done here directly; bytes in the undefined gaps become
/// U+FFFD.
pub fn decode_tis620(data: &[u8]) -> String {
    data.iter()
        .map(|&b| match b {
            0x00..=0x7F => char::from(b),
            0xA1..=0xDA | 0xDF..=0xFB => {
                // Offset into the Thai block
                char::from_u32(0x0E00 + u32::from(b) - 0xA0).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            _ => char::REPLACEMENT_CHARACTER,
        })
        .collect::<String>()
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

/// Convert a Buddhist-era `yyyyMMdd` string to a common-era date
///
/// Returns `None` for anything that is not eight digits or not a valid
/// calendar date.
pub fn be_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year_be: i32 = raw[0..4].parse().ok()?;
    let month: u32 = raw[4..6].parse().ok()?;
    let day: u32 = raw[6..8].parse().ok()?;

    NaiveDate::from_ymd_opt(year_be - 543, month, day)
}
