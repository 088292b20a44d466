//! Thai National ID card reading on top of tapcard sessions
//!
//! Drives the read flow of the Thai National ID applet — SELECT, one READ
//! BINARY per personal-data field, photo reassembly from twenty segments —
//! through a [`Session`](tapcard_session::Session) over any transport.
//!
//! ```no_run
//! # fn run(transport: impl tapcard_session::Transport) -> Result<(), Box<dyn std::error::Error>> {
//! use tapcard_thaiid::ThaiIdReader;
//!
//! let mut reader = ThaiIdReader::new(transport);
//! let person = reader.read()?;
//! println!("{}: {}", person.citizen_id, person.name_en);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod commands;
mod error;
mod reader;
mod types;

pub use error::{Error, Result};
pub use reader::ThaiIdReader;
pub use types::{Gender, ThaiPerson, be_date, decode_tis620};
