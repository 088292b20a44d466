//! PC/SC transport implementation for tapcard sessions
//!
//! This crate binds the [`Transport`](tapcard_session::Transport) capability
//! from `tapcard-session` to the PC/SC API, covering USB and contact-less
//! readers driven by the platform's smart-card service.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use tapcard_session::Session;
//! use tapcard_transport_pcsc::PcscDeviceManager;
//!
//! // Find a reader with a card and open a transport for it
//! let manager = PcscDeviceManager::new()?;
//! let reader = manager.find_reader_with_card()?;
//! let transport = manager.open_reader(reader.name())?;
//!
//! // Drive it through a session
//! let mut session = Session::new(transport);
//! session.connect()?;
//! let response = session.transmit(&[0x00, 0xA4, 0x04, 0x00, 0x00])?;
//! println!("response: {}", hex::encode_upper(&response));
//! session.disconnect();
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;

pub use config::{PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;
