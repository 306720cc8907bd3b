//! # erb
//!
//! A pure-rust decoder for ERB (Emlid Reach Binary), the compact binary protocol Emlid Reach
//! receivers use to report position, velocity, precision and satellite data.
//!
//! A command line client reading from TCP, serial ports or capture files can be found in the
//! erb_cli subfolder of this project.
//!
//! Reading From a Connection
//! =========================
//!
//! [`Scanner`] pulls packets out of anything implementing `std::io::Read`. It stops at the
//! first corrupt packet, which suits a receiver connected over a reliable link:
//! ```
//! use erb::{Message, Scanner};
//!
//! let data: &[u8] = &[]; // From your socket
//! for msg in Scanner::new(data) {
//!     match msg? {
//!         Message::Position(pos) => println!("{} {}", pos.latitude_degrees, pos.longitude_degrees),
//!         other => println!("{other:?}"),
//!     }
//! }
//! # Ok::<(), erb::Error>(())
//! ```
//! [`Client`] does the same with a deadline on every receive.
//!
//! Framing Your Own Buffers
//! ========================
//!
//! When the bytes arrive through something other than `Read`, [`locate_packet`] splits them
//! the same way the scanner does. It never copies: it tells the caller to wait for more data,
//! to drop some garbage or where the next packet ends.
//! ```
//! use erb::{locate_packet, Locate};
//!
//! let mut buf: Vec<u8> = vec![1, 2, 3, 4, 5, 6]; // Appended to as data arrives
//! loop {
//!     match locate_packet(&buf) {
//!         Ok(Locate::Packet { len }) => {
//!             // buf[..len] holds a checked packet
//!             buf.drain(..len);
//!         }
//!         Ok(Locate::Skip(n)) => {
//!             buf.drain(..n);
//!         }
//!         Ok(Locate::Incomplete) => break, // Wait for more bytes
//!         Err(_) => {
//!             // Corrupt packet, the stream should not be trusted anymore
//!             break;
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    client::{Client, ReadTimeout},
    erb_packets::*,
    error::{Error, ParserError, Result},
    parser::{erb_checksum, locate_packet, ErbChecksumCalc, Locate},
    scanner::{Scanner, ScannerState},
};

pub mod client;
pub mod constants;
mod erb_packets;
mod error;
mod parser;
mod scanner;
