/// Error that possible during packets parsing
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("Not valid packet's checksum, expect {expect:x}, got {got:x}")]
    InvalidChecksum { expect: u16, got: u16 },

    #[error("Invalid field {field} of packet {packet}")]
    InvalidField {
        packet: &'static str,
        field: &'static str,
    },

    #[error("Invalid packet({packet}) length, expect {expect}, got {got}")]
    InvalidPacketLen {
        packet: &'static str,
        expect: usize,
        got: usize,
    },

    #[error("unsupported protocol version: {high}.{medium}.{low}")]
    UnsupportedVersion { high: u8, medium: u8, low: u8 },
}

/// Errors reported while pulling messages out of a byte stream.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Framing or payload decoding failed. The stream is not resumed.
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// Reading from the source failed, including an expired read deadline
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The scanner already failed and will not read any further
    #[error("scanner halted after a previous error")]
    Halted,
}

pub type Result<T> = std::result::Result<T, Error>;
