pub(crate) mod checksum;

pub use checksum::{erb_checksum, ErbChecksumCalc};

use tracing::{debug, trace};

use crate::{
    constants::{
        ERB_CHECKSUM_LEN, ERB_HEADER_LEN, ERB_ID_OFFSET, ERB_LENGTH_OFFSET, ERB_SYNC_CHAR_1,
        ERB_SYNC_CHAR_2, ERB_SYNC_SIZE,
    },
    erb_packets::match_packet,
    error::ParserError,
};

/// Outcome of looking for a packet at the start of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locate {
    /// More bytes are needed before anything can be decided
    Incomplete,
    /// The first `n` bytes cannot start a packet and should be dropped
    Skip(usize),
    /// A checksum-valid packet with a well-formed payload occupies the first `len` bytes
    Packet { len: usize },
}

/// Look for the next packet at the start of `buf`.
///
/// Bytes in front of the sync characters are reported as [`Locate::Skip`]. A trailing
/// `'E'` is never skipped because the `'R'` may still be on its way. Checksum and payload
/// layout errors are returned as is; it is up to the caller to decide whether the stream
/// can be trusted afterwards.
pub fn locate_packet(buf: &[u8]) -> Result<Locate, ParserError> {
    if buf.len() < ERB_HEADER_LEN {
        return Ok(Locate::Incomplete);
    }
    if let Some(skip) = garbage_prefix(buf) {
        trace!(skip, "dropping bytes in front of sync characters");
        return Ok(Locate::Skip(skip));
    }

    let payload_len = usize::from(u16::from_le_bytes([
        buf[ERB_LENGTH_OFFSET],
        buf[ERB_LENGTH_OFFSET + 1],
    ]));
    let pack_len = ERB_HEADER_LEN + payload_len + ERB_CHECKSUM_LEN;
    if buf.len() < pack_len {
        return Ok(Locate::Incomplete);
    }

    let checksum_at = ERB_HEADER_LEN + payload_len;
    let mut calc = ErbChecksumCalc::new();
    calc.update(&buf[ERB_ID_OFFSET..checksum_at]);
    calc.validate(u16::from_le_bytes([buf[checksum_at], buf[checksum_at + 1]]))
        .inspect_err(|err| debug!(%err, "dropping packet"))?;

    match_packet(buf[ERB_ID_OFFSET], &buf[ERB_HEADER_LEN..checksum_at])
        .inspect_err(|err| debug!(%err, "malformed payload"))?;

    Ok(Locate::Packet { len: pack_len })
}

/// Number of leading bytes that cannot be the start of a packet, `None` if the buffer is
/// already aligned. Expects at least the sync characters to be buffered.
fn garbage_prefix(buf: &[u8]) -> Option<usize> {
    if buf[0] == ERB_SYNC_CHAR_1 && buf[1] == ERB_SYNC_CHAR_2 {
        return None;
    }
    match buf
        .windows(ERB_SYNC_SIZE)
        .position(|w| w == [ERB_SYNC_CHAR_1, ERB_SYNC_CHAR_2])
    {
        Some(pos) => Some(pos),
        None if buf[buf.len() - 1] == ERB_SYNC_CHAR_1 => Some(buf.len() - 1),
        None => Some(buf.len()),
    }
}
