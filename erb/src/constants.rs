pub const ERB_SYNC_CHAR_1: u8 = 0x45; // 'E'
pub const ERB_SYNC_CHAR_2: u8 = 0x52; // 'R'
pub(crate) const ERB_SYNC_SIZE: usize = 2;
pub(crate) const ERB_ID_LEN: usize = 1;
pub(crate) const ERB_PAYLOAD_SIZE_LEN: usize = 2;
pub const ERB_HEADER_LEN: usize = ERB_SYNC_SIZE + ERB_ID_LEN + ERB_PAYLOAD_SIZE_LEN;
pub const ERB_CHECKSUM_LEN: usize = 2;

pub(crate) const ERB_ID_OFFSET: usize = 2; // After SYNC_CHAR_1, SYNC_CHAR_2
pub(crate) const ERB_LENGTH_OFFSET: usize = 3; // After ID

/// Largest frame the wire format can describe: a full header, a `u16::MAX` payload and the checksum
pub const ERB_MAX_PACKET_LEN: usize = ERB_HEADER_LEN + u16::MAX as usize + ERB_CHECKSUM_LEN;

/// The only protocol revision this crate decodes, as (high, medium, low)
pub const SUPPORTED_PROTOCOL_VERSION: (u8, u8, u8) = (0, 1, 0);

/// Size of every satellite record inside a SVI payload
pub(crate) const ERB_SVI_RECORD_LEN: usize = 20;
