use core::fmt;

use crate::{
    erb_packets::{check_payload_len, u16_at, u32_at, ErbPacketMeta, FixType},
    error::ParserError,
};

/// Receiver navigation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    /// GPS time of week in ms
    pub time_gps: u32,
    /// GPS week number
    pub week_gps: u16,
    pub fix_type: FixType,
    /// Whether a valid position fix is available
    pub has_fix: bool,
    /// Number of satellites used in the solution
    pub num_svs: u8,
}

impl ErbPacketMeta for Status {
    const ID: u8 = 0x03;
    const NAME: &'static str = "STAT";
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(9);
}

/// Receiver navigation status
///
/// Contains a reference to an underlying buffer, contains accessor methods to retrieve data.
pub struct StatusRef<'a>(pub(crate) &'a [u8]);

impl<'a> StatusRef<'a> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0
    }

    /// GPS time of week in ms
    #[inline]
    pub fn time_gps(&self) -> u32 {
        u32_at(self.0, 0)
    }

    #[inline]
    pub fn week_gps(&self) -> u16 {
        u16_at(self.0, 4)
    }

    #[inline]
    pub fn fix_type_raw(&self) -> u8 {
        self.0[6]
    }

    #[inline]
    pub fn fix_type(&self) -> FixType {
        FixType::from(self.fix_type_raw())
    }

    #[inline]
    pub fn has_fix_raw(&self) -> u8 {
        self.0[7]
    }

    #[inline]
    pub fn has_fix(&self) -> bool {
        self.has_fix_raw() == 1
    }

    #[inline]
    pub fn num_svs(&self) -> u8 {
        self.0[8]
    }

    pub fn to_owned(&self) -> Status {
        self.into()
    }

    pub(crate) fn validate(payload: &[u8]) -> Result<(), ParserError> {
        check_payload_len(Status::NAME, 9, payload)?;
        match payload[7] {
            0 | 1 => Ok(()),
            _ => Err(ParserError::InvalidField {
                packet: Status::NAME,
                field: stringify!(has_fix),
            }),
        }
    }
}

impl<'a> From<&StatusRef<'a>> for Status {
    fn from(packet: &StatusRef<'a>) -> Self {
        Status {
            time_gps: packet.time_gps(),
            week_gps: packet.week_gps(),
            fix_type: packet.fix_type(),
            has_fix: packet.has_fix(),
            num_svs: packet.num_svs(),
        }
    }
}

impl fmt::Debug for StatusRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Status")
            .field("time_gps", &self.time_gps())
            .field("week_gps", &self.week_gps())
            .field("fix_type", &self.fix_type())
            .field("has_fix", &self.has_fix())
            .field("num_svs", &self.num_svs())
            .finish()
    }
}
