use core::fmt;

use crate::{
    erb_packets::{check_payload_len, u16_at, u32_at, ErbPacketMeta},
    error::ParserError,
};

const DOP_SCALE: f64 = 1e-2;

/// Dilution of precision
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dops {
    /// GPS time of week in ms
    pub time_gps: u32,
    pub geometric: f64,
    pub position: f64,
    pub vertical: f64,
    pub horizontal: f64,
}

impl ErbPacketMeta for Dops {
    const ID: u8 = 0x04;
    const NAME: &'static str = "DOPS";
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(12);
}

/// Dilution of precision
///
/// Contains a reference to an underlying buffer, contains accessor methods to retrieve data.
pub struct DopsRef<'a>(pub(crate) &'a [u8]);

impl<'a> DopsRef<'a> {
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
    pub fn geometric_raw(&self) -> u16 {
        u16_at(self.0, 4)
    }

    #[inline]
    pub fn geometric(&self) -> f64 {
        f64::from(self.geometric_raw()) * DOP_SCALE
    }

    #[inline]
    pub fn position_raw(&self) -> u16 {
        u16_at(self.0, 6)
    }

    #[inline]
    pub fn position(&self) -> f64 {
        f64::from(self.position_raw()) * DOP_SCALE
    }

    #[inline]
    pub fn vertical_raw(&self) -> u16 {
        u16_at(self.0, 8)
    }

    #[inline]
    pub fn vertical(&self) -> f64 {
        f64::from(self.vertical_raw()) * DOP_SCALE
    }

    #[inline]
    pub fn horizontal_raw(&self) -> u16 {
        u16_at(self.0, 10)
    }

    #[inline]
    pub fn horizontal(&self) -> f64 {
        f64::from(self.horizontal_raw()) * DOP_SCALE
    }

    pub fn to_owned(&self) -> Dops {
        self.into()
    }

    pub(crate) fn validate(payload: &[u8]) -> Result<(), ParserError> {
        check_payload_len(Dops::NAME, 12, payload)
    }
}

impl<'a> From<&DopsRef<'a>> for Dops {
    fn from(packet: &DopsRef<'a>) -> Self {
        Dops {
            time_gps: packet.time_gps(),
            geometric: packet.geometric(),
            position: packet.position(),
            vertical: packet.vertical(),
            horizontal: packet.horizontal(),
        }
    }
}

impl fmt::Debug for DopsRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dops")
            .field("time_gps", &self.time_gps())
            .field("geometric", &self.geometric())
            .field("position", &self.position())
            .field("vertical", &self.vertical())
            .field("horizontal", &self.horizontal())
            .finish()
    }
}
