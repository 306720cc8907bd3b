use core::fmt;

/// Solution quality reported by `STAT`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixType {
    NoFix,
    Single,
    Float,
    Rtk,
    Unknown(u8),
}

impl From<u8> for FixType {
    fn from(x: u8) -> Self {
        match x {
            0 => FixType::NoFix,
            1 => FixType::Single,
            2 => FixType::Float,
            3 => FixType::Rtk,
            x => FixType::Unknown(x),
        }
    }
}

impl From<FixType> for u8 {
    fn from(fix: FixType) -> Self {
        match fix {
            FixType::NoFix => 0,
            FixType::Single => 1,
            FixType::Float => 2,
            FixType::Rtk => 3,
            FixType::Unknown(x) => x,
        }
    }
}

impl fmt::Display for FixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixType::NoFix => f.write_str("no fix"),
            FixType::Single => f.write_str("single"),
            FixType::Float => f.write_str("float"),
            FixType::Rtk => f.write_str("RTK"),
            FixType::Unknown(x) => write!(f, "unknown fix type {x}"),
        }
    }
}

/// Constellation a satellite belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SvType {
    Gps,
    Glonass,
    Galileo,
    Qzss,
    Beidou,
    Leo,
    Sbas,
    Unknown(u8),
}

impl From<u8> for SvType {
    fn from(x: u8) -> Self {
        match x {
            0 => SvType::Gps,
            1 => SvType::Glonass,
            2 => SvType::Galileo,
            3 => SvType::Qzss,
            4 => SvType::Beidou,
            5 => SvType::Leo,
            6 => SvType::Sbas,
            x => SvType::Unknown(x),
        }
    }
}

impl From<SvType> for u8 {
    fn from(sv: SvType) -> Self {
        match sv {
            SvType::Gps => 0,
            SvType::Glonass => 1,
            SvType::Galileo => 2,
            SvType::Qzss => 3,
            SvType::Beidou => 4,
            SvType::Leo => 5,
            SvType::Sbas => 6,
            SvType::Unknown(x) => x,
        }
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvType::Gps => f.write_str("GPS"),
            SvType::Glonass => f.write_str("GLONASS"),
            SvType::Galileo => f.write_str("Galileo"),
            SvType::Qzss => f.write_str("QZSS"),
            SvType::Beidou => f.write_str("BeiDou"),
            SvType::Leo => f.write_str("LEO"),
            SvType::Sbas => f.write_str("SBAS"),
            SvType::Unknown(x) => write!(f, "unknown constellation {x}"),
        }
    }
}

/// Protocol revision announced by `VER`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolVersion {
    pub high: u8,
    pub medium: u8,
    pub low: u8,
}

impl ProtocolVersion {
    pub const fn new(high: u8, medium: u8, low: u8) -> Self {
        Self { high, medium, low }
    }

    /// Revision this crate decodes
    pub const fn supported() -> Self {
        let (high, medium, low) = crate::constants::SUPPORTED_PROTOCOL_VERSION;
        Self::new(high, medium, low)
    }

    pub fn is_supported(&self) -> bool {
        *self == Self::supported()
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.high, self.medium, self.low)
    }
}
