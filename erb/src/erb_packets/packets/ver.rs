use core::fmt;

use crate::{
    erb_packets::{check_payload_len, u32_at, ErbPacketMeta, ProtocolVersion},
    error::ParserError,
};

/// Protocol version, sent by the receiver before each navigation epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    /// GPS time of week in ms
    pub time_gps: u32,
    pub high: u8,
    pub medium: u8,
    pub low: u8,
}

impl Version {
    pub fn protocol_version(&self) -> ProtocolVersion {
        ProtocolVersion::new(self.high, self.medium, self.low)
    }
}

impl ErbPacketMeta for Version {
    const ID: u8 = 0x01;
    const NAME: &'static str = "VER";
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(7);
}

/// Protocol version
///
/// Contains a reference to an underlying buffer, contains accessor methods to retrieve data.
pub struct VersionRef<'a>(pub(crate) &'a [u8]);

impl<'a> VersionRef<'a> {
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
    pub fn high(&self) -> u8 {
        self.0[4]
    }

    #[inline]
    pub fn medium(&self) -> u8 {
        self.0[5]
    }

    #[inline]
    pub fn low(&self) -> u8 {
        self.0[6]
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        ProtocolVersion::new(self.high(), self.medium(), self.low())
    }

    pub fn to_owned(&self) -> Version {
        self.into()
    }

    /// Besides the length, the announced revision has to be one this crate can decode.
    pub(crate) fn validate(payload: &[u8]) -> Result<(), ParserError> {
        check_payload_len(Version::NAME, 7, payload)?;
        let version = VersionRef(payload).protocol_version();
        if version.is_supported() {
            Ok(())
        } else {
            Err(ParserError::UnsupportedVersion {
                high: version.high,
                medium: version.medium,
                low: version.low,
            })
        }
    }
}

impl<'a> From<&VersionRef<'a>> for Version {
    fn from(packet: &VersionRef<'a>) -> Self {
        Version {
            time_gps: packet.time_gps(),
            high: packet.high(),
            medium: packet.medium(),
            low: packet.low(),
        }
    }
}

impl fmt::Debug for VersionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Version")
            .field("time_gps", &self.time_gps())
            .field("version", &format_args!("{}", self.protocol_version()))
            .finish()
    }
}
