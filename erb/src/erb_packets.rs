pub mod packets;
mod types;

use crate::error::ParserError;
use core::fmt;

pub use packets::*;
pub use types::*;

/// Information about concrete ERB message
pub trait ErbPacketMeta {
    const ID: u8;
    /// Short protocol name, e.g. `"POS"`
    const NAME: &'static str;
    const FIXED_PAYLOAD_LEN: Option<u16>;
}

/// Kind of an ERB message, taken from the id byte after the sync characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    Version,
    Position,
    Status,
    DilutionOfPrecision,
    Velocity,
    SatelliteList,
    /// Id this crate does not know about. Its payload is never validated.
    Unknown(u8),
}

impl From<u8> for MessageKind {
    fn from(id: u8) -> Self {
        match id {
            Version::ID => MessageKind::Version,
            Position::ID => MessageKind::Position,
            Status::ID => MessageKind::Status,
            Dops::ID => MessageKind::DilutionOfPrecision,
            Velocity::ID => MessageKind::Velocity,
            SatelliteList::ID => MessageKind::SatelliteList,
            id => MessageKind::Unknown(id),
        }
    }
}

impl From<MessageKind> for u8 {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Version => Version::ID,
            MessageKind::Position => Position::ID,
            MessageKind::Status => Status::ID,
            MessageKind::DilutionOfPrecision => Dops::ID,
            MessageKind::Velocity => Velocity::ID,
            MessageKind::SatelliteList => SatelliteList::ID,
            MessageKind::Unknown(id) => id,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Version => f.write_str(Version::NAME),
            MessageKind::Position => f.write_str(Position::NAME),
            MessageKind::Status => f.write_str(Status::NAME),
            MessageKind::DilutionOfPrecision => f.write_str(Dops::NAME),
            MessageKind::Velocity => f.write_str(Velocity::NAME),
            MessageKind::SatelliteList => f.write_str(SatelliteList::NAME),
            MessageKind::Unknown(id) => write!(f, "0x{id:02x}"),
        }
    }
}

/// Message with an id this crate does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPacketRef<'a> {
    pub id: u8,
    pub payload: &'a [u8],
}

/// Zero-copy view of a decoded packet, borrowing the scanner's buffer.
#[derive(Debug)]
pub enum PacketRef<'a> {
    Version(VersionRef<'a>),
    Position(PositionRef<'a>),
    Status(StatusRef<'a>),
    Dops(DopsRef<'a>),
    Velocity(VelocityRef<'a>),
    SatelliteList(SatelliteListRef<'a>),
    Unknown(UnknownPacketRef<'a>),
}

impl<'a> PacketRef<'a> {
    pub fn kind(&self) -> MessageKind {
        match self {
            PacketRef::Version(_) => MessageKind::Version,
            PacketRef::Position(_) => MessageKind::Position,
            PacketRef::Status(_) => MessageKind::Status,
            PacketRef::Dops(_) => MessageKind::DilutionOfPrecision,
            PacketRef::Velocity(_) => MessageKind::Velocity,
            PacketRef::SatelliteList(_) => MessageKind::SatelliteList,
            PacketRef::Unknown(pack) => MessageKind::Unknown(pack.id),
        }
    }

    /// GPS time of week in ms shared by every known message
    pub fn time_gps(&self) -> Option<u32> {
        match self {
            PacketRef::Version(pack) => Some(pack.time_gps()),
            PacketRef::Position(pack) => Some(pack.time_gps()),
            PacketRef::Status(pack) => Some(pack.time_gps()),
            PacketRef::Dops(pack) => Some(pack.time_gps()),
            PacketRef::Velocity(pack) => Some(pack.time_gps()),
            PacketRef::SatelliteList(pack) => Some(pack.time_gps()),
            PacketRef::Unknown(_) => None,
        }
    }

    /// Raw payload, without header and checksum
    pub fn payload(&self) -> &'a [u8] {
        match self {
            PacketRef::Version(pack) => pack.0,
            PacketRef::Position(pack) => pack.0,
            PacketRef::Status(pack) => pack.0,
            PacketRef::Dops(pack) => pack.0,
            PacketRef::Velocity(pack) => pack.0,
            PacketRef::SatelliteList(pack) => pack.0,
            PacketRef::Unknown(pack) => pack.payload,
        }
    }

    pub fn to_owned(&self) -> Message {
        match self {
            PacketRef::Version(pack) => Message::Version(pack.to_owned()),
            PacketRef::Position(pack) => Message::Position(pack.to_owned()),
            PacketRef::Status(pack) => Message::Status(pack.to_owned()),
            PacketRef::Dops(pack) => Message::Dops(pack.to_owned()),
            PacketRef::Velocity(pack) => Message::Velocity(pack.to_owned()),
            PacketRef::SatelliteList(pack) => Message::SatelliteList(pack.to_owned()),
            PacketRef::Unknown(pack) => Message::Unknown {
                id: pack.id,
                payload: pack.payload.to_vec(),
            },
        }
    }
}

/// Validate `payload` against the layout of message `id` and wrap it in the matching view.
pub(crate) fn match_packet(id: u8, payload: &[u8]) -> Result<PacketRef<'_>, ParserError> {
    match id {
        Version::ID => {
            VersionRef::validate(payload)?;
            Ok(PacketRef::Version(VersionRef(payload)))
        },
        Position::ID => {
            PositionRef::validate(payload)?;
            Ok(PacketRef::Position(PositionRef(payload)))
        },
        Status::ID => {
            StatusRef::validate(payload)?;
            Ok(PacketRef::Status(StatusRef(payload)))
        },
        Dops::ID => {
            DopsRef::validate(payload)?;
            Ok(PacketRef::Dops(DopsRef(payload)))
        },
        Velocity::ID => {
            VelocityRef::validate(payload)?;
            Ok(PacketRef::Velocity(VelocityRef(payload)))
        },
        SatelliteList::ID => {
            SatelliteListRef::validate(payload)?;
            Ok(PacketRef::SatelliteList(SatelliteListRef(payload)))
        },
        id => Ok(PacketRef::Unknown(UnknownPacketRef { id, payload })),
    }
}

/// Owned copy of a decoded message with engineering units applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Message {
    Version(Version),
    Position(Position),
    Status(Status),
    Dops(Dops),
    Velocity(Velocity),
    SatelliteList(SatelliteList),
    Unknown { id: u8, payload: Vec<u8> },
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Version(_) => MessageKind::Version,
            Message::Position(_) => MessageKind::Position,
            Message::Status(_) => MessageKind::Status,
            Message::Dops(_) => MessageKind::DilutionOfPrecision,
            Message::Velocity(_) => MessageKind::Velocity,
            Message::SatelliteList(_) => MessageKind::SatelliteList,
            Message::Unknown { id, .. } => MessageKind::Unknown(*id),
        }
    }

    pub fn time_gps(&self) -> Option<u32> {
        match self {
            Message::Version(m) => Some(m.time_gps),
            Message::Position(m) => Some(m.time_gps),
            Message::Status(m) => Some(m.time_gps),
            Message::Dops(m) => Some(m.time_gps),
            Message::Velocity(m) => Some(m.time_gps),
            Message::SatelliteList(m) => Some(m.time_gps),
            Message::Unknown { .. } => None,
        }
    }
}

pub(crate) fn check_payload_len(
    packet: &'static str,
    expect: usize,
    payload: &[u8],
) -> Result<(), ParserError> {
    let got = payload.len();
    if got == expect {
        Ok(())
    } else {
        Err(ParserError::InvalidPacketLen {
            packet,
            expect,
            got,
        })
    }
}

#[inline]
pub(crate) fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

#[inline]
pub(crate) fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

#[inline]
pub(crate) fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

#[inline]
pub(crate) fn f64_at(b: &[u8], off: usize) -> f64 {
    f64::from_le_bytes([
        b[off],
        b[off + 1],
        b[off + 2],
        b[off + 3],
        b[off + 4],
        b[off + 5],
        b[off + 6],
        b[off + 7],
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kind_from_id() {
        assert_eq!(MessageKind::from(0x01), MessageKind::Version);
        assert_eq!(MessageKind::from(0x04), MessageKind::DilutionOfPrecision);
        assert_eq!(MessageKind::from(0x06), MessageKind::SatelliteList);
        assert_eq!(MessageKind::from(0x99), MessageKind::Unknown(0x99));
        for id in 0..=u8::MAX {
            assert_eq!(u8::from(MessageKind::from(id)), id);
        }
    }

    #[test]
    fn kind_display() {
        assert_eq!(MessageKind::Velocity.to_string(), "VEL");
        assert_eq!(MessageKind::Unknown(0x2a).to_string(), "0x2a");
    }

    #[test]
    fn unknown_payload_is_not_validated() {
        let payload = [1, 2, 3];
        let pack = match_packet(0x42, &payload).unwrap();
        assert_eq!(pack.kind(), MessageKind::Unknown(0x42));
        assert_eq!(pack.time_gps(), None);
        assert_eq!(pack.payload(), &payload);
        assert_eq!(
            pack.to_owned(),
            Message::Unknown {
                id: 0x42,
                payload: vec![1, 2, 3]
            }
        );
    }

    #[test]
    fn known_id_with_wrong_len() {
        assert_eq!(
            match_packet(0x04, &[0; 11]).unwrap_err(),
            ParserError::InvalidPacketLen {
                packet: "DOPS",
                expect: 12,
                got: 11
            }
        );
    }

    #[test]
    fn little_endian_helpers() {
        let b = [0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xff];
        assert_eq!(u16_at(&b, 0), 0x0201);
        assert_eq!(u32_at(&b, 0), 0x04030201);
        assert_eq!(i32_at(&b, 4), -1);
        assert_eq!(f64_at(&1.5f64.to_le_bytes(), 0), 1.5);
    }
}
