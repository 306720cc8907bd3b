use core::fmt;

use crate::{
    erb_packets::{check_payload_len, f64_at, u32_at, ErbPacketMeta},
    error::ParserError,
};

/// Geodetic position solution
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// GPS time of week in ms
    pub time_gps: u32,
    pub longitude_degrees: f64,
    pub latitude_degrees: f64,
    /// Height above the WGS84 ellipsoid in meters
    pub altitude_ellipsoid_meters: f64,
    /// Height above mean sea level in meters
    pub altitude_msl_meters: f64,
    pub horizontal_accuracy_mm: u32,
    pub vertical_accuracy_mm: u32,
}

impl ErbPacketMeta for Position {
    const ID: u8 = 0x02;
    const NAME: &'static str = "POS";
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(44);
}

/// Geodetic position solution
///
/// Contains a reference to an underlying buffer, contains accessor methods to retrieve data.
pub struct PositionRef<'a>(pub(crate) &'a [u8]);

impl<'a> PositionRef<'a> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0
    }

    /// GPS time of week in ms
    #[inline]
    pub fn time_gps(&self) -> u32 {
        u32_at(self.0, 0)
    }

    /// Longitude in degrees
    #[inline]
    pub fn longitude(&self) -> f64 {
        f64_at(self.0, 4)
    }

    /// Latitude in degrees
    #[inline]
    pub fn latitude(&self) -> f64 {
        f64_at(self.0, 12)
    }

    /// Height above ellipsoid in meters
    #[inline]
    pub fn altitude_ellipsoid(&self) -> f64 {
        f64_at(self.0, 20)
    }

    /// Height above mean sea level in meters
    #[inline]
    pub fn altitude_msl(&self) -> f64 {
        f64_at(self.0, 28)
    }

    /// Horizontal accuracy estimate in mm
    #[inline]
    pub fn horizontal_accuracy_raw(&self) -> u32 {
        u32_at(self.0, 36)
    }

    /// Horizontal accuracy estimate in meters
    pub fn horizontal_accuracy(&self) -> f64 {
        f64::from(self.horizontal_accuracy_raw()) * 1e-3
    }

    /// Vertical accuracy estimate in mm
    #[inline]
    pub fn vertical_accuracy_raw(&self) -> u32 {
        u32_at(self.0, 40)
    }

    /// Vertical accuracy estimate in meters
    pub fn vertical_accuracy(&self) -> f64 {
        f64::from(self.vertical_accuracy_raw()) * 1e-3
    }

    pub fn to_owned(&self) -> Position {
        self.into()
    }

    pub(crate) fn validate(payload: &[u8]) -> Result<(), ParserError> {
        check_payload_len(Position::NAME, 44, payload)
    }
}

impl<'a> From<&PositionRef<'a>> for Position {
    fn from(packet: &PositionRef<'a>) -> Self {
        Position {
            time_gps: packet.time_gps(),
            longitude_degrees: packet.longitude(),
            latitude_degrees: packet.latitude(),
            altitude_ellipsoid_meters: packet.altitude_ellipsoid(),
            altitude_msl_meters: packet.altitude_msl(),
            horizontal_accuracy_mm: packet.horizontal_accuracy_raw(),
            vertical_accuracy_mm: packet.vertical_accuracy_raw(),
        }
    }
}

impl fmt::Debug for PositionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("time_gps", &self.time_gps())
            .field("longitude", &self.longitude())
            .field("latitude", &self.latitude())
            .field("altitude_ellipsoid", &self.altitude_ellipsoid())
            .field("altitude_msl", &self.altitude_msl())
            .field("horizontal_accuracy", &self.horizontal_accuracy_raw())
            .field("vertical_accuracy", &self.vertical_accuracy_raw())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn payload() -> Vec<u8> {
        let mut payload = Vec::with_capacity(44);
        payload.extend_from_slice(&123_456u32.to_le_bytes());
        payload.extend_from_slice(&11.974_f64.to_le_bytes());
        payload.extend_from_slice(&57.707_f64.to_le_bytes());
        payload.extend_from_slice(&52.25_f64.to_le_bytes());
        payload.extend_from_slice(&14.5_f64.to_le_bytes());
        payload.extend_from_slice(&1_500u32.to_le_bytes());
        payload.extend_from_slice(&2_250u32.to_le_bytes());
        payload
    }

    #[test]
    fn decode_fields() {
        let payload = payload();
        PositionRef::validate(&payload).unwrap();
        let pos = PositionRef(&payload);
        assert_eq!(pos.time_gps(), 123_456);
        assert_eq!(pos.longitude(), 11.974);
        assert_eq!(pos.latitude(), 57.707);
        assert_eq!(pos.altitude_ellipsoid(), 52.25);
        assert_eq!(pos.altitude_msl(), 14.5);
        assert_eq!(pos.horizontal_accuracy(), 1.5);
        assert_eq!(pos.vertical_accuracy(), 2.25);
        assert_eq!(
            pos.to_owned(),
            Position {
                time_gps: 123_456,
                longitude_degrees: 11.974,
                latitude_degrees: 57.707,
                altitude_ellipsoid_meters: 52.25,
                altitude_msl_meters: 14.5,
                horizontal_accuracy_mm: 1_500,
                vertical_accuracy_mm: 2_250,
            }
        );
    }

    #[test]
    fn reject_short_payload() {
        let payload = payload();
        assert_eq!(
            PositionRef::validate(&payload[..43]),
            Err(ParserError::InvalidPacketLen {
                packet: "POS",
                expect: 44,
                got: 43
            })
        );
    }
}
