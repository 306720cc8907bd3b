use core::fmt;

use crate::{
    erb_packets::{check_payload_len, i32_at, u32_at, ErbPacketMeta},
    error::ParserError,
};

/// Velocity in NED (north, east, down) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    /// GPS time of week in ms
    pub time_gps: u32,
    pub north_cm_per_s: i32,
    pub east_cm_per_s: i32,
    pub down_cm_per_s: i32,
    /// 2D ground speed
    pub speed_cm_per_s: u32,
    /// 2D heading of motion
    pub heading_degrees: f64,
    pub speed_accuracy_cm_per_s: u32,
}

impl ErbPacketMeta for Velocity {
    const ID: u8 = 0x05;
    const NAME: &'static str = "VEL";
    const FIXED_PAYLOAD_LEN: Option<u16> = Some(28);
}

/// Velocity in NED (north, east, down) coordinates
///
/// Contains a reference to an underlying buffer, contains accessor methods to retrieve data.
pub struct VelocityRef<'a>(pub(crate) &'a [u8]);

impl<'a> VelocityRef<'a> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0
    }

    /// GPS time of week in ms
    #[inline]
    pub fn time_gps(&self) -> u32 {
        u32_at(self.0, 0)
    }

    /// North velocity in cm/s
    #[inline]
    pub fn vel_north_raw(&self) -> i32 {
        i32_at(self.0, 4)
    }

    /// North velocity in m/s
    #[inline]
    pub fn vel_north(&self) -> f64 {
        f64::from(self.vel_north_raw()) * 1e-2
    }

    /// East velocity in cm/s
    #[inline]
    pub fn vel_east_raw(&self) -> i32 {
        i32_at(self.0, 8)
    }

    /// East velocity in m/s
    #[inline]
    pub fn vel_east(&self) -> f64 {
        f64::from(self.vel_east_raw()) * 1e-2
    }

    /// Down velocity in cm/s
    #[inline]
    pub fn vel_down_raw(&self) -> i32 {
        i32_at(self.0, 12)
    }

    /// Down velocity in m/s
    #[inline]
    pub fn vel_down(&self) -> f64 {
        f64::from(self.vel_down_raw()) * 1e-2
    }

    /// Ground speed in cm/s
    #[inline]
    pub fn speed_raw(&self) -> u32 {
        u32_at(self.0, 16)
    }

    /// Ground speed in m/s
    #[inline]
    pub fn speed(&self) -> f64 {
        f64::from(self.speed_raw()) * 1e-2
    }

    /// Heading of motion in 1e-5 degrees
    #[inline]
    pub fn heading_raw(&self) -> i32 {
        i32_at(self.0, 20)
    }

    #[inline]
    pub fn heading_degrees(&self) -> f64 {
        f64::from(self.heading_raw()) * 1e-5
    }

    /// Speed accuracy estimate in cm/s
    #[inline]
    pub fn speed_accuracy_raw(&self) -> u32 {
        u32_at(self.0, 24)
    }

    /// Speed accuracy estimate in m/s
    #[inline]
    pub fn speed_accuracy(&self) -> f64 {
        f64::from(self.speed_accuracy_raw()) * 1e-2
    }

    pub fn to_owned(&self) -> Velocity {
        self.into()
    }

    pub(crate) fn validate(payload: &[u8]) -> Result<(), ParserError> {
        check_payload_len(Velocity::NAME, 28, payload)
    }
}

impl<'a> From<&VelocityRef<'a>> for Velocity {
    fn from(packet: &VelocityRef<'a>) -> Self {
        Velocity {
            time_gps: packet.time_gps(),
            north_cm_per_s: packet.vel_north_raw(),
            east_cm_per_s: packet.vel_east_raw(),
            down_cm_per_s: packet.vel_down_raw(),
            speed_cm_per_s: packet.speed_raw(),
            heading_degrees: packet.heading_degrees(),
            speed_accuracy_cm_per_s: packet.speed_accuracy_raw(),
        }
    }
}

impl fmt::Debug for VelocityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Velocity")
            .field("time_gps", &self.time_gps())
            .field("vel_north", &self.vel_north())
            .field("vel_east", &self.vel_east())
            .field("vel_down", &self.vel_down())
            .field("speed", &self.speed())
            .field("heading_degrees", &self.heading_degrees())
            .field("speed_accuracy", &self.speed_accuracy())
            .finish()
    }
}
