use core::fmt;

use crate::{
    constants::ERB_SVI_RECORD_LEN,
    erb_packets::{i32_at, u16_at, u32_at, ErbPacketMeta, SvType},
    error::ParserError,
};

/// Offset of the first satellite record: time_gps (4) + num_svs (1)
const SVI_RECORDS_OFFSET: usize = 5;

/// Satellites used for the observation, as sent by the receiver
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatelliteList {
    /// GPS time of week in ms
    pub time_gps: u32,
    pub num_svs: u8,
    pub svs: Vec<SvInfo>,
}

impl ErbPacketMeta for SatelliteList {
    const ID: u8 = 0x06;
    const NAME: &'static str = "SVI";
    const FIXED_PAYLOAD_LEN: Option<u16> = None;
}

/// Satellites used for the observation
///
/// Contains a reference to an underlying buffer, contains accessor methods to retrieve data.
pub struct SatelliteListRef<'a>(pub(crate) &'a [u8]);

impl<'a> SatelliteListRef<'a> {
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
    pub fn num_svs(&self) -> u8 {
        self.0[4]
    }

    /// Records in index order
    pub fn svs(&self) -> SvInfoIter<'a> {
        SvInfoIter::new(&self.0[SVI_RECORDS_OFFSET..])
    }

    /// Record `index`, if the message carries that many
    pub fn sv(&self, index: usize) -> Option<SvInfoRef<'a>> {
        if index >= usize::from(self.num_svs()) {
            return None;
        }
        let start = SVI_RECORDS_OFFSET + index * ERB_SVI_RECORD_LEN;
        Some(SvInfoRef(&self.0[start..start + ERB_SVI_RECORD_LEN]))
    }

    pub fn to_owned(&self) -> SatelliteList {
        self.into()
    }

    /// The payload has to hold exactly `num_svs` records.
    pub(crate) fn validate(payload: &[u8]) -> Result<(), ParserError> {
        let got = payload.len();
        if got < SVI_RECORDS_OFFSET {
            return Err(ParserError::InvalidPacketLen {
                packet: SatelliteList::NAME,
                expect: SVI_RECORDS_OFFSET,
                got,
            });
        }
        let expect = SVI_RECORDS_OFFSET + usize::from(payload[4]) * ERB_SVI_RECORD_LEN;
        if got == expect {
            Ok(())
        } else {
            Err(ParserError::InvalidPacketLen {
                packet: SatelliteList::NAME,
                expect,
                got,
            })
        }
    }
}

impl<'a> From<&SatelliteListRef<'a>> for SatelliteList {
    fn from(packet: &SatelliteListRef<'a>) -> Self {
        SatelliteList {
            time_gps: packet.time_gps(),
            num_svs: packet.num_svs(),
            svs: packet.svs().map(|sv| sv.to_owned()).collect(),
        }
    }
}

impl fmt::Debug for SatelliteListRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SatelliteList")
            .field("time_gps", &self.time_gps())
            .field("num_svs", &self.num_svs())
            .field("svs", &self.svs())
            .finish()
    }
}

/// Iterator over the satellite records of a [`SatelliteListRef`]
#[derive(Clone)]
pub struct SvInfoIter<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SvInfoIter<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }
}

impl<'a> core::iter::Iterator for SvInfoIter<'a> {
    type Item = SvInfoRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset + ERB_SVI_RECORD_LEN <= self.data.len() {
            let data = &self.data[self.offset..self.offset + ERB_SVI_RECORD_LEN];
            self.offset += ERB_SVI_RECORD_LEN;
            Some(SvInfoRef(data))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.data.len() - self.offset) / ERB_SVI_RECORD_LEN;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SvInfoIter<'_> {}

impl fmt::Debug for SvInfoIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Observation of a single satellite
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvInfo {
    pub id: u8,
    pub sv_type: SvType,
    pub carrier_phase_cycles: f64,
    pub pseudo_range_residual_meters: i32,
    pub doppler_frequency_hz: f64,
    pub signal_strength_dbhz: f64,
    pub azimuth_degrees: f64,
    pub elevation_degrees: f64,
}

/// Observation of a single satellite, borrowed from a `SVI` payload
#[derive(Clone, Copy)]
pub struct SvInfoRef<'a>(pub(crate) &'a [u8]);

impl SvInfoRef<'_> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn sv_type_raw(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn sv_type(&self) -> SvType {
        SvType::from(self.sv_type_raw())
    }

    /// Carrier phase in 0.01 cycles
    #[inline]
    pub fn carrier_phase_raw(&self) -> i32 {
        i32_at(self.0, 2)
    }

    /// Carrier phase in cycles
    #[inline]
    pub fn carrier_phase(&self) -> f64 {
        f64::from(self.carrier_phase_raw()) * 1e-2
    }

    /// Pseudo range residual in meters
    #[inline]
    pub fn pseudo_range_residual(&self) -> i32 {
        i32_at(self.0, 6)
    }

    /// Doppler in mHz
    #[inline]
    pub fn doppler_frequency_raw(&self) -> i32 {
        i32_at(self.0, 10)
    }

    /// Doppler in Hz
    #[inline]
    pub fn doppler_frequency(&self) -> f64 {
        f64::from(self.doppler_frequency_raw()) * 1e-3
    }

    /// Carrier to noise ratio in 0.25 dB-Hz
    #[inline]
    pub fn signal_strength_raw(&self) -> u16 {
        u16_at(self.0, 14)
    }

    /// Carrier to noise ratio in dB-Hz
    #[inline]
    pub fn signal_strength(&self) -> f64 {
        f64::from(self.signal_strength_raw()) * 0.25
    }

    /// Azimuth in 0.1 degrees
    #[inline]
    pub fn azimuth_raw(&self) -> u16 {
        u16_at(self.0, 16)
    }

    #[inline]
    pub fn azimuth_degrees(&self) -> f64 {
        f64::from(self.azimuth_raw()) * 1e-1
    }

    /// Elevation in 0.1 degrees
    #[inline]
    pub fn elevation_raw(&self) -> u16 {
        u16_at(self.0, 18)
    }

    #[inline]
    pub fn elevation_degrees(&self) -> f64 {
        f64::from(self.elevation_raw()) * 1e-1
    }

    pub fn to_owned(&self) -> SvInfo {
        self.into()
    }
}

impl From<&SvInfoRef<'_>> for SvInfo {
    fn from(sv: &SvInfoRef<'_>) -> Self {
        SvInfo {
            id: sv.id(),
            sv_type: sv.sv_type(),
            carrier_phase_cycles: sv.carrier_phase(),
            pseudo_range_residual_meters: sv.pseudo_range_residual(),
            doppler_frequency_hz: sv.doppler_frequency(),
            signal_strength_dbhz: sv.signal_strength(),
            azimuth_degrees: sv.azimuth_degrees(),
            elevation_degrees: sv.elevation_degrees(),
        }
    }
}

impl fmt::Debug for SvInfoRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvInfo")
            .field("id", &self.id())
            .field("sv_type", &self.sv_type())
            .field("carrier_phase", &self.carrier_phase())
            .field("pseudo_range_residual", &self.pseudo_range_residual())
            .field("doppler_frequency", &self.doppler_frequency())
            .field("signal_strength", &self.signal_strength())
            .field("azimuth", &self.azimuth_degrees())
            .field("elevation", &self.elevation_degrees())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(id: u8, sv_type: u8, signal_strength: u16) -> [u8; ERB_SVI_RECORD_LEN] {
        let mut rec = [0u8; ERB_SVI_RECORD_LEN];
        rec[0] = id;
        rec[1] = sv_type;
        rec[2..6].copy_from_slice(&(-1250i32).to_le_bytes());
        rec[6..10].copy_from_slice(&(-3i32).to_le_bytes());
        rec[10..14].copy_from_slice(&12_345i32.to_le_bytes());
        rec[14..16].copy_from_slice(&signal_strength.to_le_bytes());
        rec[16..18].copy_from_slice(&1800u16.to_le_bytes());
        rec[18..20].copy_from_slice(&450u16.to_le_bytes());
        rec
    }

    fn payload(records: &[[u8; ERB_SVI_RECORD_LEN]]) -> Vec<u8> {
        let mut payload = 42u32.to_le_bytes().to_vec();
        payload.push(records.len() as u8);
        for rec in records {
            payload.extend_from_slice(rec);
        }
        payload
    }

    #[test]
    fn iterate_records() {
        let payload = payload(&[record(1, 0, 160), record(7, 2, 100)]);
        SatelliteListRef::validate(&payload).unwrap();
        let svi = SatelliteListRef(&payload);
        assert_eq!(svi.time_gps(), 42);
        assert_eq!(svi.num_svs(), 2);

        let mut it = svi.svs();
        assert_eq!(it.len(), 2);
        let first = it.next().unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(first.sv_type(), SvType::Gps);
        assert_eq!(first.signal_strength(), 40.0);
        assert_eq!(first.carrier_phase(), -12.5);
        assert_eq!(first.pseudo_range_residual(), -3);
        assert_eq!(first.doppler_frequency(), 12.345);
        assert_eq!(first.azimuth_degrees(), 180.0);
        assert_eq!(first.elevation_degrees(), 45.0);
        let second = it.next().unwrap();
        assert_eq!(second.id(), 7);
        assert_eq!(second.sv_type(), SvType::Galileo);
        assert_eq!(second.signal_strength(), 25.0);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn index_records() {
        let payload = payload(&[record(3, 1, 0), record(4, 4, 0), record(5, 6, 0)]);
        let svi = SatelliteListRef(&payload);
        assert_eq!(svi.sv(1).map(|sv| sv.id()), Some(4));
        assert_eq!(svi.sv(2).map(|sv| sv.sv_type()), Some(SvType::Sbas));
        assert!(svi.sv(3).is_none());
    }

    #[test]
    fn empty_list() {
        let payload = payload(&[]);
        SatelliteListRef::validate(&payload).unwrap();
        let svi = SatelliteListRef(&payload).to_owned();
        assert_eq!(svi.num_svs, 0);
        assert!(svi.svs.is_empty());
    }

    #[test]
    fn reject_len_mismatch() {
        let mut payload = payload(&[record(1, 0, 160)]);
        payload.push(0);
        assert_eq!(
            SatelliteListRef::validate(&payload),
            Err(ParserError::InvalidPacketLen {
                packet: "SVI",
                expect: 25,
                got: 26
            })
        );
        assert_eq!(
            SatelliteListRef::validate(&[0, 0, 0, 0]),
            Err(ParserError::InvalidPacketLen {
                packet: "SVI",
                expect: 5,
                got: 4
            })
        );
        // Announces two records but carries one
        payload.truncate(25);
        payload[4] = 2;
        assert_eq!(
            SatelliteListRef::validate(&payload),
            Err(ParserError::InvalidPacketLen {
                packet: "SVI",
                expect: 45,
                got: 25
            })
        );
    }
}
