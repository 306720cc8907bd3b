//! A proptest generator for ERB SVI messages with a variable number of satellite records.

use byteorder::{LittleEndian, WriteBytesExt};
use erb::{locate_packet, MessageKind, PacketRef, ParserError, Scanner, SvType};
use proptest::prelude::*;

/// A single 20 byte satellite record
#[derive(Debug, Clone)]
pub struct SvRecord {
    pub id: u8,
    pub sv_type: u8,
    pub carrier_phase: i32,
    pub pseudo_range_residual: i32,
    pub doppler: i32,
    pub signal_strength: u16,
    pub azimuth: u16,
    pub elevation: u16,
}

#[derive(Debug, Clone)]
pub struct SviPayload {
    pub time_gps: u32,
    pub svs: Vec<SvRecord>,
}

impl SviPayload {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut wtr = Vec::with_capacity(5 + 20 * self.svs.len());
        wtr.write_u32::<LittleEndian>(self.time_gps).unwrap();
        wtr.write_u8(self.svs.len() as u8).unwrap();
        for sv in &self.svs {
            wtr.write_u8(sv.id).unwrap();
            wtr.write_u8(sv.sv_type).unwrap();
            wtr.write_i32::<LittleEndian>(sv.carrier_phase).unwrap();
            wtr.write_i32::<LittleEndian>(sv.pseudo_range_residual).unwrap();
            wtr.write_i32::<LittleEndian>(sv.doppler).unwrap();
            wtr.write_u16::<LittleEndian>(sv.signal_strength).unwrap();
            wtr.write_u16::<LittleEndian>(sv.azimuth).unwrap();
            wtr.write_u16::<LittleEndian>(sv.elevation).unwrap();
        }
        wtr
    }
}

fn sv_record_strategy() -> impl Strategy<Value = SvRecord> {
    (
        any::<u8>(),
        0u8..10,
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        0u16..240,
        0u16..3600,
        0u16..900,
    )
        .prop_map(
            |(
                id,
                sv_type,
                carrier_phase,
                pseudo_range_residual,
                doppler,
                signal_strength,
                azimuth,
                elevation,
            )| SvRecord {
                id,
                sv_type,
                carrier_phase,
                pseudo_range_residual,
                doppler,
                signal_strength,
                azimuth,
                elevation,
            },
        )
}

fn svi_payload_strategy() -> impl Strategy<Value = SviPayload> {
    (any::<u32>(), prop::collection::vec(sv_record_strategy(), 0..=64))
        .prop_map(|(time_gps, svs)| SviPayload { time_gps, svs })
}

fn frame(id: u8, payload: &[u8]) -> Vec<u8> {
    let mut ret = vec![0x45, 0x52, id];
    ret.write_u16::<LittleEndian>(payload.len() as u16).unwrap();
    ret.extend_from_slice(payload);
    let ck = erb::erb_checksum(&ret[2..]);
    ret.write_u16::<LittleEndian>(ck).unwrap();
    ret
}

pub fn erb_svi_frame_strategy() -> impl Strategy<Value = (SviPayload, Vec<u8>)> {
    svi_payload_strategy().prop_map(|payload| {
        let frame = frame(0x06, &payload.to_bytes());
        (payload, frame)
    })
}

proptest! {
    #[test]
    fn test_packet_view_with_generated_svi_frames((expected, frame) in erb_svi_frame_strategy()) {
        let mut scanner = Scanner::new(&frame[..]);
        scanner.advance().unwrap();

        let Some(PacketRef::SatelliteList(list)) = scanner.packet() else {
            panic!("Scanner failed to parse a valid SVI packet");
        };

        prop_assert_eq!(list.time_gps(), expected.time_gps);
        prop_assert_eq!(usize::from(list.num_svs()), expected.svs.len());
        prop_assert_eq!(list.svs().len(), expected.svs.len());
        for (sv, exp) in list.svs().zip(&expected.svs) {
            prop_assert_eq!(sv.id(), exp.id);
            prop_assert_eq!(sv.sv_type(), SvType::from(exp.sv_type));
            prop_assert_eq!(sv.carrier_phase_raw(), exp.carrier_phase);
            prop_assert_eq!(sv.pseudo_range_residual(), exp.pseudo_range_residual);
            prop_assert_eq!(sv.doppler_frequency_raw(), exp.doppler);
            prop_assert_eq!(sv.signal_strength_raw(), exp.signal_strength);
            prop_assert_eq!(sv.azimuth_raw(), exp.azimuth);
            prop_assert_eq!(sv.elevation_raw(), exp.elevation);
        }
        prop_assert!(list.sv(expected.svs.len()).is_none());
    }

    #[test]
    fn test_scanner_satellite_cursor((expected, frame) in erb_svi_frame_strategy()) {
        let mut scanner = Scanner::new(&frame[..]);
        prop_assert_eq!(scanner.advance().unwrap(), Some(MessageKind::SatelliteList));
        let mut ids = Vec::new();
        while let Some(sv) = scanner.next_satellite() {
            ids.push(sv.id);
        }
        let expected_ids: Vec<u8> = expected.svs.iter().map(|sv| sv.id).collect();
        prop_assert_eq!(ids, expected_ids);
    }

    #[test]
    fn test_svi_count_mismatch_is_rejected(
        (expected, _) in erb_svi_frame_strategy(),
        claimed in any::<u8>(),
    ) {
        prop_assume!(usize::from(claimed) != expected.svs.len());
        let mut payload = expected.to_bytes();
        payload[4] = claimed;
        let frame = frame(0x06, &payload);

        prop_assert_eq!(
            locate_packet(&frame),
            Err(ParserError::InvalidPacketLen {
                packet: "SVI",
                expect: 5 + 20 * usize::from(claimed),
                got: payload.len(),
            })
        );
    }
}
