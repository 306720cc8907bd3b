#[macro_use]
extern crate afl;

use erb::{constants::ERB_HEADER_LEN, locate_packet, Locate, ParserError, Scanner};

/// Frame `data` fed `chunksize` bytes at a time. Returns the packets found, the first
/// error if any, and what was still buffered at the end.
fn locate(chunksize: usize, data: &[u8]) -> (Vec<Vec<u8>>, Option<ParserError>, Vec<u8>) {
    let mut buf = Vec::new();
    let mut packets = Vec::new();
    for chunk in data.chunks(chunksize) {
        buf.extend_from_slice(chunk);
        loop {
            match locate_packet(&buf) {
                Ok(Locate::Packet { len }) => {
                    assert!(len >= ERB_HEADER_LEN + 2 && len <= buf.len());
                    packets.push(buf.drain(..len).collect());
                },
                Ok(Locate::Skip(n)) => {
                    assert!(n > 0 && n <= buf.len());
                    buf.drain(..n);
                },
                Ok(Locate::Incomplete) => break,
                Err(err) => return (packets, Some(err), buf),
            }
        }
    }

    // Anything left is either too short for a header or a header waiting for its payload
    if buf.len() >= ERB_HEADER_LEN {
        let payload_len = usize::from(u16::from_le_bytes([buf[3], buf[4]]));
        assert_eq!(&buf[..2], b"ER");
        assert!(buf.len() < ERB_HEADER_LEN + payload_len + 2);
    }
    (packets, None, buf)
}

fn scan(data: &[u8]) -> Vec<Vec<u8>> {
    let mut scanner = Scanner::new(data);
    let mut packets = Vec::new();
    loop {
        match scanner.advance() {
            Ok(Some(_)) => {
                let Some(bytes) = scanner.bytes() else {
                    panic!("holding a packet without bytes");
                };
                packets.push(bytes.to_vec());
                while scanner.next_satellite().is_some() {}
            },
            Ok(None) => {
                assert!(scanner.is_exhausted());
                break;
            },
            Err(_) => {
                assert!(scanner.is_failed());
                break;
            },
        }
    }
    packets
}

fn main() {
    fuzz!(|data: &[u8]| {
        if data.len() > 2 {
            let chunksize = usize::from(data[1]);
            let data = &data[2..];
            let (whole, whole_err, _) = locate(data.len(), data);
            if chunksize != 0 {
                let (chunked, chunked_err, _) = locate(chunksize, data);
                assert_eq!(chunked, whole);
                assert_eq!(chunked_err, whole_err);
            }
            assert_eq!(scan(data), whole);
        }
    });
}
