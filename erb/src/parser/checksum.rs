use crate::ParserError;

/// ERB [Fletcher-16 checksum](https://en.wikipedia.org/wiki/Fletcher%27s_checksum) calculator
/// supporting both streaming and single-shot use.
///
/// The checksum covers the message id, the payload length and the payload, never the sync
/// characters nor the checksum itself.
#[derive(Default, Debug, Clone, Copy)]
pub struct ErbChecksumCalc {
    ck_a: u8,
    ck_b: u8,
}

impl ErbChecksumCalc {
    pub const fn new() -> Self {
        Self { ck_a: 0, ck_b: 0 }
    }

    /// Update checksum with new bytes
    pub const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub const fn update_byte(&mut self, byte: u8) {
        self.ck_a = self.ck_a.wrapping_add(byte);
        self.ck_b = self.ck_b.wrapping_add(self.ck_a);
    }

    /// Current checksum in wire order: `ck_b` in the high byte, `ck_a` in the low one
    pub const fn result(self) -> u16 {
        ((self.ck_b as u16) << 8) | self.ck_a as u16
    }

    /// Compare against the checksum carried by a packet
    pub const fn validate(self, received: u16) -> Result<(), ParserError> {
        let got = self.result();
        if got == received {
            Ok(())
        } else {
            Err(ParserError::InvalidChecksum {
                expect: received,
                got,
            })
        }
    }
}

/// Single-shot checksum of `bytes`.
pub const fn erb_checksum(bytes: &[u8]) -> u16 {
    let mut calc = ErbChecksumCalc::new();
    calc.update(bytes);
    calc.result()
}
