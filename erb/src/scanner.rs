use std::io::{self, Read};

use tracing::{debug, trace};

use crate::{
    constants::{ERB_CHECKSUM_LEN, ERB_HEADER_LEN, ERB_ID_OFFSET},
    erb_packets::{match_packet, Message, MessageKind, PacketRef, SatelliteListRef, SvInfo},
    error::Error,
    parser::{locate_packet, Locate},
};

const READ_CHUNK_SIZE: usize = 4096;

/// Where a [`Scanner`] is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    /// Nothing decoded yet
    Idle,
    /// A packet is available through the accessors
    Holding,
    /// The source reported end of stream
    Exhausted,
    /// A fatal error was reported, the source is not read anymore
    Failed,
}

struct Current {
    kind: MessageKind,
    len: usize,
}

/// Pulls ERB messages out of a byte source one at a time.
///
/// The scanner resynchronizes on garbage between packets but treats a corrupt packet
/// (bad checksum, malformed payload, unsupported protocol version) as the end of the
/// stream: the error is returned once and every later call to [`advance`](Self::advance)
/// fails with [`Error::Halted`].
///
/// ```
/// use erb::{MessageKind, Scanner};
///
/// let data: &[u8] = &[]; // From your socket or serial port
/// let mut scanner = Scanner::new(data);
/// while let Some(kind) = scanner.advance()? {
///     if kind == MessageKind::SatelliteList {
///         while let Some(sv) = scanner.next_satellite() {
///             println!("{sv:?}");
///         }
///     }
/// }
/// # Ok::<(), erb::Error>(())
/// ```
pub struct Scanner<R> {
    reader: R,
    buf: Vec<u8>,
    state: ScannerState,
    current: Option<Current>,
    sv_cursor: usize,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(READ_CHUNK_SIZE),
            state: ScannerState::Idle,
            current: None,
            sv_cursor: 0,
        }
    }

    /// Move to the next packet, reading from the source as needed.
    ///
    /// Returns the kind of the new packet, or `None` once the source is exhausted.
    pub fn advance(&mut self) -> Result<Option<MessageKind>, Error> {
        match self.state {
            ScannerState::Failed => return Err(Error::Halted),
            ScannerState::Exhausted => return Ok(None),
            ScannerState::Idle | ScannerState::Holding => {},
        }
        if let Some(cur) = self.current.take() {
            self.buf.drain(..cur.len);
        }
        self.sv_cursor = 0;

        match self.next_packet() {
            Ok(Some(kind)) => {
                self.state = ScannerState::Holding;
                Ok(Some(kind))
            },
            Ok(None) => {
                debug!("end of stream");
                self.state = ScannerState::Exhausted;
                Ok(None)
            },
            Err(err) => {
                debug!(%err, "scanner failed");
                self.state = ScannerState::Failed;
                Err(err)
            },
        }
    }

    fn next_packet(&mut self) -> Result<Option<MessageKind>, Error> {
        loop {
            match locate_packet(&self.buf)? {
                Locate::Packet { len } => {
                    let kind = MessageKind::from(self.buf[ERB_ID_OFFSET]);
                    trace!(%kind, len, "packet");
                    self.current = Some(Current { kind, len });
                    return Ok(Some(kind));
                },
                Locate::Skip(n) => {
                    self.buf.drain(..n);
                },
                Locate::Incomplete => {
                    if self.fill_buf()? == 0 {
                        self.finish();
                        return Ok(None);
                    }
                },
            }
        }
    }

    fn fill_buf(&mut self) -> Result<usize, Error> {
        let start = self.buf.len();
        self.buf.resize(start + READ_CHUNK_SIZE, 0);
        loop {
            match self.reader.read(&mut self.buf[start..]) {
                Ok(n) => {
                    self.buf.truncate(start + n);
                    return Ok(n);
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
                Err(e) => {
                    self.buf.truncate(start);
                    return Err(e.into());
                },
            }
        }
    }

    /// End of stream with `self.buf` holding less than a packet. Whatever is left, a cut
    /// off packet or line noise, is dropped and the stream ends cleanly.
    fn finish(&mut self) {
        if !self.buf.is_empty() {
            debug!(pending = self.buf.len(), "dropping incomplete tail");
            self.buf.clear();
        }
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ScannerState::Exhausted
    }

    pub fn is_failed(&self) -> bool {
        self.state == ScannerState::Failed
    }

    /// Kind of the current packet
    pub fn kind(&self) -> Option<MessageKind> {
        self.current.as_ref().map(|cur| cur.kind)
    }

    /// Raw bytes of the current packet, sync characters and checksum included
    pub fn bytes(&self) -> Option<&[u8]> {
        let cur = self.current.as_ref()?;
        Some(&self.buf[..cur.len])
    }

    /// Zero-copy view of the current packet. It borrows the scanner, so it has to be
    /// dropped before the next call to `advance()`.
    pub fn packet(&self) -> Option<PacketRef<'_>> {
        let cur = self.current.as_ref()?;
        let payload = &self.buf[ERB_HEADER_LEN..cur.len - ERB_CHECKSUM_LEN];
        match_packet(self.buf[ERB_ID_OFFSET], payload).ok()
    }

    /// Owned copy of the current packet with engineering units applied
    pub fn message(&self) -> Option<Message> {
        self.packet().map(|pack| pack.to_owned())
    }

    /// Next satellite record of the current `SVI` packet. Always `None` for other kinds.
    pub fn next_satellite(&mut self) -> Option<SvInfo> {
        let cur = self.current.as_ref()?;
        if cur.kind != MessageKind::SatelliteList {
            return None;
        }
        let payload = &self.buf[ERB_HEADER_LEN..cur.len - ERB_CHECKSUM_LEN];
        let sv = SatelliteListRef(payload).sv(self.sv_cursor)?.to_owned();
        self.sv_cursor += 1;
        Some(sv)
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Yields owned messages until the stream ends. A fatal error is yielded once, then the
/// iterator is over.
impl<R: Read> Iterator for Scanner<R> {
    type Item = Result<Message, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(_)) => self.message().map(Ok),
            Ok(None) | Err(Error::Halted) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
