//! Receiving messages from a live connection with an optional deadline.
//!
//! Opening the TCP socket or serial port is up to the caller; [`Client`] only needs
//! something that can read bytes and bound the time a read blocks.

use std::{
    io::{self, Read},
    net::TcpStream,
    time::{Duration, Instant},
};

use tracing::trace;

use crate::{
    erb_packets::{Message, MessageKind, PacketRef, SvInfo},
    error::Error,
    scanner::Scanner,
};

/// A byte source whose reads can be bounded in time
pub trait ReadTimeout: Read {
    /// `None` removes the bound set by an earlier call.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;
}

impl ReadTimeout for TcpStream {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }
}

/// Serial ports cannot block forever, so `None` keeps the timeout the port was opened with.
#[cfg(feature = "serialport")]
impl ReadTimeout for Box<dyn serialport::SerialPort> {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        match timeout {
            Some(timeout) => self.set_timeout(timeout).map_err(io::Error::from),
            None => Ok(()),
        }
    }
}

/// Applies the time left until `deadline` to every read of the wrapped connection.
struct Deadlined<C> {
    conn: C,
    deadline: Option<Instant>,
    bounded: bool,
}

impl<C: ReadTimeout> Read for Deadlined<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "deadline expired before a full packet arrived",
                    ));
                }
                self.conn.set_read_timeout(Some(remaining))?;
                self.bounded = true;
            },
            None if self.bounded => {
                self.conn.set_read_timeout(None)?;
                self.bounded = false;
            },
            None => {},
        }
        self.conn.read(buf)
    }
}

/// Receives ERB messages from a connection, one packet per [`receive`](Self::receive).
///
/// Any failure, a missed deadline included, leaves the client unusable: later calls
/// return [`Error::Halted`].
pub struct Client<C: ReadTimeout> {
    scanner: Scanner<Deadlined<C>>,
}

impl<C: ReadTimeout> Client<C> {
    pub fn new(conn: C) -> Self {
        Self {
            scanner: Scanner::new(Deadlined {
                conn,
                deadline: None,
                bounded: false,
            }),
        }
    }

    /// Wait for the next packet. With a `deadline` the wait ends with an I/O error of kind
    /// `TimedOut` or `WouldBlock` (depending on the platform) once it has passed.
    pub fn receive(&mut self, deadline: Option<Instant>) -> Result<MessageKind, Error> {
        self.scanner.get_mut().deadline = deadline;
        match self.scanner.advance()? {
            Some(kind) => {
                trace!(%kind, "received");
                Ok(kind)
            },
            None => Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed",
            ))),
        }
    }

    /// Same as [`receive`](Self::receive) with a deadline `timeout` from now.
    pub fn receive_timeout(&mut self, timeout: Duration) -> Result<MessageKind, Error> {
        self.receive(Some(Instant::now() + timeout))
    }

    pub fn packet(&self) -> Option<PacketRef<'_>> {
        self.scanner.packet()
    }

    pub fn message(&self) -> Option<Message> {
        self.scanner.message()
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.scanner.bytes()
    }

    pub fn next_satellite(&mut self) -> Option<SvInfo> {
        self.scanner.next_satellite()
    }

    pub fn get_ref(&self) -> &C {
        &self.scanner.get_ref().conn
    }

    pub fn into_inner(self) -> C {
        self.scanner.into_inner().conn
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::VecDeque;

    const VER_PACKET: [u8; 14] = [
        0x45, 0x52, 0x01, 0x07, 0x00, 0xe8, 0x03, 0x00, 0x00, 0x00, 0x01, 0x00, 0xf4, 0xb5,
    ];

    /// Hands out one scripted chunk per read and records the timeouts it was given
    struct MockConn {
        chunks: VecDeque<io::Result<Vec<u8>>>,
        timeouts: Vec<Option<Duration>>,
    }

    impl MockConn {
        fn new(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            Self {
                chunks: chunks.into(),
                timeouts: Vec::new(),
            }
        }
    }

    impl Read for MockConn {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(Ok(chunk)) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                },
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    impl ReadTimeout for MockConn {
        fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
            self.timeouts.push(timeout);
            Ok(())
        }
    }

    #[test]
    fn receive_without_deadline() {
        let conn = MockConn::new(vec![Ok(VER_PACKET[..6].to_vec()), Ok(VER_PACKET[6..].to_vec())]);
        let mut client = Client::new(conn);
        assert_eq!(client.receive(None).unwrap(), MessageKind::Version);
        assert_eq!(client.bytes(), Some(&VER_PACKET[..]));
        assert!(client.get_ref().timeouts.is_empty());
        assert!(matches!(
            client.receive(None),
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof
        ));
    }

    #[test]
    fn deadline_is_applied_to_reads() {
        let conn = MockConn::new(vec![Ok(VER_PACKET.to_vec())]);
        let mut client = Client::new(conn);
        let kind = client.receive_timeout(Duration::from_secs(60)).unwrap();
        assert_eq!(kind, MessageKind::Version);
        let timeouts = &client.get_ref().timeouts;
        assert_eq!(timeouts.len(), 1);
        assert!(timeouts[0].is_some_and(|t| t > Duration::ZERO && t <= Duration::from_secs(60)));
    }

    #[test]
    fn expired_deadline() {
        let conn = MockConn::new(vec![Ok(VER_PACKET.to_vec())]);
        let mut client = Client::new(conn);
        let past = Instant::now() - Duration::from_millis(1);
        assert!(matches!(
            client.receive(Some(past)),
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::TimedOut
        ));
        assert!(matches!(client.receive(None), Err(Error::Halted)));
    }

    #[test]
    fn read_timeout_fails_client() {
        let conn = MockConn::new(vec![
            Ok(VER_PACKET[..3].to_vec()),
            Err(io::Error::new(io::ErrorKind::WouldBlock, "timed out")),
        ]);
        let mut client = Client::new(conn);
        assert!(client.receive_timeout(Duration::from_secs(1)).is_err());
        assert!(matches!(client.receive(None), Err(Error::Halted)));
        assert_eq!(client.into_inner().timeouts.len(), 2);
    }
}
