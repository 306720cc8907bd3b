use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    net::TcpStream,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use erb::{Client, Message, MessageKind, ReadTimeout, Scanner};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Options, Source};

/// Serial reads always need a bound, used when no --timeout is given
const SERIAL_DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    let opts = Options::from_matches(&cli::command().get_matches());
    init_logging(opts.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut printer = Printer {
        out: &mut out,
        json: opts.json,
        left: opts.count,
    };

    match &opts.source {
        Source::Tcp(addr) => {
            let conn =
                TcpStream::connect(addr).with_context(|| format!("connecting to {addr}"))?;
            info!(%addr, "connected");
            dump_connection(conn, opts.timeout, &mut printer)?;
        },
        Source::Serial { port, baud } => {
            let conn = serialport::new(port, *baud)
                .timeout(opts.timeout.unwrap_or(SERIAL_DEFAULT_TIMEOUT))
                .open()
                .with_context(|| format!("opening serial port {port}"))?;
            info!(%port, baud, "serial port open");
            dump_connection(conn, opts.timeout, &mut printer)?;
        },
        Source::File(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            dump_stream(file, &mut printer)?;
        },
        Source::Stdin => dump_stream(io::stdin().lock(), &mut printer)?,
    }
    out.flush().context("writing output")
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "erb=trace,erb_cli=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Decode a stream that ends on its own
fn dump_stream<R: Read>(reader: R, printer: &mut Printer<'_>) -> Result<()> {
    let mut scanner = Scanner::new(reader);
    while !printer.done() {
        if scanner.advance().context("decoding stream")?.is_none() {
            break;
        }
        if let (Some(msg), Some(raw)) = (scanner.message(), scanner.bytes()) {
            printer.print(&msg, raw)?;
        }
    }
    Ok(())
}

/// Decode a live connection, each packet bounded by `timeout`
fn dump_connection<C: ReadTimeout>(
    conn: C,
    timeout: Option<Duration>,
    printer: &mut Printer<'_>,
) -> Result<()> {
    let mut client = Client::new(conn);
    while !printer.done() {
        let deadline = timeout.map(|t| Instant::now() + t);
        match client.receive(deadline) {
            Ok(kind) => debug!(%kind, "received"),
            Err(erb::Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!("connection closed by the receiver");
                break;
            },
            Err(e) => return Err(e).context("receiving from the receiver"),
        }
        if let (Some(msg), Some(raw)) = (client.message(), client.bytes()) {
            printer.print(&msg, raw)?;
        }
    }
    Ok(())
}

struct Printer<'a> {
    out: &'a mut dyn Write,
    json: bool,
    left: Option<usize>,
}

impl Printer<'_> {
    fn done(&self) -> bool {
        self.left == Some(0)
    }

    /// `raw` is the whole packet `msg` was decoded from
    fn print(&mut self, msg: &Message, raw: &[u8]) -> Result<()> {
        if let Some(left) = self.left.as_mut() {
            *left -= 1;
        }
        if self.json {
            serde_json::to_writer(&mut *self.out, msg)?;
            writeln!(self.out)?;
            return Ok(());
        }
        match msg {
            Message::Unknown { id, .. } => {
                writeln!(self.out, "{} {}", MessageKind::Unknown(*id), hex(raw))?
            },
            Message::SatelliteList(list) => {
                writeln!(
                    self.out,
                    "SVI time_gps={} num_svs={}",
                    list.time_gps, list.num_svs
                )?;
                for sv in &list.svs {
                    writeln!(
                        self.out,
                        "  {:<8} {:>3} cn0={:5.2} el={:5.1} az={:5.1} doppler={:.3}",
                        sv.sv_type.to_string(),
                        sv.id,
                        sv.signal_strength_dbhz,
                        sv.elevation_degrees,
                        sv.azimuth_degrees,
                        sv.doppler_frequency_hz,
                    )?;
                }
            },
            other => writeln!(self.out, "{other:?}")?,
        }
        Ok(())
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
