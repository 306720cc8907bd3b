use std::{path::PathBuf, time::Duration};

use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches};

/// Where the ERB stream comes from
#[derive(Debug)]
pub enum Source {
    Tcp(String),
    Serial { port: String, baud: u32 },
    File(PathBuf),
    Stdin,
}

#[derive(Debug)]
pub struct Options {
    pub source: Source,
    /// Deadline for every single packet on live connections
    pub timeout: Option<Duration>,
    pub json: bool,
    pub count: Option<usize>,
    pub verbose: bool,
}

pub fn command() -> clap::Command {
    clap::Command::new(clap::crate_name!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .arg(
            Arg::new("tcp")
                .value_name("host:port")
                .long("tcp")
                .help("Connect to the receiver's ERB output over TCP, e.g. 192.168.2.15:9001"),
        )
        .arg(
            Arg::new("port")
                .value_name("port")
                .short('p')
                .long("port")
                .help("Serial port the receiver is attached to"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .default_value("115200")
                .value_parser(value_parser!(u32))
                .help("Baud rate for the selected serial port"),
        )
        .arg(
            Arg::new("file")
                .value_name("path")
                .short('f')
                .long("file")
                .value_parser(value_parser!(PathBuf))
                .help("Read a recorded ERB capture instead of a live stream"),
        )
        .group(ArgGroup::new("source").args(["tcp", "port", "file"]))
        .arg(
            Arg::new("timeout")
                .value_name("ms")
                .short('t')
                .long("timeout")
                .value_parser(value_parser!(u64))
                .help("Give up when a live connection stays without a packet for this long"),
        )
        .arg(
            Arg::new("count")
                .value_name("n")
                .short('n')
                .long("count")
                .value_parser(value_parser!(usize))
                .help("Stop after printing this many messages"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print one JSON object per message"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log framing decisions to stderr"),
        )
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let source = if let Some(addr) = matches.get_one::<String>("tcp") {
            Source::Tcp(addr.clone())
        } else if let Some(port) = matches.get_one::<String>("port") {
            Source::Serial {
                port: port.clone(),
                baud: matches.get_one::<u32>("baud").copied().unwrap_or(115200),
            }
        } else if let Some(path) = matches.get_one::<PathBuf>("file") {
            Source::File(path.clone())
        } else {
            Source::Stdin
        };
        Self {
            source,
            timeout: matches
                .get_one::<u64>("timeout")
                .map(|ms| Duration::from_millis(*ms)),
            json: matches.get_flag("json"),
            count: matches.get_one::<usize>("count").copied(),
            verbose: matches.get_flag("verbose"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let matches = command()
            .try_get_matches_from(std::iter::once("erb-cli").chain(args.iter().copied()))
            .unwrap();
        Options::from_matches(&matches)
    }

    #[test]
    fn defaults_to_stdin() {
        let opts = parse(&[]);
        assert!(matches!(opts.source, Source::Stdin));
        assert!(opts.timeout.is_none());
        assert!(!opts.json);
    }

    #[test]
    fn serial_source() {
        let opts = parse(&["--port", "/dev/ttyACM0", "--timeout", "1500", "-n", "3"]);
        match opts.source {
            Source::Serial { port, baud } => {
                assert_eq!(port, "/dev/ttyACM0");
                assert_eq!(baud, 115200);
            },
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(opts.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(opts.count, Some(3));
    }

    #[test]
    fn sources_are_exclusive() {
        assert!(command()
            .try_get_matches_from(["erb-cli", "--tcp", "localhost:9001", "--file", "x.erb"])
            .is_err());
    }
}
