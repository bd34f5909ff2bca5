//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. Positional
//! values are captured as strings and validated by the crate's own types so
//! every bad input maps to an [`InvalidArgument`].

use crate::config::ScanSettings;
use crate::error::InvalidArgument;
use crate::types::{parse_subnets, ProbeTimeout, Port};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::time::Duration;

/// Find hosts with an open TCP port across IPv4 /24 subnets.
///
/// Every host address 1-254 of each subnet is probed in parallel; the ones
/// that accept a connection within TIMEOUT are printed, one per line.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find hosts with an open TCP port across /24 subnets", long_about = None)]
pub struct Args {
    /// Print every probe outcome to stderr
    #[arg(long)]
    pub debug: bool,

    /// Seconds to wait for each connection (e.g. "0.5")
    #[arg(value_name = "TIMEOUT", allow_negative_numbers = true)]
    pub timeout: String,

    /// TCP port to probe
    #[arg(value_name = "PORT")]
    pub port: String,

    /// Subnets to sweep, each shaped "A.B.C.0/24"
    #[arg(value_name = "SUBNET", required = true, num_args = 1..)]
    pub subnets: Vec<String>,

    /// Maximum number of simultaneous probes (0 = unlimited)
    #[arg(short = 'c', long, default_value = "0")]
    pub concurrency: usize,

    /// Pause before retrying socket creation when out of file descriptors
    #[arg(long = "backoff-ms", value_name = "MS", default_value = "10")]
    pub backoff_ms: u64,

    /// Abort the whole run on the first probe that fails with an I/O error
    #[arg(long)]
    pub fail_fast: bool,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,
}

impl Args {
    /// Parse arguments, turning usage errors into [`InvalidArgument::Usage`].
    ///
    /// Help and version requests print and exit the process, as clap does.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, InvalidArgument>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => InvalidArgument::Usage(first_line(&e.to_string())),
        })
    }

    /// Validate the raw values into run settings.
    pub fn into_settings(self) -> Result<ScanSettings, InvalidArgument> {
        let timeout: ProbeTimeout = self.timeout.parse()?;
        let port: Port = self.port.parse()?;
        let subnets = parse_subnets(&self.subnets)?;

        Ok(ScanSettings::new(timeout, port, subnets)
            .with_debug(self.debug)
            .with_concurrency(self.concurrency)
            .with_backoff(Duration::from_millis(self.backoff_ms))
            .with_fail_fast(self.fail_fast)
            .with_output(self.output))
    }
}

/// Clap renders multi-line errors; keep the headline without its `error:` tag.
fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).trim().to_string()
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One open address per line
    #[default]
    Plain,
    /// JSON scan report
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Subnet;
    use std::net::Ipv4Addr;

    fn parse(args: &[&str]) -> Result<Args, InvalidArgument> {
        Args::try_parse_args(std::iter::once("portsweep").chain(args.iter().copied()))
    }

    #[test]
    fn test_basic_invocation() {
        let settings = parse(&["0.5", "80", "10.60.3.0/24"])
            .unwrap()
            .into_settings()
            .unwrap();

        assert!(!settings.debug);
        assert_eq!(settings.port, Port::new(80));
        assert_eq!(settings.timeout.as_duration(), Duration::from_millis(500));
        assert_eq!(settings.subnets.len(), 1);
        assert_eq!(settings.targets().len(), Subnet::HOSTS);
    }

    #[test]
    fn test_debug_flag_first() {
        let args = parse(&["--debug", "1", "8090", "10.0.1.0/24", "10.0.2.0/24"]).unwrap();
        assert!(args.debug);

        let settings = args.into_settings().unwrap();
        assert!(settings.debug);
        assert_eq!(settings.subnets[1].network(), Ipv4Addr::new(10, 0, 2, 0));
    }

    #[test]
    fn test_missing_subnets_is_usage_error() {
        let err = parse(&["0.5", "80"]).unwrap_err();
        assert!(matches!(err, InvalidArgument::Usage(_)), "{err:?}");
        assert!(!err.to_string().contains('\n'));
    }

    #[test]
    fn test_no_arguments_is_usage_error() {
        assert!(matches!(parse(&[]), Err(InvalidArgument::Usage(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let invalid = |args: &[&str]| parse(args).unwrap().into_settings().unwrap_err();

        assert_eq!(
            invalid(&["fast", "80", "10.0.0.0/24"]),
            InvalidArgument::Timeout("fast".into())
        );
        assert_eq!(
            invalid(&["-1", "80", "10.0.0.0/24"]),
            InvalidArgument::Timeout("-1".into())
        );
        assert_eq!(
            invalid(&["0.5", "70000", "10.0.0.0/24"]),
            InvalidArgument::Port("70000".into())
        );
        assert_eq!(
            invalid(&["0.5", "80", "10.0.0.0/16"]),
            InvalidArgument::Subnet("10.0.0.0/16".into())
        );
    }

    #[test]
    fn test_tuning_flags() {
        let settings = parse(&[
            "-c", "64", "--backoff-ms", "25", "--fail-fast", "-o", "json", "2", "443", "192.168.1.0/24",
        ])
        .unwrap()
        .into_settings()
        .unwrap();

        assert_eq!(settings.concurrency, 64);
        assert_eq!(settings.backoff, Duration::from_millis(25));
        assert!(settings.fail_fast);
        assert_eq!(settings.output, OutputFormat::Json);
    }

    #[test]
    fn test_first_line() {
        assert_eq!(
            first_line("error: the following required arguments were not provided:\n  <SUBNET>...\n"),
            "the following required arguments were not provided:"
        );
    }
}
