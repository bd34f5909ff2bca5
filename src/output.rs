//! Output formatting module.
//!
//! Results go to stdout, unstyled, so they can be piped. Diagnostics go to
//! stderr and are styled only when stderr is a terminal.

use crate::cli::OutputFormat;
use crate::scanner::{OutcomeKind, ProbeOutcome, ScanReport};
use crate::types::Target;
use console::{style, Style};
use std::fmt;
use std::io::{self, Write};

/// Format and print scan results to stdout.
pub fn print_results(report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, report, format)?;
    out.flush()
}

/// Write scan results in the requested format.
pub fn write_results<W: Write>(out: &mut W, report: &ScanReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, report),
        OutputFormat::Json => write_json(out, report),
    }
}

/// One open address per line, in enumeration order.
fn write_plain<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    for addr in report.open_addrs() {
        writeln!(out, "{}", addr)?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Print one probe outcome as `<addr> - <classification>` on stderr.
pub fn print_outcome(target: &Target, outcome: &ProbeOutcome) {
    let label = outcome_style(outcome.kind()).apply_to(outcome);
    eprintln!("{} - {}", target.addr, label);
}

fn outcome_style(kind: OutcomeKind) -> Style {
    let style = Style::new().for_stderr();
    match kind {
        OutcomeKind::Open => style.green().bold(),
        OutcomeKind::Closed => style.red(),
        OutcomeKind::TimedOut | OutcomeKind::HostDown => style.yellow(),
        OutcomeKind::Failed => style.red().bold(),
    }
}

/// Print a fatal error as a single `<program>: <message>` line.
pub fn print_error(program: &str, err: impl fmt::Display) {
    eprintln!("{}", format_error(program, err));
}

/// Only the top-level message is used: library errors already embed their
/// cause, so walking the source chain would repeat it.
pub fn format_error(program: &str, err: impl fmt::Display) -> String {
    format!("{}: {}", program, err)
}

/// Print a short note on stderr.
pub fn print_info(msg: &str) {
    eprintln!("{} {}", style("•").for_stderr().dim(), msg);
}
