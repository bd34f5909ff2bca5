//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions.

use crate::types::Target;
use std::io;
use thiserror::Error;

/// Rejected command-line input. Always detected before any probe is launched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("Invalid subnet '{0}'")]
    Subnet(String),

    #[error("Invalid port '{0}'")]
    Port(String),

    #[error("Invalid timeout '{0}'")]
    Timeout(String),

    #[error("wrong usage: {0}")]
    Usage(String),
}

/// I/O failure inside a single probe.
///
/// Refused, unreachable and silent hosts are outcomes, not errors; only
/// failures of the socket machinery itself end up here.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("socket: {0}")]
    Socket(#[source] io::Error),

    #[error("configure {target}: {source}")]
    Configure {
        target: Target,
        #[source]
        source: io::Error,
    },

    #[error("connect {target}: {source}")]
    Connect {
        target: Target,
        #[source]
        source: io::Error,
    },

    #[error("wait for {target}: {source}")]
    Readiness {
        target: Target,
        #[source]
        source: io::Error,
    },

    #[error("query {target}: {source}")]
    Status {
        target: Target,
        #[source]
        source: io::Error,
    },

    #[error("probe task for {target} failed: {reason}")]
    TaskFailed { target: Target, reason: String },
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
