//! # portsweep - find open TCP ports across /24 subnets
//!
//! portsweep tries to connect to a single TCP port on every host of one or
//! more IPv4 `/24` networks at once and reports the hosts that accept.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanJobConfig, TcpConnectProber};
//! use portsweep::types::{enumerate_targets, parse_subnets, Port};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subnets = parse_subnets(["10.60.3.0/24"]).unwrap();
//!     let targets = enumerate_targets(&subnets, Port::new(80));
//!     let prober = Arc::new(TcpConnectProber::new(Duration::from_millis(500)));
//!
//!     let report = run_scan(prober, ScanJobConfig::new(targets)).await.unwrap();
//!     for addr in report.open_addrs() {
//!         println!("{}", addr);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Subnet, port, timeout and target types
//! - [`scanner`] - The probe engine and the orchestrator that runs it per target
//! - [`config`] - Validated run settings
//! - [`cli`] - Command-line parsing
//! - [`output`] - Result and diagnostic formatting
//! - [`logging`] - `tracing` subscriber setup
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{InvalidArgument, ScanError};
pub use scanner::{run_scan, ProbeOutcome, Prober, ScanReport};
pub use types::{Port, ProbeTimeout, Subnet, Target};
