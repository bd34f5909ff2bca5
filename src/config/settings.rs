//! Validated settings for one scan run.
//!
//! There is no configuration file and no environment lookup: everything
//! comes from the command line and is checked before any probe starts.

use crate::cli::OutputFormat;
use crate::scanner::{ScanJobConfig, TcpConnectProber};
use crate::types::{enumerate_targets, ProbeTimeout, Port, Subnet, Target};
use std::time::Duration;

/// Default pause between socket creation attempts when descriptors run out.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(10);

/// Everything needed to run a sweep.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Per-probe connection timeout.
    pub timeout: ProbeTimeout,
    /// Destination port.
    pub port: Port,
    /// Subnets in the order given.
    pub subnets: Vec<Subnet>,
    /// Report every probe outcome on stderr.
    pub debug: bool,
    /// Maximum simultaneous probes, 0 for unlimited.
    pub concurrency: usize,
    /// Pause between retries on descriptor exhaustion.
    pub backoff: Duration,
    /// Abort the run on the first failed probe.
    pub fail_fast: bool,
    /// Format of the primary output.
    pub output: OutputFormat,
}

impl ScanSettings {
    pub fn new(timeout: ProbeTimeout, port: Port, subnets: Vec<Subnet>) -> Self {
        Self {
            timeout,
            port,
            subnets,
            debug: false,
            concurrency: 0,
            backoff: DEFAULT_BACKOFF,
            fail_fast: false,
            output: OutputFormat::default(),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Targets in enumeration order.
    pub fn targets(&self) -> Vec<Target> {
        enumerate_targets(&self.subnets, self.port)
    }

    /// Build the probe engine for these settings.
    pub fn prober(&self) -> TcpConnectProber {
        TcpConnectProber::new(self.timeout.as_duration()).with_backoff(self.backoff)
    }

    /// Build the orchestration settings.
    pub fn job_config(&self) -> ScanJobConfig {
        ScanJobConfig::new(self.targets())
            .with_concurrency(self.concurrency)
            .with_debug(self.debug)
            .with_fail_fast(self.fail_fast)
    }
}
