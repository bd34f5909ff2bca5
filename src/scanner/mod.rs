//! Scanner module - launches and joins the probes.
//!
//! One tokio task is spawned per target. Tasks share nothing but the prober
//! and an optional semaphore; results are joined in launch order, so the
//! report lists open targets in enumeration order no matter which probe
//! finished first.

pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::output;
use crate::types::Target;
use futures::future::join_all;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

pub use tcp::TcpConnectProber;
pub use traits::{OutcomeKind, ProbeOutcome, Prober};

/// Orchestration settings for one sweep.
#[derive(Debug, Clone)]
pub struct ScanJobConfig {
    /// Targets in enumeration order.
    pub targets: Vec<Target>,
    /// Maximum simultaneous probes, 0 for unlimited.
    pub concurrency: usize,
    /// Write every outcome to stderr as it completes.
    pub debug: bool,
    /// Turn the first failed probe into an error for the whole run.
    pub fail_fast: bool,
}

impl ScanJobConfig {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            targets,
            concurrency: 0,
            debug: false,
            fail_fast: false,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// A probe whose socket machinery failed.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeFailure {
    pub target: Target,
    pub error: String,
}

/// Aggregated result of a sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub targets_probed: usize,
    /// Open targets in enumeration order.
    pub open: Vec<Target>,
    pub closed: usize,
    pub timed_out: usize,
    pub host_down: usize,
    pub failures: Vec<ProbeFailure>,
    pub duration_ms: u64,
}

impl ScanReport {
    /// Addresses of the open targets, in enumeration order.
    pub fn open_addrs(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.open.iter().map(|target| target.addr)
    }

    /// Number of outcomes recorded.
    pub fn outcomes(&self) -> usize {
        self.open.len() + self.closed + self.timed_out + self.host_down + self.failures.len()
    }

    fn record(&mut self, target: Target, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Open { .. } => self.open.push(target),
            ProbeOutcome::Closed => self.closed += 1,
            ProbeOutcome::TimedOut => self.timed_out += 1,
            ProbeOutcome::HostDown => self.host_down += 1,
            ProbeOutcome::Failed(e) => {
                warn!(%target, error = %e, "probe failed");
                self.failures.push(ProbeFailure {
                    target,
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Probe every target concurrently and wait for all of them.
///
/// With `fail_fast` set, the first failed probe in enumeration order is
/// returned as the error once every probe has finished.
pub async fn run_scan<P>(prober: Arc<P>, job: ScanJobConfig) -> ScanResult<ScanReport>
where
    P: Prober + 'static,
{
    let start = Instant::now();
    let semaphore = (job.concurrency > 0).then(|| Arc::new(Semaphore::new(job.concurrency)));

    debug!(
        targets = job.targets.len(),
        concurrency = job.concurrency,
        "launching probes"
    );

    let handles: Vec<_> = job
        .targets
        .iter()
        .map(|&target| {
            let prober = Arc::clone(&prober);
            let semaphore = semaphore.clone();
            let report_outcome = job.debug;

            tokio::spawn(async move {
                // Held until the probe finishes. The semaphore is never closed.
                let _permit = match semaphore {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };

                let outcome = prober.probe(target).await;
                if report_outcome {
                    output::print_outcome(&target, &outcome);
                }
                outcome
            })
        })
        .collect();

    let joined = join_all(handles).await;

    let mut report = ScanReport {
        targets_probed: job.targets.len(),
        ..ScanReport::default()
    };

    for (target, result) in job.targets.into_iter().zip(joined) {
        let outcome = result.unwrap_or_else(|e| {
            ProbeOutcome::Failed(ScanError::TaskFailed {
                target,
                reason: e.to_string(),
            })
        });

        match outcome {
            ProbeOutcome::Failed(e) if job.fail_fast => return Err(e),
            outcome => report.record(target, outcome),
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        probed = report.targets_probed,
        open = report.open.len(),
        failed = report.failures.len(),
        duration_ms = report.duration_ms,
        "scan complete"
    );

    Ok(report)
}
