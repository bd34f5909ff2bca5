//! TCP connect probe engine.
//!
//! Each probe owns one non-blocking socket: it is created (backing off while
//! the process is out of descriptors), connected, and then handed to the
//! tokio reactor to wait for writability under the configured timeout. The
//! socket is an owned RAII value throughout, so it is closed on every return
//! path including errors.

use crate::config::DEFAULT_BACKOFF;
use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::{ProbeOutcome, Prober};
use crate::types::Target;
use async_trait::async_trait;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::trace;

/// Probe engine using plain `connect(2)`. No privileges required.
#[derive(Debug, Clone)]
pub struct TcpConnectProber {
    timeout: Duration,
    backoff: Duration,
}

impl TcpConnectProber {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Set the pause between socket creation attempts on descriptor exhaustion.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Create a TCP/IPv4 socket, retrying for as long as descriptors are exhausted.
    async fn open_socket(&self) -> ScanResult<Socket> {
        loop {
            match Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)) {
                Ok(socket) => return Ok(socket),
                Err(e) if is_descriptor_exhaustion(&e) => {
                    trace!(error = %e, backoff = ?self.backoff, "out of descriptors, backing off");
                    sleep(self.backoff).await;
                }
                Err(e) => return Err(ScanError::Socket(e)),
            }
        }
    }

    async fn attempt_connect(&self, target: Target) -> ScanResult<ProbeOutcome> {
        let socket = self.open_socket().await?;
        socket
            .set_nonblocking(true)
            .map_err(|source| ScanError::Configure { target, source })?;

        if let Err(e) = socket.connect(&SockAddr::from(target.socket_addr())) {
            match classify_connect_error(&e) {
                ConnectStart::InProgress => {}
                ConnectStart::Finished(outcome) => return Ok(outcome),
                ConnectStart::Unexpected => return Err(ScanError::Connect { target, source: e }),
            }
        } else {
            return Ok(ProbeOutcome::Open { immediate: true });
        }

        // Ownership of the descriptor moves into the tokio stream here.
        let stream = TcpStream::from_std(std::net::TcpStream::from(socket))
            .map_err(|source| ScanError::Readiness { target, source })?;

        match timeout(self.timeout, stream.writable()).await {
            Err(_elapsed) => Ok(ProbeOutcome::TimedOut),
            Ok(Err(source)) => Err(ScanError::Readiness { target, source }),
            Ok(Ok(())) => match stream.take_error() {
                Ok(None) => Ok(ProbeOutcome::Open { immediate: false }),
                Ok(Some(_)) => Ok(ProbeOutcome::Closed),
                Err(source) => Err(ScanError::Status { target, source }),
            },
        }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, target: Target) -> ProbeOutcome {
        let start = Instant::now();
        let outcome = match self.attempt_connect(target).await {
            Ok(outcome) => outcome,
            Err(e) => ProbeOutcome::Failed(e),
        };
        trace!(%target, outcome = %outcome, elapsed = ?start.elapsed(), "probe finished");
        outcome
    }
}

/// How a non-blocking `connect` that did not succeed outright is handled.
#[derive(Debug)]
enum ConnectStart {
    /// Handshake underway; wait for writability.
    InProgress,
    /// Already decided without waiting.
    Finished(ProbeOutcome),
    /// Anything else is a failure of the probe itself.
    Unexpected,
}

fn classify_connect_error(err: &io::Error) -> ConnectStart {
    match err.raw_os_error() {
        Some(libc::EINPROGRESS) => ConnectStart::InProgress,
        Some(libc::EHOSTDOWN) => ConnectStart::Finished(ProbeOutcome::HostDown),
        Some(libc::ECONNREFUSED) => ConnectStart::Finished(ProbeOutcome::Closed),
        _ => ConnectStart::Unexpected,
    }
}

/// `EMFILE` is the per-process limit, `ENFILE` the system-wide one. Both
/// clear up as other probes close their sockets.
fn is_descriptor_exhaustion(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EMFILE) | Some(libc::ENFILE))
}
