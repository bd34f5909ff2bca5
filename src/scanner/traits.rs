//! Prober trait abstraction.
//!
//! Defines the interface between the orchestrator and the probe engine, so
//! the orchestrator can be driven by a fake in tests.

use crate::error::ScanError;
use crate::types::Target;
use async_trait::async_trait;
use std::fmt;

/// Classification of a single probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Connection established. `immediate` is set when `connect` itself
    /// succeeded without waiting.
    Open { immediate: bool },
    /// Connection actively refused or otherwise failed.
    Closed,
    /// No answer within the timeout.
    TimedOut,
    /// The transport reported the host as down.
    HostDown,
    /// The probe's own socket machinery failed.
    Failed(ScanError),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Open { .. } => OutcomeKind::Open,
            Self::Closed => OutcomeKind::Closed,
            Self::TimedOut => OutcomeKind::TimedOut,
            Self::HostDown => OutcomeKind::HostDown,
            Self::Failed(_) => OutcomeKind::Failed,
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { immediate: true } => write!(f, "connected immediately"),
            Self::Open { immediate: false } => write!(f, "connected"),
            Self::Closed => write!(f, "not connected"),
            Self::TimedOut => write!(f, "timeout"),
            Self::HostDown => write!(f, "host down"),
            Self::Failed(e) => write!(f, "error: {}", e),
        }
    }
}

/// Outcome class without payload, for counting and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Open,
    Closed,
    TimedOut,
    HostDown,
    Failed,
}

/// Trait for probe engine implementations.
///
/// # Example
///
/// ```ignore
/// use portsweep::scanner::{Prober, ProbeOutcome};
///
/// async fn is_listening<P: Prober>(prober: &P, target: Target) -> bool {
///     prober.probe(target).await.is_open()
/// }
/// ```
#[async_trait]
pub trait Prober: Send + Sync {
    /// Attempt one connection to `target` and classify it.
    ///
    /// Never panics and never returns early without releasing the socket;
    /// I/O failures come back as [`ProbeOutcome::Failed`].
    async fn probe(&self, target: Target) -> ProbeOutcome;
}
