//! Run configuration for portsweep.

mod settings;

pub use settings::{ScanSettings, DEFAULT_BACKOFF};
