//! Diagnostic logging setup.
//!
//! Logs go to stderr through `tracing-subscriber`. The filter is derived from
//! the command line only; `RUST_LOG` is deliberately not consulted.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Pick the crate's log level from the CLI flags.
pub fn level_for(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Directive string for the given level: the crate at `level`, everything
/// else at `warn`.
pub fn filter_directive(level: Level) -> String {
    format!("warn,portsweep={}", level.as_str().to_lowercase())
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: Level) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(level))
        .map_err(|e| anyhow!("invalid log filter: {}", e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), Level::DEBUG);
        assert_eq!(level_for(false), Level::WARN);
    }

    #[test]
    fn test_filter_directive_parses() {
        for level in [Level::WARN, Level::DEBUG, Level::TRACE] {
            let directive = filter_directive(level);
            assert!(EnvFilter::try_new(&directive).is_ok(), "{directive}");
        }
        assert_eq!(filter_directive(Level::DEBUG), "warn,portsweep=debug");
    }
}
