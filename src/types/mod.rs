//! Core type definitions using newtype patterns for type safety.
//!
//! Everything here is validated on construction, so the scanner never sees
//! a malformed subnet, port or timeout.

mod port;
mod target;
mod timeout;

pub use port::Port;
pub use target::{enumerate_targets, parse_subnets, Subnet, Target};
pub use timeout::ProbeTimeout;
