//! TCP port newtype with validation and parsing.

use crate::error::InvalidArgument;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A TCP destination port.
///
/// Every `u16` is accepted, including 0. The kernel refuses a connect to
/// port 0, so such a sweep reports every host as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    #[inline]
    pub const fn new(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl FromStr for Port {
    type Err = InvalidArgument;

    /// Parse a decimal port number. Values above 65535, signs other than a
    /// leading `+`, and any surrounding whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>()
            .map(Self)
            .map_err(|_| InvalidArgument::Port(s.to_string()))
    }
}
