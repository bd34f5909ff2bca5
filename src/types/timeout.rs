//! Per-probe connection timeout.
//!
//! Parsed from a decimal seconds value such as `0.5` or `3`, kept at
//! microsecond precision. The integral part must fit a signed 64-bit
//! seconds field, matching what `select(2)`-style APIs accept.

use crate::error::InvalidArgument;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const MICROS_PER_SEC: u32 = 1_000_000;
const FRACTION_DIGITS: usize = 6;

/// How long a single probe waits for its connection to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProbeTimeout {
    secs: u64,
    micros: u32,
}

impl ProbeTimeout {
    pub const ZERO: Self = Self { secs: 0, micros: 0 };

    /// Build a timeout from whole seconds and microseconds.
    ///
    /// Returns `None` if `micros` is not below one second or `secs` does not
    /// fit a signed 64-bit field.
    pub const fn new(secs: u64, micros: u32) -> Option<Self> {
        if micros >= MICROS_PER_SEC || secs > i64::MAX as u64 {
            None
        } else {
            Some(Self { secs, micros })
        }
    }

    pub const fn secs(self) -> u64 {
        self.secs
    }

    pub const fn micros(self) -> u32 {
        self.micros
    }

    pub const fn as_duration(self) -> Duration {
        Duration::new(self.secs, self.micros * 1_000)
    }
}

impl From<ProbeTimeout> for Duration {
    fn from(timeout: ProbeTimeout) -> Self {
        timeout.as_duration()
    }
}

impl fmt::Display for ProbeTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}s", self.secs, self.micros)
    }
}

impl FromStr for ProbeTimeout {
    type Err = InvalidArgument;

    /// Parse `[+][digits][.digits]`, with at least one digit. Fraction
    /// digits beyond microseconds are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidArgument::Timeout(s.to_string());

        // A single leading plus is accepted, as it is for ports.
        let body = s.strip_prefix('+').unwrap_or(s);
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        let secs = if int_part.is_empty() {
            0
        } else {
            // i64 range is the overflow boundary, not u64.
            int_part.parse::<i64>().map_err(|_| invalid())? as u64
        };

        let micros = frac_part
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(FRACTION_DIGITS)
            .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));

        Self::new(secs, micros).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ProbeTimeout {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_fractional() {
        let timeout = parse("0.5");
        assert_eq!((timeout.secs(), timeout.micros()), (0, 500_000));
        assert_eq!(timeout.as_duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_parse_whole_and_partial_forms() {
        assert_eq!(parse("3"), ProbeTimeout::new(3, 0).unwrap());
        assert_eq!(parse("3."), ProbeTimeout::new(3, 0).unwrap());
        assert_eq!(parse(".25"), ProbeTimeout::new(0, 250_000).unwrap());
        assert_eq!(parse("0"), ProbeTimeout::ZERO);
        assert_eq!(parse("007.000001"), ProbeTimeout::new(7, 1).unwrap());
    }

    #[test]
    fn test_microsecond_precision_roundtrip() {
        for (input, secs, micros) in [
            ("1.000001", 1, 1),
            ("12.345678", 12, 345_678),
            ("0.29", 0, 290_000),
            ("0.999999", 0, 999_999),
        ] {
            let timeout = parse(input);
            assert_eq!((timeout.secs(), timeout.micros()), (secs, micros), "{input}");
        }
    }

    #[test]
    fn test_sub_microsecond_digits_truncate() {
        assert_eq!(parse("1.0000019"), ProbeTimeout::new(1, 1).unwrap());
    }

    #[test]
    fn test_overflow_rejected() {
        assert_eq!(
            parse("9223372036854775807").secs(),
            i64::MAX as u64
        );
        assert!("9223372036854775808".parse::<ProbeTimeout>().is_err());
        assert!("99999999999999999999.5".parse::<ProbeTimeout>().is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        for bad in ["", ".", "-1", "-0.5", "abc", "1e3", "0.5s", " 1", "1.2.3", "+", "++1", "+-1", "-+1"] {
            assert_eq!(
                bad.parse::<ProbeTimeout>(),
                Err(InvalidArgument::Timeout(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_leading_plus_accepted() {
        assert_eq!(parse("+1"), ProbeTimeout::new(1, 0).unwrap());
        assert_eq!(parse("+.5"), ProbeTimeout::new(0, 500_000).unwrap());
        assert_eq!(parse("+1"), parse("1"));
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("0.5").to_string(), "0.500000s");
    }
}
