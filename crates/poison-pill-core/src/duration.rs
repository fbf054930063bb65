// crates/poison-pill-core/src/duration.rs
// ============================================================================
// Module: Timing Durations
// Description: Signed nanosecond durations with Go-style literal parsing.
// Purpose: Model `metav1.Duration` fields and materialize threshold literals.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Poison pill timing fields arrive as Go duration literals (`"5s"`, `"1.2ms"`,
//! `"-1ms"`, `"1h30m"`). [`TimingDuration`] stores them as a signed nanosecond
//! count and converts to whole milliseconds by truncation toward zero, which
//! is the granularity the timing floors are compared at.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Nanoseconds per microsecond.
const NANOS_PER_MICRO: u64 = 1_000;
/// Nanoseconds per millisecond.
const NANOS_PER_MILLI: u64 = 1_000_000;
/// Nanoseconds per second.
const NANOS_PER_SECOND: u64 = 1_000_000_000;
/// Nanoseconds per minute.
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
/// Nanoseconds per hour.
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;
/// Magnitude of `i64::MIN`, the largest accepted negative total.
const NEGATIVE_LIMIT: u64 = 1 << 63;
/// Maximum fractional digits that contribute to precision.
const MAX_FRACTION_DIGITS: usize = 18;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned when parsing a duration literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Input was empty or syntactically invalid.
    #[error("invalid duration '{0}'")]
    Invalid(String),
    /// A numeric group was not followed by a unit.
    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),
    /// A numeric group used an unsupported unit.
    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit {
        /// Unit text as written.
        unit: String,
        /// Full input literal.
        input: String,
    },
    /// The value does not fit in a signed 64-bit nanosecond count.
    #[error("duration '{0}' overflows the supported range")]
    Overflow(String),
}

// ============================================================================
// SECTION: Duration Type
// ============================================================================

/// Signed duration with nanosecond resolution.
///
/// # Invariants
/// - The range matches a signed 64-bit nanosecond count.
/// - [`TimingDuration::as_millis`] truncates toward zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimingDuration {
    /// Signed nanosecond count.
    nanos: i64,
}

impl TimingDuration {
    /// Zero-length duration.
    pub const ZERO: Self = Self {
        nanos: 0,
    };

    /// Creates a duration from nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self {
            nanos,
        }
    }

    /// Creates a duration from milliseconds, saturating at the range bounds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self::from_nanos(millis.saturating_mul(1_000_000))
    }

    /// Creates a duration from seconds, saturating at the range bounds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self::from_nanos(secs.saturating_mul(1_000_000_000))
    }

    /// Creates a duration from minutes, saturating at the range bounds.
    #[must_use]
    pub const fn from_mins(mins: i64) -> Self {
        Self::from_secs(mins.saturating_mul(60))
    }

    /// Returns the signed nanosecond count.
    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Returns whole milliseconds, discarding sub-millisecond precision.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.nanos / 1_000_000
    }

    /// Returns true when the duration is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    /// Parses a Go duration literal such as `"1h30m"` or `"-1.5ms"`.
    ///
    /// # Errors
    ///
    /// Returns [`DurationError`] when the literal is malformed or out of range.
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        let (negative, mut rest) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1 ..]),
            Some(b'+') => (false, &input[1 ..]),
            _ => (false, input),
        };
        if rest == "0" {
            return Ok(Self::ZERO);
        }
        if rest.is_empty() {
            return Err(DurationError::Invalid(input.to_string()));
        }

        let mut total: u64 = 0;
        while !rest.is_empty() {
            let (whole, after_whole) = split_digits(rest);
            let (fraction, remainder) = match after_whole.strip_prefix('.') {
                Some(after_dot) => split_digits(after_dot),
                None => ("", after_whole),
            };
            if whole.is_empty() && fraction.is_empty() {
                return Err(DurationError::Invalid(input.to_string()));
            }

            let unit_end = remainder
                .find(|ch: char| ch == '.' || ch.is_ascii_digit())
                .unwrap_or(remainder.len());
            let (unit, after_unit) = remainder.split_at(unit_end);
            if unit.is_empty() {
                return Err(DurationError::MissingUnit(input.to_string()));
            }
            let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

            let overflow = || DurationError::Overflow(input.to_string());
            let whole_value = parse_whole(whole).ok_or_else(overflow)?;
            let group = whole_value
                .checked_mul(scale)
                .and_then(|value| value.checked_add(fraction_nanos(fraction, scale)))
                .ok_or_else(overflow)?;
            total = total.checked_add(group).ok_or_else(overflow)?;
            if total > NEGATIVE_LIMIT {
                return Err(overflow());
            }
            rest = after_unit;
        }

        if negative {
            if total == NEGATIVE_LIMIT {
                return Ok(Self::from_nanos(i64::MIN));
            }
            let magnitude =
                i64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
            return Ok(Self::from_nanos(-magnitude));
        }
        let nanos = i64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
        Ok(Self::from_nanos(nanos))
    }
}

impl fmt::Display for TimingDuration {
    /// Formats using the Go duration layout (`"1h0m0s"`, `"1.2ms"`, `"0s"`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanos == 0 {
            return f.write_str("0s");
        }
        if self.nanos < 0 {
            f.write_str("-")?;
        }
        let magnitude = self.nanos.unsigned_abs();
        if magnitude < NANOS_PER_SECOND {
            let (scale, unit) = if magnitude < NANOS_PER_MICRO {
                (1, "ns")
            } else if magnitude < NANOS_PER_MILLI {
                (NANOS_PER_MICRO, "\u{00b5}s")
            } else {
                (NANOS_PER_MILLI, "ms")
            };
            return write!(f, "{}{unit}", format_scaled(magnitude, scale));
        }

        let hours = magnitude / NANOS_PER_HOUR;
        let minutes = (magnitude % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
        let seconds = magnitude % NANOS_PER_MINUTE;
        if hours > 0 {
            write!(f, "{hours}h{minutes}m")?;
        } else if minutes > 0 {
            write!(f, "{minutes}m")?;
        }
        write!(f, "{}s", format_scaled(seconds, NANOS_PER_SECOND))
    }
}

impl FromStr for TimingDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimingDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimingDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        Self::parse(&literal).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// SECTION: Threshold Conversion
// ============================================================================

/// Converts a duration literal into whole milliseconds.
///
/// Used to materialize timing floors such as `"10ms"` or `"10s"`.
///
/// # Errors
///
/// Returns [`DurationError`] when the literal cannot be parsed.
pub fn to_milliseconds(literal: &str) -> Result<i64, DurationError> {
    TimingDuration::parse(literal).map(TimingDuration::as_millis)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Splits a leading run of ASCII digits from the input.
fn split_digits(input: &str) -> (&str, &str) {
    let end = input.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(input.len());
    input.split_at(end)
}

/// Parses a run of ASCII digits, returning `None` on overflow.
fn parse_whole(digits: &str) -> Option<u64> {
    digits.bytes().try_fold(0_u64, |acc, byte| {
        acc.checked_mul(10)?.checked_add(u64::from(byte - b'0'))
    })
}

/// Scales a fractional digit run by the unit size in nanoseconds.
fn fraction_nanos(digits: &str, scale: u64) -> u64 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for byte in digits.bytes().take(MAX_FRACTION_DIGITS) {
        numerator = numerator * 10 + u128::from(byte - b'0');
        denominator *= 10;
    }
    let nanos = numerator * u128::from(scale) / denominator;
    u64::try_from(nanos).unwrap_or(scale)
}

/// Maps a unit suffix to its size in nanoseconds.
fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Formats `value / scale` with trailing fractional zeros removed.
fn format_scaled(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let remainder = value % scale;
    if remainder == 0 {
        return whole.to_string();
    }
    let width = scale.to_string().len() - 1;
    let fraction = format!("{remainder:0width$}");
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions are permitted."
    )]

    use super::TimingDuration;
    use super::format_scaled;

    #[test]
    fn display_uses_go_layout() {
        let cases = [
            ("0s", TimingDuration::ZERO),
            ("1ns", TimingDuration::from_nanos(1)),
            ("1.2ms", TimingDuration::from_nanos(1_200_000)),
            ("1.5\u{00b5}s", TimingDuration::from_nanos(1_500)),
            ("5s", TimingDuration::from_secs(5)),
            ("15m0s", TimingDuration::from_mins(15)),
            ("1h30m0s", TimingDuration::from_mins(90)),
            ("-1ms", TimingDuration::from_millis(-1)),
            ("2.5s", TimingDuration::from_millis(2_500)),
        ];
        for (expected, duration) in cases {
            assert_eq!(duration.to_string(), expected);
        }
    }

    #[test]
    fn display_output_parses_back() {
        let duration = TimingDuration::from_nanos(3_723_004_005_006);
        let reparsed = TimingDuration::parse(&duration.to_string()).unwrap();
        assert_eq!(reparsed, duration);
    }

    #[test]
    fn format_scaled_trims_trailing_zeros() {
        assert_eq!(format_scaled(1_200_000, 1_000_000), "1.2");
        assert_eq!(format_scaled(1_000_001, 1_000_000), "1.000001");
        assert_eq!(format_scaled(7, 1), "7");
    }

    #[test]
    fn as_millis_truncates_toward_zero() {
        assert_eq!(TimingDuration::from_nanos(1_999_999).as_millis(), 1);
        assert_eq!(TimingDuration::from_nanos(-1_500_000).as_millis(), -1);
        assert_eq!(TimingDuration::from_nanos(999_999).as_millis(), 0);
    }

    #[test]
    fn parse_accepts_extreme_negative() {
        let min = TimingDuration::parse("-9223372036854775808ns").unwrap();
        assert_eq!(min.as_nanos(), i64::MIN);
        assert!(TimingDuration::parse("9223372036854775808ns").is_err());
    }
}
