use chrono::DateTime;
use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Timestamp
/// (in microseconds since the Unix epoch; negative values sit before it)
///
/// Microseconds are the persisted resolution, so a boundary computed from
/// a coarser source keeps its exact position after storage.
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    FromStr,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Sub,
    SubAssign,
)]
#[repr(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    /// Construct from microseconds.
    #[must_use]
    pub const fn from_micros(us: i64) -> Self {
        Self(us)
    }

    /// Construct from milliseconds (scaled to microseconds).
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms.saturating_mul(1_000))
    }

    /// Construct from seconds (scaled to microseconds).
    #[must_use]
    pub const fn from_seconds(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000))
    }

    pub fn parse_rfc3339(s: &str) -> Result<Self, TimestampParseError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|err| TimestampParseError::Invalid(err.to_string()))?;

        Ok(Self(dt.timestamp_micros()))
    }

    /// Parse integer microseconds first, RFC 3339 second.
    pub fn parse_flexible(s: &str) -> Result<Self, TimestampParseError> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self(n));
        }

        Self::parse_rfc3339(s)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whole milliseconds, truncated toward zero.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0 / 1_000
    }
}

impl From<i64> for Timestamp {
    fn from(us: i64) -> Self {
        Self(us)
    }
}

///
/// TimestampParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TimestampParseError {
    #[error("timestamp parse error: {0}")]
    Invalid(String),
}

///
/// TESTS
///
