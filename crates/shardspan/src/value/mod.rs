pub mod codec;

pub use codec::{CanonicalBound, CodecError};

use crate::types::{Rating, Timestamp};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// PropertyValue
/// Typed property literal carried by filters, probes, and entities.
///
/// Cross-kind comparison yields no ordering, so a predicate comparing a
/// property against a differently typed literal never matches.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Float64(f64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Rating(Rating),
    Text(String),
    Timestamp(Timestamp),
}

impl PropertyValue {
    /// Discriminant tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Float64(_) => ValueKind::Float64,
            Self::Int8(_) => ValueKind::Int8,
            Self::Int16(_) => ValueKind::Int16,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Rating(_) => ValueKind::Rating,
            Self::Text(_) => ValueKind::Text,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }
}

// NOTE:
// PropertyValue::partial_cmp orders same-kind values only. Widening across
// integer kinds is intentionally absent; boundaries must decode back to the
// kind the caller supplied.
impl PartialOrd for PropertyValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.partial_cmp(b),
            (Self::Float64(a), Self::Float64(b)) => a.partial_cmp(b),
            (Self::Int8(a), Self::Int8(b)) => a.partial_cmp(b),
            (Self::Int16(a), Self::Int16(b)) => a.partial_cmp(b),
            (Self::Int32(a), Self::Int32(b)) => a.partial_cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.partial_cmp(b),
            (Self::Rating(a), Self::Rating(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.partial_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.partial_cmp(b),

            // Cross-kind comparisons: no ordering
            _ => None,
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for PropertyValue {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool      => Bool,
    f64       => Float64,
    i8        => Int8,
    i16       => Int16,
    i32       => Int32,
    i64       => Int64,
    Rating    => Rating,
    &str      => Text,
    String    => Text,
    Timestamp => Timestamp,
}

///
/// ValueKind
/// Discriminant-only tag used by the codec and by error payloads.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Bool,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Rating,
    Text,
    Timestamp,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Rating => "rating",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(PropertyValue::from(7_i32).kind(), ValueKind::Int32);
        assert_eq!(PropertyValue::from("abc").kind(), ValueKind::Text);
        assert_eq!(
            PropertyValue::from(Timestamp::from_micros(1)).kind(),
            ValueKind::Timestamp
        );
    }

    #[test]
    fn test_same_kind_values_order() {
        assert!(PropertyValue::Int64(1) < PropertyValue::Int64(2));
        assert!(PropertyValue::Text("a".into()) < PropertyValue::Text("b".into()));
        assert!(
            PropertyValue::Timestamp(Timestamp::from_millis(-1))
                < PropertyValue::Timestamp(Timestamp::EPOCH)
        );
    }

    #[test]
    fn test_cross_kind_values_do_not_order() {
        assert_eq!(
            PropertyValue::Int32(1).partial_cmp(&PropertyValue::Int64(1)),
            None
        );
        assert_eq!(
            PropertyValue::Text("1".into()).partial_cmp(&PropertyValue::Int64(1)),
            None
        );
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ValueKind::Int8.to_string(), "int8");
        assert_eq!(ValueKind::Timestamp.to_string(), "timestamp");
    }

    #[test]
    fn test_serde_roundtrip() {
        let value = PropertyValue::Timestamp(Timestamp::from_millis(250));
        let json = serde_json::to_string(&value).unwrap();
        let back: PropertyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
