use crate::{
    types::{Rating, Timestamp},
    value::{PropertyValue, ValueKind},
};
use thiserror::Error as ThisError;

///
/// CanonicalBound
/// A range endpoint projected onto the shared integer domain, tagged with
/// the kind that produced it so boundaries decode back to the same type.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CanonicalBound {
    pub kind: ValueKind,
    pub unit: i64,
}

///
/// CodecError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum CodecError {
    #[error("{kind} values have no canonical range encoding")]
    Unsupported { kind: ValueKind },

    #[error("canonical value {unit} does not fit {kind}")]
    OutOfRange { kind: ValueKind, unit: i64 },
}

/// Project a typed endpoint onto the canonical integer domain.
///
/// Fixed-width integers and ratings map by identity; timestamps map to
/// their microsecond count. Everything else has no total integer order
/// shared with its peers and is rejected.
pub fn encode(value: &PropertyValue) -> Result<CanonicalBound, CodecError> {
    let unit = match value {
        PropertyValue::Int8(v) => i64::from(*v),
        PropertyValue::Int16(v) => i64::from(*v),
        PropertyValue::Int32(v) => i64::from(*v),
        PropertyValue::Int64(v) => *v,
        PropertyValue::Rating(r) => i64::from(r.get()),
        PropertyValue::Timestamp(t) => t.get(),
        PropertyValue::Bool(_) | PropertyValue::Float64(_) | PropertyValue::Text(_) => {
            return Err(CodecError::Unsupported { kind: value.kind() });
        }
    };

    Ok(CanonicalBound {
        kind: value.kind(),
        unit,
    })
}

/// Rebuild the typed value a canonical point stands for.
///
/// Exact inverse of [`encode`] for every point between two encoded
/// endpoints of the same kind.
pub fn decode(kind: ValueKind, unit: i64) -> Result<PropertyValue, CodecError> {
    let out_of_range = CodecError::OutOfRange { kind, unit };

    let value = match kind {
        ValueKind::Int8 => PropertyValue::Int8(i8::try_from(unit).map_err(|_| out_of_range)?),
        ValueKind::Int16 => PropertyValue::Int16(i16::try_from(unit).map_err(|_| out_of_range)?),
        ValueKind::Int32 => PropertyValue::Int32(i32::try_from(unit).map_err(|_| out_of_range)?),
        ValueKind::Int64 => PropertyValue::Int64(unit),
        ValueKind::Rating => {
            let score = u8::try_from(unit).map_err(|_| out_of_range)?;
            PropertyValue::Rating(Rating::new(score).map_err(|_| out_of_range)?)
        }
        ValueKind::Timestamp => PropertyValue::Timestamp(Timestamp::from_micros(unit)),
        ValueKind::Bool | ValueKind::Float64 | ValueKind::Text => {
            return Err(CodecError::Unsupported { kind });
        }
    };

    Ok(value)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_encode_by_identity() {
        assert_eq!(encode(&PropertyValue::Int8(-5)).unwrap().unit, -5);
        assert_eq!(encode(&PropertyValue::Int16(300)).unwrap().unit, 300);
        assert_eq!(encode(&PropertyValue::Int32(-70_000)).unwrap().unit, -70_000);
        assert_eq!(
            encode(&PropertyValue::Int64(i64::MAX)).unwrap().unit,
            i64::MAX
        );
    }

    #[test]
    fn test_timestamp_encodes_micros() {
        let bound = encode(&PropertyValue::Timestamp(Timestamp::from_millis(100))).unwrap();
        assert_eq!(bound.unit, 100_000);
        assert_eq!(bound.kind, ValueKind::Timestamp);
    }

    #[test]
    fn test_rating_encodes_score() {
        let rating = Rating::new(88).unwrap();
        assert_eq!(encode(&PropertyValue::Rating(rating)).unwrap().unit, 88);
    }

    #[test]
    fn test_unsupported_kinds_are_rejected() {
        for value in [
            PropertyValue::Bool(true),
            PropertyValue::Float64(1.5),
            PropertyValue::Text("x".into()),
        ] {
            let err = encode(&value).unwrap_err();
            assert_eq!(err, CodecError::Unsupported { kind: value.kind() });
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        for value in [
            PropertyValue::Int8(-128),
            PropertyValue::Int16(1_024),
            PropertyValue::Int32(-1),
            PropertyValue::Int64(42),
            PropertyValue::Rating(Rating::new(7).unwrap()),
            PropertyValue::Timestamp(Timestamp::from_micros(123_456)),
        ] {
            let bound = encode(&value).unwrap();
            assert_eq!(decode(bound.kind, bound.unit).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_rejects_narrowing_overflow() {
        assert_eq!(
            decode(ValueKind::Int8, 200).unwrap_err(),
            CodecError::OutOfRange {
                kind: ValueKind::Int8,
                unit: 200
            }
        );
        assert_eq!(
            decode(ValueKind::Rating, 101).unwrap_err(),
            CodecError::OutOfRange {
                kind: ValueKind::Rating,
                unit: 101
            }
        );
    }

    #[test]
    fn test_decode_rejects_unsupported_kinds() {
        assert_eq!(
            decode(ValueKind::Text, 0).unwrap_err(),
            CodecError::Unsupported {
                kind: ValueKind::Text
            }
        );
    }
}
