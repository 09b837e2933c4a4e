use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Rating
/// Bounded quality score on the 0..=100 scale.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    pub const fn new(score: u8) -> Result<Self, RatingOutOfRange> {
        if score > Self::MAX.0 {
            return Err(RatingOutOfRange { score });
        }

        Ok(Self(score))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(score: u8) -> Result<Self, Self::Error> {
        Self::new(score)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.get()
    }
}

///
/// RatingOutOfRange
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("rating {score} is outside the 0..=100 scale")]
pub struct RatingOutOfRange {
    pub score: u8,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_scale() {
        assert_eq!(Rating::new(0).unwrap(), Rating::MIN);
        assert_eq!(Rating::new(100).unwrap(), Rating::MAX);
        assert_eq!(Rating::new(55).unwrap().get(), 55);
    }

    #[test]
    fn test_new_rejects_above_scale() {
        let err = Rating::new(101).unwrap_err();
        assert_eq!(err, RatingOutOfRange { score: 101 });
    }

    #[test]
    fn test_ordering_follows_score() {
        assert!(Rating::new(10).unwrap() < Rating::new(90).unwrap());
    }

    #[test]
    fn test_try_from_roundtrip() {
        let rating = Rating::try_from(42).unwrap();
        assert_eq!(u8::from(rating), 42);
    }
}
