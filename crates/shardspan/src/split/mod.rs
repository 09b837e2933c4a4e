
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// SplitError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum SplitError {
    #[error("segment count must be at least 1")]
    ZeroSegments,

    #[error("range is inverted or unordered")]
    InvertedRange,
}

///
/// SplitDomain
/// Scalar domains that can host evenly spaced boundary points.
///
/// The integer domain rounds each ideal point half away from zero and
/// clamps it back into the range; the real domain keeps exact points.
///

pub trait SplitDomain: Copy + PartialOrd + Sized {
    /// i-th of `segments` evenly spaced points across `[lo, hi]`.
    fn point(lo: Self, hi: Self, i: u32, segments: u32) -> Self;
}

impl SplitDomain for f64 {
    fn point(lo: Self, hi: Self, i: u32, segments: u32) -> Self {
        lo + (hi - lo) * Self::from(i) / Self::from(segments)
    }
}

impl SplitDomain for i64 {
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn point(lo: Self, hi: Self, i: u32, segments: u32) -> Self {
        // The width is computed in f64 so `hi - lo` cannot overflow; the
        // clamp absorbs float drift at the extremes of the domain.
        let width = hi as f64 - lo as f64;
        let ideal = lo as f64 + width * f64::from(i) / f64::from(segments);

        (ideal.round() as Self).clamp(lo, hi)
    }
}

/// Split `[lo, hi]` into at most `segments` contiguous intervals.
///
/// Returns the ascending, duplicate-free boundary points. The first point
/// is always `lo` and the last is always `hi`; interior points that land
/// on an already emitted value are dropped, so a coarse domain yields
/// fewer intervals than requested. Deterministic for fixed inputs.
pub fn split_range<T: SplitDomain>(lo: T, hi: T, segments: u32) -> Result<Vec<T>, SplitError> {
    if segments == 0 {
        return Err(SplitError::ZeroSegments);
    }
    // NaN endpoints are unordered and rejected alongside inverted ranges.
    match lo.partial_cmp(&hi) {
        Some(Ordering::Less | Ordering::Equal) => {}
        Some(Ordering::Greater) | None => return Err(SplitError::InvertedRange),
    }

    let mut points = Vec::with_capacity(segments as usize + 1);
    points.push(lo);

    let mut last = lo;
    for i in 1..segments {
        let point = T::point(lo, hi, i, segments);
        if point > last {
            points.push(point);
            last = point;
        }
    }
    if hi > last {
        points.push(hi);
    }

    Ok(points)
}
