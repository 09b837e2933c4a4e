use crate::{
    query::{CompareOp, Filter, FilterPredicate},
    value::{PropertyValue, ValueKind},
};
use std::{cmp::Ordering, ops::Bound};
use thiserror::Error as ThisError;

///
/// PropertyRange
/// Interval constraints gathered for one property.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PropertyRange {
    pub lower: Bound<PropertyValue>,
    pub upper: Bound<PropertyValue>,
}

impl Default for PropertyRange {
    fn default() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }
}

impl PropertyRange {
    pub(crate) const fn lower_value(&self) -> Option<&PropertyValue> {
        bound_value(&self.lower)
    }

    pub(crate) const fn upper_value(&self) -> Option<&PropertyValue> {
        bound_value(&self.upper)
    }
}

///
/// RangeExtraction
/// The target property's interval plus the predicates every shard
/// carries unchanged.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RangeExtraction {
    pub property: String,
    pub range: PropertyRange,
    pub remainder: Vec<FilterPredicate>,
}

///
/// RangeFilterError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RangeFilterError {
    #[error("range bounds on '{property}' mix {left} and {right} values")]
    MixedKinds {
        property: String,
        left: ValueKind,
        right: ValueKind,
    },

    #[error("range predicates span multiple properties: '{first}' and '{second}'")]
    MultipleRangeProperties { first: String, second: String },
}

/// Split a filter into the range property's interval and the carried rest.
///
/// Extraction contract:
/// - All range operators must target one property; it becomes the split
///   target and a second range property is rejected.
/// - Same-side duplicates tighten: the larger lower / smaller upper wins,
///   and an exclusive bound beats an inclusive one at the same value.
/// - Eq predicates on the target and every predicate on other properties
///   are carried through untouched.
/// - Tightening never compares across kinds.
///
/// Returns `None` when the filter carries no range predicate at all.
pub(crate) fn extract_range(
    filter: Option<&Filter>,
) -> Result<Option<RangeExtraction>, RangeFilterError> {
    let mut target: Option<String> = None;
    let mut range = PropertyRange::default();
    let mut remainder = Vec::new();

    let leaves = filter.map(Filter::leaves).unwrap_or_default();
    for predicate in leaves {
        if predicate.op == CompareOp::Eq {
            remainder.push(predicate.clone());
            continue;
        }

        match &target {
            None => target = Some(predicate.property.clone()),
            Some(property) if *property != predicate.property => {
                return Err(RangeFilterError::MultipleRangeProperties {
                    first: property.clone(),
                    second: predicate.property.clone(),
                });
            }
            Some(_) => {}
        }

        let value = predicate.value.clone();
        match predicate.op {
            CompareOp::Gt => merge_lower(&mut range, Bound::Excluded(value), &predicate.property)?,
            CompareOp::Gte => merge_lower(&mut range, Bound::Included(value), &predicate.property)?,
            CompareOp::Lt => merge_upper(&mut range, Bound::Excluded(value), &predicate.property)?,
            CompareOp::Lte => merge_upper(&mut range, Bound::Included(value), &predicate.property)?,
            CompareOp::Eq => {}
        }
    }

    Ok(target.map(|property| {
        // Equality predicates on the target still restrict every shard, so
        // they ride along with the rest of the remainder.
        RangeExtraction {
            property,
            range,
            remainder,
        }
    }))
}

fn merge_lower(
    range: &mut PropertyRange,
    candidate: Bound<PropertyValue>,
    property: &str,
) -> Result<(), RangeFilterError> {
    let replace = match (&candidate, &range.lower) {
        (Bound::Unbounded, _) => false,
        (_, Bound::Unbounded) => true,
        (
            Bound::Included(left) | Bound::Excluded(left),
            Bound::Included(right) | Bound::Excluded(right),
        ) => match cmp_same_kind(left, right, property)? {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                matches!(candidate, Bound::Excluded(_))
                    && matches!(range.lower, Bound::Included(_))
            }
        },
    };

    if replace {
        range.lower = candidate;
    }

    Ok(())
}

fn merge_upper(
    range: &mut PropertyRange,
    candidate: Bound<PropertyValue>,
    property: &str,
) -> Result<(), RangeFilterError> {
    let replace = match (&candidate, &range.upper) {
        (Bound::Unbounded, _) => false,
        (_, Bound::Unbounded) => true,
        (
            Bound::Included(left) | Bound::Excluded(left),
            Bound::Included(right) | Bound::Excluded(right),
        ) => match cmp_same_kind(left, right, property)? {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => {
                matches!(candidate, Bound::Excluded(_))
                    && matches!(range.upper, Bound::Included(_))
            }
        },
    };

    if replace {
        range.upper = candidate;
    }

    Ok(())
}

fn cmp_same_kind(
    left: &PropertyValue,
    right: &PropertyValue,
    property: &str,
) -> Result<Ordering, RangeFilterError> {
    left.partial_cmp(right)
        .ok_or_else(|| RangeFilterError::MixedKinds {
            property: property.to_string(),
            left: left.kind(),
            right: right.kind(),
        })
}

const fn bound_value(bound: &Bound<PropertyValue>) -> Option<&PropertyValue> {
    match bound {
        Bound::Included(value) | Bound::Excluded(value) => Some(value),
        Bound::Unbounded => None,
    }
}

///
/// TESTS
///
