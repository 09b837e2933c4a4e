//! Query partitioning.
//!
//! Turns one range-filtered query into contiguous, non-overlapping
//! sub-queries whose union scans exactly the rows the original would.

mod resolve;


use crate::{
    query::{
        CompareOp, Filter, FilterPredicate, PropertyRange, Query, RangeExtraction,
        RangeFilterError, SortDirection, extract_range,
    },
    split::split_range,
    store::{ProbeError, StoreProbe},
    trace::{SplitErrorClass, SplitScope, SplitTraceSink},
    value::{CodecError, PropertyValue, ValueKind, codec},
};
use resolve::resolve_bound;
use std::ops::Bound;
use thiserror::Error as ThisError;

///
/// PartitionError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum PartitionError {
    #[error("shard count must be at least 1")]
    InvalidShardCount,

    #[error("no range predicate or sort clause to partition on")]
    NoRangeProperty,

    #[error("lower bound {lower:?} exceeds upper bound {upper:?} on '{property}'")]
    InvertedRange {
        property: String,
        lower: PropertyValue,
        upper: PropertyValue,
    },

    #[error(transparent)]
    Filter(#[from] RangeFilterError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] ProbeError),

    #[error("partitioning invariant violated: {message}")]
    Invariant { message: String },
}

impl PartitionError {
    /// Stable classification carried on trace error events.
    #[must_use]
    pub const fn class(&self) -> SplitErrorClass {
        match self {
            Self::InvalidShardCount
            | Self::NoRangeProperty
            | Self::InvertedRange { .. }
            | Self::Filter(_) => SplitErrorClass::InvalidArgument,
            Self::Codec(_) => SplitErrorClass::Unsupported,
            Self::Store(_) => SplitErrorClass::StoreUnavailable,
            Self::Invariant { .. } => SplitErrorClass::Invariant,
        }
    }
}

///
/// QueryPartitioner
///
/// Splits one query into at most `shard_count` contiguous sub-queries
/// over an explicit store handle. The store is probed only when the
/// filter leaves an endpoint of the range open.
///

pub struct QueryPartitioner<S> {
    store: S,
    trace: Option<&'static dyn SplitTraceSink>,
}

impl<S: StoreProbe> QueryPartitioner<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store, trace: None }
    }

    /// Attach a trace sink. Tracing never changes partitioning output.
    #[must_use]
    pub const fn with_trace(mut self, sink: &'static dyn SplitTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Split `query` into at most `shard_count` sub-queries.
    ///
    /// The split property is the one carrying the query's range operators;
    /// a query without any falls back to its primary sort property with
    /// both endpoints discovered from the store. Sub-queries keep every
    /// other predicate, the namespace, and the sort order, and their
    /// outermost comparison operators match the original query's, so
    /// running all of them scans each matching row exactly once.
    ///
    /// Fewer than `shard_count` sub-queries come back when the range
    /// holds fewer distinct boundaries; an empty store side yields none.
    pub fn split_query(
        &self,
        query: &Query,
        shard_count: u32,
    ) -> Result<Vec<Query>, PartitionError> {
        if shard_count == 0 {
            return Err(PartitionError::InvalidShardCount);
        }

        let extraction = match extract_range(query.filter.as_ref())? {
            Some(extraction) => extraction,
            None => sort_fallback(query).ok_or(PartitionError::NoRangeProperty)?,
        };

        let scope = SplitScope::start(self.trace, query, &extraction.property, shard_count);

        match self.split_extracted(query, extraction, shard_count, scope.as_ref()) {
            Ok((shards, boundaries)) => {
                if let Some(scope) = scope {
                    scope.finish(
                        u32::try_from(boundaries).unwrap_or(u32::MAX),
                        u32::try_from(shards.len()).unwrap_or(u32::MAX),
                    );
                }
                Ok(shards)
            }
            Err(err) => {
                if let Some(scope) = scope {
                    scope.error(err.class());
                }
                Err(err)
            }
        }
    }

    fn split_extracted(
        &self,
        query: &Query,
        extraction: RangeExtraction,
        shard_count: u32,
        scope: Option<&SplitScope>,
    ) -> Result<(Vec<Query>, usize), PartitionError> {
        let RangeExtraction {
            property,
            range,
            remainder,
        } = extraction;

        // Original edge operators survive on the outermost shards; probed
        // bounds attach inclusively so the discovered extremes stay covered.
        let lower_op = match &range.lower {
            Bound::Excluded(_) => CompareOp::Gt,
            Bound::Included(_) | Bound::Unbounded => CompareOp::Gte,
        };
        let upper_op = match &range.upper {
            Bound::Excluded(_) => CompareOp::Lt,
            Bound::Included(_) | Bound::Unbounded => CompareOp::Lte,
        };

        let lower = match range.lower_value().cloned() {
            Some(value) => Some(value),
            None => resolve_bound(&self.store, query, &property, SortDirection::Asc, scope)?,
        };
        let Some(lower) = lower else {
            return Ok((Vec::new(), 0));
        };

        let upper = match range.upper_value().cloned() {
            Some(value) => Some(value),
            None => resolve_bound(&self.store, query, &property, SortDirection::Desc, scope)?,
        };
        let Some(upper) = upper else {
            return Ok((Vec::new(), 0));
        };

        if lower.kind() != upper.kind() {
            return Err(RangeFilterError::MixedKinds {
                property,
                left: lower.kind(),
                right: upper.kind(),
            }
            .into());
        }

        let lower_unit = codec::encode(&lower)?;
        let upper_unit = codec::encode(&upper)?;

        if lower_unit.unit > upper_unit.unit {
            return Err(PartitionError::InvertedRange {
                property,
                lower,
                upper,
            });
        }

        // Both split failure modes were ruled out above, so an error here
        // is a broken construction rule rather than caller input.
        let boundaries = split_range(lower_unit.unit, upper_unit.unit, shard_count)
            .map_err(|err| PartitionError::Invariant {
                message: err.to_string(),
            })?;

        let shards = build_shards(
            query,
            &property,
            &remainder,
            &boundaries,
            lower_unit.kind,
            lower_op,
            upper_op,
        )?;

        Ok((shards, boundaries.len()))
    }
}

/// A sort-only query shards on its primary sort property, with both
/// endpoints discovered from the store and every predicate carried.
fn sort_fallback(query: &Query) -> Option<RangeExtraction> {
    let first = query.order.first()?;
    let remainder = query
        .filter
        .as_ref()
        .map(|filter| filter.leaves().into_iter().cloned().collect())
        .unwrap_or_default();

    Some(RangeExtraction {
        property: first.property.clone(),
        range: PropertyRange::default(),
        remainder,
    })
}

fn build_shards(
    base: &Query,
    property: &str,
    remainder: &[FilterPredicate],
    boundaries: &[i64],
    kind: ValueKind,
    lower_op: CompareOp,
    upper_op: CompareOp,
) -> Result<Vec<Query>, PartitionError> {
    let decode_point = |unit: i64| {
        codec::decode(kind, unit).map_err(|err| PartitionError::Invariant {
            message: format!("boundary {unit} failed to decode: {err}"),
        })
    };

    if let [point] = boundaries {
        // Collapsed range: one shard pinned to the single point, keeping
        // both original edge operators.
        let point = decode_point(*point)?;
        return Ok(vec![shard_query(
            base,
            property,
            remainder,
            (lower_op, point.clone()),
            (upper_op, point),
        )]);
    }

    let mut shards = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for (i, pair) in boundaries.windows(2).enumerate() {
        let lower = decode_point(pair[0])?;
        let upper = decode_point(pair[1])?;
        let lower_op = if i == 0 { lower_op } else { CompareOp::Gte };
        let upper_op = if i == boundaries.len() - 2 {
            upper_op
        } else {
            CompareOp::Lt
        };
        shards.push(shard_query(
            base,
            property,
            remainder,
            (lower_op, lower),
            (upper_op, upper),
        ));
    }

    Ok(shards)
}

fn shard_query(
    base: &Query,
    property: &str,
    remainder: &[FilterPredicate],
    lower: (CompareOp, PropertyValue),
    upper: (CompareOp, PropertyValue),
) -> Query {
    let mut leaves = remainder.to_vec();
    leaves.push(FilterPredicate::new(property, lower.0, lower.1));
    leaves.push(FilterPredicate::new(property, upper.0, upper.1));

    Query {
        kind: base.kind.clone(),
        namespace: base.namespace.clone(),
        filter: Filter::from_leaves(leaves),
        order: base.order.clone(),
    }
}
