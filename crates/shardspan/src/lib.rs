//! Shardspan: deterministic partitioning of range-filtered datastore queries
//! into contiguous, non-overlapping sub-queries for parallel scans.
#![warn(unreachable_pub)]

pub mod partition;
pub mod query;
pub mod split;
pub mod store;
pub mod trace;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        query::{CompareOp, Filter, FilterPredicate, PropertyOrder, Query, SortDirection},
        types::{Rating, Timestamp},
        value::{PropertyValue, ValueKind},
    };
}
