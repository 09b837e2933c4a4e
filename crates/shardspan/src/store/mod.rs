mod memory;

pub use memory::{Entity, MemoryStore};

use crate::{
    query::{Query, SortDirection},
    value::PropertyValue,
};
use thiserror::Error as ThisError;

///
/// ProbeError
///
/// Raised when the backing store cannot answer a boundary probe.
/// Probes are never retried here; retry policy belongs to the store
/// client.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("store probe failed: {message}")]
pub struct ProbeError {
    pub message: String,
}

impl ProbeError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// StoreProbe
///
/// Minimal read surface the partitioner needs from a backing store:
/// the extreme value of one property under a query, in either direction.
///

pub trait StoreProbe {
    /// Value of `property` on the first entity matching `query` when
    /// ordered by `property` in `direction`, or `None` when nothing
    /// matches. Entities without the property are ignored.
    fn probe(
        &self,
        query: &Query,
        property: &str,
        direction: SortDirection,
    ) -> Result<Option<PropertyValue>, ProbeError>;
}
