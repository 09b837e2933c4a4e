mod filter;
mod range;

pub use filter::{CompareOp, Filter, FilterPredicate, eq, gt, gte, lt, lte};
pub use range::RangeFilterError;
pub(crate) use range::{PropertyRange, RangeExtraction, extract_range};

use serde::{Deserialize, Serialize};

///
/// SortDirection
///
/// Canonical traversal direction shared by sort clauses and boundary
/// probes.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

///
/// PropertyOrder
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PropertyOrder {
    pub property: String,
    pub direction: SortDirection,
}

///
/// Query
///
/// Declarative scan description: collection kind, optional namespace,
/// optional filter, and sort clauses. Sub-queries produced by the
/// partitioner are plain values of this type, ready to hand to workers.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub kind: String,
    pub namespace: Option<String>,
    pub filter: Option<Filter>,
    pub order: Vec<PropertyOrder>,
}

impl Query {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: None,
            filter: None,
            order: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Append a sort clause; earlier clauses take precedence.
    #[must_use]
    pub fn with_order(mut self, property: impl Into<String>, direction: SortDirection) -> Self {
        self.order.push(PropertyOrder {
            property: property.into(),
            direction,
        });
        self
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let query = Query::new("Payment")
            .with_namespace("tenant-a")
            .with_filter(gte("amount", 10_i64))
            .with_order("amount", SortDirection::Asc);

        assert_eq!(query.kind, "Payment");
        assert_eq!(query.namespace.as_deref(), Some("tenant-a"));
        assert!(query.filter.is_some());
        assert_eq!(query.order.len(), 1);
        assert_eq!(query.order[0].direction, SortDirection::Asc);
    }

    #[test]
    fn test_serde_roundtrip() {
        let query = Query::new("Payment")
            .with_filter(gte("amount", 10_i64).and(lt("amount", 90_i64)))
            .with_order("amount", SortDirection::Desc);

        let json = serde_json::to_string(&query).unwrap();
        let back: Query = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);
    }
}
