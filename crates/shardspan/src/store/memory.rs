use crate::{
    query::{CompareOp, Filter, Query, SortDirection},
    store::{ProbeError, StoreProbe},
    value::PropertyValue,
};
use std::{cmp::Ordering, collections::BTreeMap};

///
/// Entity
/// One stored record: collection kind, optional namespace, named
/// properties.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: String,
    pub namespace: Option<String>,
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Entity {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: None,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Whether this entity would be returned by `query`.
    #[must_use]
    pub fn matches(&self, query: &Query) -> bool {
        if self.kind != query.kind || self.namespace != query.namespace {
            return false;
        }

        query
            .filter
            .as_ref()
            .is_none_or(|filter| self.satisfies(filter))
    }

    fn satisfies(&self, filter: &Filter) -> bool {
        match filter {
            Filter::Compare(predicate) => {
                let Some(value) = self.properties.get(&predicate.property) else {
                    return false;
                };
                // Cross-kind values never order, so the predicate fails.
                let Some(ordering) = value.partial_cmp(&predicate.value) else {
                    return false;
                };
                match predicate.op {
                    CompareOp::Eq => ordering == Ordering::Equal,
                    CompareOp::Lt => ordering == Ordering::Less,
                    CompareOp::Lte => ordering != Ordering::Greater,
                    CompareOp::Gt => ordering == Ordering::Greater,
                    CompareOp::Gte => ordering != Ordering::Less,
                }
            }
            Filter::And(children) => children.iter().all(|child| self.satisfies(child)),
        }
    }
}

///
/// MemoryStore
///
/// In-memory store used by tests and as the reference probe
/// implementation. Probing walks every entity; fine at test scale.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entities: Vec<Entity>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl StoreProbe for MemoryStore {
    fn probe(
        &self,
        query: &Query,
        property: &str,
        direction: SortDirection,
    ) -> Result<Option<PropertyValue>, ProbeError> {
        let mut extreme: Option<&PropertyValue> = None;

        for entity in &self.entities {
            if !entity.matches(query) {
                continue;
            }
            let Some(value) = entity.property(property) else {
                continue;
            };

            let better = match extreme {
                None => true,
                Some(current) => matches!(
                    (direction, value.partial_cmp(current)),
                    (SortDirection::Asc, Some(Ordering::Less))
                        | (SortDirection::Desc, Some(Ordering::Greater))
                ),
            };
            if better {
                extreme = Some(value);
            }
        }

        Ok(extreme.cloned())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{eq, gte};

    fn store_with_ids(ids: &[i64]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for id in ids {
            store.insert(Entity::new("Payment").with_property("id", *id));
        }
        store
    }

    #[test]
    fn test_probe_finds_extremes_in_both_directions() {
        let store = store_with_ids(&[42, 7, 99, 13]);
        let query = Query::new("Payment");

        let min = store.probe(&query, "id", SortDirection::Asc).unwrap();
        let max = store.probe(&query, "id", SortDirection::Desc).unwrap();

        assert_eq!(min, Some(PropertyValue::Int64(7)));
        assert_eq!(max, Some(PropertyValue::Int64(99)));
    }

    #[test]
    fn test_probe_respects_the_query_filter() {
        let store = store_with_ids(&[5, 20, 80]);
        let query = Query::new("Payment").with_filter(gte("id", 10_i64));

        let min = store.probe(&query, "id", SortDirection::Asc).unwrap();
        assert_eq!(min, Some(PropertyValue::Int64(20)));
    }

    #[test]
    fn test_probe_respects_kind_and_namespace() {
        let mut store = MemoryStore::new();
        store.insert(Entity::new("Payment").with_property("id", 1_i64));
        store.insert(
            Entity::new("Payment")
                .with_namespace("tenant-a")
                .with_property("id", 2_i64),
        );
        store.insert(Entity::new("Refund").with_property("id", 3_i64));

        let scoped = Query::new("Payment").with_namespace("tenant-a");
        let found = store.probe(&scoped, "id", SortDirection::Asc).unwrap();
        assert_eq!(found, Some(PropertyValue::Int64(2)));
    }

    #[test]
    fn test_probe_skips_entities_missing_the_property() {
        let mut store = store_with_ids(&[10]);
        store.insert(Entity::new("Payment").with_property("other", 1_i64));

        let found = store
            .probe(&Query::new("Payment"), "id", SortDirection::Desc)
            .unwrap();
        assert_eq!(found, Some(PropertyValue::Int64(10)));
    }

    #[test]
    fn test_probe_returns_none_when_nothing_matches() {
        let store = store_with_ids(&[1, 2]);
        let query = Query::new("Payment").with_filter(eq("status", "done"));

        let found = store.probe(&query, "id", SortDirection::Asc).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_filter_evaluation_covers_all_operators() {
        let entity = Entity::new("Payment").with_property("id", 10_i64);
        let query = |filter: Filter| Query::new("Payment").with_filter(filter);

        assert!(entity.matches(&query(eq("id", 10_i64))));
        assert!(entity.matches(&query(gte("id", 10_i64))));
        assert!(!entity.matches(&query(crate::query::gt("id", 10_i64))));
        assert!(entity.matches(&query(crate::query::lte("id", 10_i64))));
        assert!(!entity.matches(&query(crate::query::lt("id", 10_i64))));
    }

    #[test]
    fn test_cross_kind_predicate_never_matches() {
        let entity = Entity::new("Payment").with_property("id", 10_i64);
        let query = Query::new("Payment").with_filter(eq("id", 10_i32));

        assert!(!entity.matches(&query));
    }
}
