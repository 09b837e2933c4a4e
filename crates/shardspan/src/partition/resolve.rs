use crate::{
    query::{Query, SortDirection},
    store::{ProbeError, StoreProbe},
    trace::SplitScope,
    value::PropertyValue,
};

/// Discover the extreme stored value of `property` for one open side.
///
/// The probe runs the caller's own query, so a discovered bound is
/// consistent with what the shards will scan; only the ordering and the
/// limit-1 contract come from the store. `Asc` finds the smallest stored
/// value, `Desc` the largest.
pub(crate) fn resolve_bound<S: StoreProbe>(
    store: &S,
    query: &Query,
    property: &str,
    direction: SortDirection,
    scope: Option<&SplitScope>,
) -> Result<Option<PropertyValue>, ProbeError> {
    let found = store.probe(query, property, direction)?;
    if let Some(scope) = scope {
        scope.bound_resolved(direction, found.is_some());
    }

    Ok(found)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::gte,
        store::{Entity, MemoryStore},
    };

    #[test]
    fn test_resolves_the_smallest_value_matching_the_query() {
        let mut store = MemoryStore::new();
        for id in [5_i64, 20, 80] {
            store.insert(Entity::new("Payment").with_property("id", id));
        }
        let query = Query::new("Payment").with_filter(gte("id", 10_i64));

        let found = resolve_bound(&store, &query, "id", SortDirection::Asc, None).unwrap();

        // 5 fails the query's own filter, so it can never be a bound.
        assert_eq!(found, Some(PropertyValue::Int64(20)));
    }

    #[test]
    fn test_resolves_none_when_nothing_matches() {
        let store = MemoryStore::new();
        let query = Query::new("Payment").with_filter(gte("id", 10_i64));

        let found = resolve_bound(&store, &query, "id", SortDirection::Desc, None).unwrap();
        assert_eq!(found, None);
    }
}
