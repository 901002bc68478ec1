//! Lazy, restartable queries over the frozen entity set.

use crate::base::EntityKind;
use crate::facts::Visibility;
use crate::graph::SymbolGraph;
use crate::normalize::Entity;

/// A composable entity predicate.
///
/// All set filters must match. The name filter is a case-insensitive
/// substring match on the simple name; the namespace filter matches
/// entities nested anywhere under the given namespace.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    name_contains: Option<String>,
    kind: Option<EntityKind>,
    visibility: Option<Visibility>,
    namespace: Option<String>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into().to_lowercase());
        self
    }

    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Only methods carry visibility; setting this filter excludes
    /// classes and modules.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(kind) = self.kind {
            if entity.kind() != kind {
                return false;
            }
        }
        if let Some(visibility) = self.visibility {
            if entity.visibility() != Some(visibility) {
                return false;
            }
        }
        if let Some(fragment) = &self.name_contains {
            if !entity.name().to_lowercase().contains(fragment.as_str()) {
                return false;
            }
        }
        if let Some(namespace) = &self.namespace {
            if !crate::base::is_nested_within(entity.fqname(), namespace) {
                return false;
            }
        }
        true
    }
}

impl SymbolGraph {
    /// Lazily iterate entities matching the filter, in id order.
    ///
    /// The iterator borrows the graph and the filter; calling `query`
    /// again restarts from the beginning with no side effects.
    pub fn query<'a>(&'a self, filter: &'a QueryFilter) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities().filter(move |entity| filter.matches(entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Origin, RawParam, RawSymbolFact};
    use crate::graph::EdgeSet;
    use crate::normalize;

    fn sample_graph() -> SymbolGraph {
        let at = chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let entities = vec![
            normalize::class::normalize(
                &RawSymbolFact::class("User", Some("App"), Origin::StaticParse),
                at,
            ),
            normalize::class::normalize(
                &RawSymbolFact::class("UserGroup", Some("App"), Origin::StaticParse),
                at,
            ),
            normalize::class::normalize(
                &RawSymbolFact::module("Auditable", Some("App"), Origin::StaticParse),
                at,
            ),
            normalize::method::normalize(
                &RawSymbolFact::method(
                    "save",
                    Some("App.User"),
                    vec![RawParam::required("record")],
                    Origin::StaticParse,
                )
                .with_visibility(Visibility::Private),
                at,
            ),
        ];
        SymbolGraph::build(entities, EdgeSet::new())
    }

    #[test]
    fn test_name_substring_is_case_insensitive() {
        let graph = sample_graph();
        let filter = QueryFilter::new().name_contains("user");
        assert_eq!(graph.query(&filter).count(), 2);
    }

    #[test]
    fn test_kind_filter() {
        let graph = sample_graph();
        let filter = QueryFilter::new().kind(EntityKind::Module);
        let found: Vec<_> = graph.query(&filter).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Auditable");
    }

    #[test]
    fn test_visibility_filter_excludes_types() {
        let graph = sample_graph();
        let filter = QueryFilter::new().visibility(Visibility::Private);
        let found: Vec<_> = graph.query(&filter).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "save");
    }

    #[test]
    fn test_namespace_filter() {
        let graph = sample_graph();
        let filter = QueryFilter::new().in_namespace("App.User");
        let found: Vec<_> = graph.query(&filter).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "save");
    }

    #[test]
    fn test_query_is_restartable() {
        let graph = sample_graph();
        let filter = QueryFilter::new().name_contains("user");
        let first: Vec<_> = graph.query(&filter).map(|e| e.symbol_id()).collect();
        let second: Vec<_> = graph.query(&filter).map(|e| e.symbol_id()).collect();
        assert_eq!(first, second);
    }
}
