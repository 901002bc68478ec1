//! The assembled, read-only symbol graph.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::{GraphKind, SymbolId};
use crate::graph::edges::{CallEdge, EdgeSet, UnresolvedEdge};
use crate::normalize::Entity;

/// Forward and reverse adjacency for one typed graph.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    forward: FxHashMap<SymbolId, Vec<SymbolId>>,
    reverse: FxHashMap<SymbolId, Vec<SymbolId>>,
}

impl Adjacency {
    fn insert(&mut self, from: SymbolId, to: SymbolId) {
        self.forward.entry(from).or_default().push(to);
        self.reverse.entry(to).or_default().push(from);
    }
}

/// Four typed directed graphs over the frozen entity set, with O(1)
/// lookup by id and by simple name.
///
/// Built once per normalization run and immutable to downstream
/// readers; a new run rebuilds the whole graph rather than mutating
/// this one.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    /// Frozen entities in `symbol_id` order.
    entities: IndexMap<SymbolId, Entity>,
    /// Simple name -> ids; multi-valued across namespaces.
    by_name: FxHashMap<SmolStr, Vec<SymbolId>>,
    graphs: [Adjacency; 4],
    call_edges: Vec<CallEdge>,
    unresolved: Vec<UnresolvedEdge>,
}

fn graph_slot(kind: GraphKind) -> usize {
    match kind {
        GraphKind::Inheritance => 0,
        GraphKind::Mixin => 1,
        GraphKind::Call => 2,
        GraphKind::ConstantRef => 3,
    }
}

impl SymbolGraph {
    /// Assemble the graph from the frozen entity set and the resolved
    /// edge set.
    ///
    /// Edges whose target id is absent from the entity set are demoted
    /// to dangling references here, regardless of how they slipped past
    /// resolution.
    pub fn build(entities: Vec<Entity>, edges: EdgeSet) -> SymbolGraph {
        let mut graph = SymbolGraph::default();

        let mut sorted = entities;
        sorted.sort_by_key(Entity::symbol_id);
        for entity in sorted {
            graph
                .by_name
                .entry(entity.name().clone())
                .or_default()
                .push(entity.symbol_id());
            graph.entities.insert(entity.symbol_id(), entity);
        }

        let EdgeSet {
            inheritance,
            mixin,
            calls,
            constant_refs,
            unresolved,
        } = edges;
        graph.unresolved = unresolved;

        for (kind, pairs) in [
            (GraphKind::Inheritance, inheritance),
            (GraphKind::Mixin, mixin),
            (GraphKind::ConstantRef, constant_refs),
        ] {
            for (from, to) in pairs {
                graph.insert_checked(kind, from, to, None);
            }
        }
        for edge in calls {
            if graph.insert_checked(GraphKind::Call, edge.from, edge.to, Some(edge.kind)) {
                graph.call_edges.push(edge);
            }
        }
        graph.unresolved.sort();
        graph.unresolved.dedup();

        debug!(
            "[GRAPH] built: {} entities, {} call edges, {} dangling",
            graph.entities.len(),
            graph.call_edges.len(),
            graph.unresolved.len()
        );
        graph
    }

    /// Insert an edge if both endpoints exist; demote target misses to
    /// dangling references. Returns whether the edge was kept.
    fn insert_checked(
        &mut self,
        kind: GraphKind,
        from: SymbolId,
        to: SymbolId,
        call_kind: Option<crate::base::CallEdgeKind>,
    ) -> bool {
        if !self.entities.contains_key(&from) {
            debug!("[GRAPH] dropped {} edge from unknown {from}", kind.as_str());
            return false;
        }
        if !self.entities.contains_key(&to) {
            self.unresolved.push(UnresolvedEdge {
                graph: kind,
                from,
                target: to.to_string(),
                kind: call_kind,
            });
            return false;
        }
        self.graphs[graph_slot(kind)].insert(from, to);
        true
    }

    /// O(1) lookup by id.
    pub fn lookup_by_id(&self, id: SymbolId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// O(1) amortized lookup by simple name; multiple entities may share
    /// a name across namespaces.
    pub fn lookup_by_name(&self, name: &str) -> Vec<&Entity> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    /// All frozen entities, in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Outgoing neighbors in one typed graph.
    pub fn neighbors(&self, kind: GraphKind, id: SymbolId) -> &[SymbolId] {
        self.graphs[graph_slot(kind)]
            .forward
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Incoming neighbors in one typed graph (reverse lookup: who
    /// inherits from / includes / calls / references this entity).
    pub fn dependents(&self, kind: GraphKind, id: SymbolId) -> &[SymbolId] {
        self.graphs[graph_slot(kind)]
            .reverse
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn call_edges(&self) -> &[CallEdge] {
        &self.call_edges
    }

    /// Edges whose target could not be matched to any frozen entity.
    pub fn dangling_references(&self) -> &[UnresolvedEdge] {
        &self.unresolved
    }

    pub fn edge_count(&self, kind: GraphKind) -> usize {
        self.graphs[graph_slot(kind)]
            .forward
            .values()
            .map(Vec::len)
            .sum()
    }
}
