//! Cycle detection over the typed graphs.

use rustc_hash::FxHashMap;

use crate::base::{GraphKind, SymbolId};
use crate::graph::SymbolGraph;

/// One detected cycle: the ordered node list from the first revisited
/// node back around to itself (the closing edge is implied).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle {
    pub graph: GraphKind,
    pub nodes: Vec<SymbolId>,
}

impl Cycle {
    /// Canonical rotation: the same cycle always reports starting from
    /// its smallest node, so equal cycles compare equal regardless of
    /// where the walk entered them.
    pub fn canonical(mut self) -> Cycle {
        if let Some(min_pos) = self
            .nodes
            .iter()
            .enumerate()
            .min_by_key(|(_, id)| **id)
            .map(|(pos, _)| pos)
        {
            self.nodes.rotate_left(min_pos);
        }
        self
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    Gray,
    Black,
}

impl SymbolGraph {
    /// Find all cycles in one typed graph.
    ///
    /// Depth-first search with a recursion-stack path: revisiting a node
    /// that is still on the path yields the cycle from that node back to
    /// the current one. Self-loops and multi-node cycles are handled
    /// uniformly, and each cycle is reported exactly once (nodes already
    /// fully explored are never re-entered).
    pub fn find_cycles(&self, kind: GraphKind) -> Vec<Cycle> {
        let mut colors: FxHashMap<SymbolId, Color> = FxHashMap::default();
        let mut cycles = Vec::new();

        for start in self.entities().map(|entity| entity.symbol_id()) {
            if colors.contains_key(&start) {
                continue;
            }
            // Iterative DFS: (node, next neighbor index to visit).
            let mut path: Vec<(SymbolId, usize)> = vec![(start, 0)];
            colors.insert(start, Color::Gray);

            while let Some(frame) = path.last_mut() {
                let (node, cursor) = *frame;
                frame.1 += 1;
                let neighbors = self.neighbors(kind, node);
                if cursor >= neighbors.len() {
                    colors.insert(node, Color::Black);
                    path.pop();
                    continue;
                }
                let next = neighbors[cursor];
                match colors.get(&next) {
                    None => {
                        colors.insert(next, Color::Gray);
                        path.push((next, 0));
                    }
                    Some(Color::Gray) => {
                        let from = path
                            .iter()
                            .position(|&(on_path, _)| on_path == next)
                            .expect("gray node is on the path");
                        let nodes = path[from..].iter().map(|&(id, _)| id).collect();
                        cycles.push(
                            Cycle {
                                graph: kind,
                                nodes,
                            }
                            .canonical(),
                        );
                    }
                    Some(Color::Black) => {}
                }
            }
        }
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Origin, RawSymbolFact};
    use crate::graph::EdgeSet;
    use crate::normalize::{self, Entity};

    fn entity(name: &str) -> Entity {
        let at = chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        normalize::class::normalize(&RawSymbolFact::class(name, None, Origin::StaticParse), at)
    }

    fn build(names: &[&str], edges: &[(usize, usize)]) -> (SymbolGraph, Vec<crate::base::SymbolId>) {
        let entities: Vec<Entity> = names.iter().map(|name| entity(name)).collect();
        let ids: Vec<_> = entities.iter().map(Entity::symbol_id).collect();
        let mut edge_set = EdgeSet::new();
        for &(from, to) in edges {
            edge_set.inheritance.push((ids[from], ids[to]));
        }
        (SymbolGraph::build(entities, edge_set), ids)
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let (graph, _) = build(&["A", "B", "C"], &[(0, 1), (1, 2)]);
        assert!(graph.find_cycles(GraphKind::Inheritance).is_empty());
    }

    #[test]
    fn test_three_node_cycle_reported_once() {
        let (graph, ids) = build(&["A", "B", "C"], &[(0, 1), (1, 2), (2, 0)]);
        let cycles = graph.find_cycles(GraphKind::Inheritance);
        assert_eq!(cycles.len(), 1);
        let mut expected: Vec<_> = ids.clone();
        expected.sort();
        let mut found = cycles[0].nodes.clone();
        found.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_self_loop() {
        let (graph, ids) = build(&["A"], &[(0, 0)]);
        let cycles = graph.find_cycles(GraphKind::Inheritance);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].nodes, vec![ids[0]]);
    }

    #[test]
    fn test_two_disjoint_cycles() {
        let (graph, _) = build(&["A", "B", "C", "D"], &[(0, 1), (1, 0), (2, 3), (3, 2)]);
        assert_eq!(graph.find_cycles(GraphKind::Inheritance).len(), 2);
    }

    #[test]
    fn test_cycle_with_tail_excludes_tail() {
        // D -> A -> B -> A : only [A, B] is the cycle.
        let (graph, ids) = build(&["A", "B", "D"], &[(2, 0), (0, 1), (1, 0)]);
        let cycles = graph.find_cycles(GraphKind::Inheritance);
        assert_eq!(cycles.len(), 1);
        assert!(!cycles[0].nodes.contains(&ids[2]));
        assert_eq!(cycles[0].nodes.len(), 2);
    }
}
