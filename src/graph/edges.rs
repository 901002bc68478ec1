//! Edge types carried by the symbol graph.

use crate::base::{CallEdgeKind, GraphKind, SymbolId};

/// A resolved call edge between two methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CallEdge {
    pub from: SymbolId,
    pub to: SymbolId,
    pub kind: CallEdgeKind,
}

impl CallEdge {
    pub fn new(from: SymbolId, to: SymbolId, kind: CallEdgeKind) -> Self {
        Self { from, to, kind }
    }
}

/// An edge whose target never resolved to a known entity. The
/// referencing entity is kept; the edge is reported, not dropped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct UnresolvedEdge {
    pub graph: GraphKind,
    pub from: SymbolId,
    /// The target as written at the reference site.
    pub target: String,
    /// Call classification, when the edge came from a call site.
    pub kind: Option<CallEdgeKind>,
}

impl UnresolvedEdge {
    pub fn new(graph: GraphKind, from: SymbolId, target: impl Into<String>) -> Self {
        Self {
            graph,
            from,
            target: target.into(),
            kind: None,
        }
    }

    pub fn call(from: SymbolId, target: impl Into<String>, kind: CallEdgeKind) -> Self {
        Self {
            graph: GraphKind::Call,
            from,
            target: target.into(),
            kind: Some(kind),
        }
    }
}

/// Everything the resolution phase hands to the graph builder.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    pub inheritance: Vec<(SymbolId, SymbolId)>,
    pub mixin: Vec<(SymbolId, SymbolId)>,
    pub calls: Vec<CallEdge>,
    pub constant_refs: Vec<(SymbolId, SymbolId)>,
    pub unresolved: Vec<UnresolvedEdge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolved_count(&self) -> usize {
        self.inheritance.len() + self.mixin.len() + self.calls.len() + self.constant_refs.len()
    }
}
