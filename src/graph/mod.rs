//! # Symbol Graph Index
//!
//! Assembles the frozen entity set and resolved edges into four typed
//! relationship graphs (inheritance, mixin, call, constant-reference)
//! with O(1) identity and name lookup, cycle detection, dangling
//! reference reporting, and a lazy query surface.

mod cycles;
mod edges;
mod query;
mod symbol_graph;

pub use cycles::Cycle;
pub use edges::{CallEdge, EdgeSet, UnresolvedEdge};
pub use query::QueryFilter;
pub use symbol_graph::SymbolGraph;
