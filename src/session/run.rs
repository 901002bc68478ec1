//! The frozen output of one normalization run.

use crate::base::GraphKind;
use crate::diagnostics::Diagnostic;
use crate::facts::ExtractionError;
use crate::graph::{CallEdge, SymbolGraph, UnresolvedEdge};
use crate::normalize::{ClassEntity, Entity, MethodEntity, ModuleEntity};

/// Version of the run-result shape, for reproducibility auditing.
pub const SCHEMA_VERSION: u32 = 1;

/// Counters describing what one run saw and produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub facts_seen: usize,
    pub facts_rejected: usize,
    /// Entity observations before deduplication.
    pub observations: usize,
    /// Canonical entities after deduplication.
    pub entities: usize,
    pub resolved_edges: usize,
    pub dangling_edges: usize,
}

/// Everything a normalization run produces, frozen. Downstream readers
/// (enrichment, emission) get shared references only; a new run builds
/// a new result rather than mutating this one.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub schema_version: u32,
    /// Crate version that produced this result.
    pub normalizer_version: String,
    /// UTC completion time, ISO-8601 with millisecond precision.
    pub normalized_at: String,
    graph: SymbolGraph,
    diagnostics: Vec<Diagnostic>,
    extraction_errors: Vec<ExtractionError>,
    stats: RunStats,
}

impl RunResult {
    pub(super) fn new(
        graph: SymbolGraph,
        diagnostics: Vec<Diagnostic>,
        extraction_errors: Vec<ExtractionError>,
        stats: RunStats,
        normalized_at: String,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            normalizer_version: env!("CARGO_PKG_VERSION").to_string(),
            normalized_at,
            graph,
            diagnostics,
            extraction_errors,
            stats,
        }
    }

    pub fn graph(&self) -> &SymbolGraph {
        &self.graph
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn extraction_errors(&self) -> &[ExtractionError] {
        &self.extraction_errors
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassEntity> {
        self.graph.entities().filter_map(Entity::as_class)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleEntity> {
        self.graph.entities().filter_map(Entity::as_module)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodEntity> {
        self.graph.entities().filter_map(Entity::as_method)
    }

    pub fn call_edges(&self) -> &[CallEdge] {
        self.graph.call_edges()
    }

    pub fn dangling_references(&self) -> &[UnresolvedEdge] {
        self.graph.dangling_references()
    }

    /// Cycles recorded as diagnostics during the run.
    pub fn cycle_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == crate::diagnostics::DiagnosticKind::StructuralCycle)
    }

    pub fn edge_count(&self, kind: GraphKind) -> usize {
        self.graph.edge_count(kind)
    }
}
