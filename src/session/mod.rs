//! # Normalization session
//!
//! A [`NormalizationSession`] is the caller-owned driver for one run:
//! ingest fact batches in any order, then [`finish`] to normalize,
//! deduplicate, resolve, and build the frozen graph. There is no
//! process-wide index; a fresh session per run guarantees nothing leaks
//! across runs.
//!
//! [`finish`]: NormalizationSession::finish

mod run;

pub use run::{RunResult, RunStats, SCHEMA_VERSION};

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::base::{GraphKind, SymbolId};
use crate::diagnostics::Diagnostic;
use crate::facts::{ExtractionError, FactBatch, FactKind, RawSymbolFact};
use crate::graph::{EdgeSet, SymbolGraph, UnresolvedEdge};
use crate::normalize::{
    self, CallDraft, ClassEntity, Entity, MixinApplication, deduplicate,
};
use crate::resolve::{
    CrossReferenceResolver, EntityIndex, InheritanceResolver, MroResolver, XrefOutcome,
};

/// Accumulates raw facts for one normalization run.
///
/// Extraction may produce batches from a worker-per-file pool; the
/// session accepts them in any arrival order and makes the run
/// deterministic by canonically ordering facts before normalization.
#[derive(Debug, Default)]
pub struct NormalizationSession {
    facts: Vec<RawSymbolFact>,
    extraction_errors: Vec<ExtractionError>,
}

impl NormalizationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one extraction batch.
    pub fn ingest(&mut self, batch: FactBatch) {
        self.facts.extend(batch.facts);
        self.extraction_errors.extend(batch.errors);
    }

    /// Absorb a single fact outside any batch.
    pub fn ingest_fact(&mut self, fact: RawSymbolFact) {
        self.facts.push(fact);
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    /// Run the pipeline: validate, normalize, deduplicate, attach,
    /// resolve, and build the graph. Consumes the session; entities are
    /// frozen from here on.
    pub fn finish(mut self) -> RunResult {
        let now = Utc::now();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut stats = RunStats {
            facts_seen: self.facts.len(),
            ..RunStats::default()
        };

        // Canonical fact order: merge results must not depend on how
        // parallel extraction interleaved its batches.
        self.facts.sort();

        let mut observations: Vec<Entity> = Vec::new();
        let mut mixin_applications: Vec<MixinApplication> = Vec::new();
        let mut constant_facts: Vec<RawSymbolFact> = Vec::new();
        let mut drafts: Vec<CallDraft> = Vec::new();

        for fact in &self.facts {
            let validation = match fact.kind {
                FactKind::Class | FactKind::Module | FactKind::Constant => {
                    normalize::class::validate(fact)
                }
                FactKind::Method | FactKind::Attribute | FactKind::Alias => {
                    normalize::method::validate(fact)
                }
                FactKind::Mixin => normalize::mixin::validate(fact),
                FactKind::Call => normalize::call::validate(fact),
            };
            if let Err(diagnostic) = validation {
                warn!("[SESSION] {diagnostic}");
                diagnostics.push(diagnostic);
                stats.facts_rejected += 1;
                continue;
            }
            match fact.kind {
                FactKind::Class | FactKind::Module => {
                    observations.push(normalize::class::normalize(fact, now));
                }
                FactKind::Method => observations.push(normalize::method::normalize(fact, now)),
                FactKind::Attribute => {
                    observations.extend(normalize::method::expand_attribute(fact, now));
                }
                FactKind::Alias => {
                    observations.push(normalize::method::normalize_alias(fact, now));
                }
                FactKind::Constant => constant_facts.push(fact.clone()),
                FactKind::Mixin => mixin_applications.push(normalize::mixin::normalize(fact)),
                FactKind::Call => drafts.push(normalize::call::normalize(fact)),
            }
        }
        stats.observations = observations.len();
        debug!(
            "[SESSION] {} facts -> {} observations ({} rejected)",
            stats.facts_seen, stats.observations, stats.facts_rejected
        );

        // Deduplicate independently per entity kind.
        let mut classes = Vec::new();
        let mut modules = Vec::new();
        let mut methods = Vec::new();
        for observation in observations {
            match &observation {
                Entity::Class(_) => classes.push(observation),
                Entity::Module(_) => modules.push(observation),
                Entity::Method(_) => methods.push(observation),
            }
        }
        let mut entity_map: IndexMap<SymbolId, Entity> = IndexMap::new();
        for merged in deduplicate(classes, now)
            .into_iter()
            .chain(deduplicate(modules, now))
            .chain(deduplicate(methods, now))
        {
            entity_map.insert(merged.symbol_id(), merged);
        }

        // Attach mixins and constants to their (possibly implicit)
        // owners, then freeze.
        normalize::mixin::apply_all(&mut entity_map, mixin_applications, now);
        for fact in &constant_facts {
            if let Some(diagnostic) = normalize::class::apply_constant(&mut entity_map, fact, now)
            {
                diagnostics.push(diagnostic);
            }
        }
        entity_map.sort_unstable_keys();
        let entities: Vec<Entity> = entity_map.into_values().collect();
        stats.entities = entities.len();

        // Resolution is read-only over the frozen set.
        drafts.sort();
        let (edges, mut resolution_diagnostics) = resolve_edges(&entities, &drafts);
        diagnostics.append(&mut resolution_diagnostics);

        let graph = SymbolGraph::build(entities, edges);
        stats.resolved_edges = GraphKind::ALL
            .iter()
            .map(|kind| graph.edge_count(*kind))
            .sum();

        // Module dependency cycles (mutual includes) surface from the
        // built mixin graph; inheritance cycles were already recorded
        // by the chain walk.
        for cycle in graph.find_cycles(GraphKind::Mixin) {
            diagnostics.push(cycle_diagnostic(&graph, "mixin", &cycle.nodes));
        }
        stats.dangling_edges = graph.dangling_references().len();

        RunResult::new(
            graph,
            diagnostics,
            self.extraction_errors,
            stats,
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

fn cycle_diagnostic(graph: &SymbolGraph, graph_name: &str, nodes: &[SymbolId]) -> Diagnostic {
    let path: Vec<String> = nodes
        .iter()
        .map(|id| {
            graph
                .lookup_by_id(*id)
                .map(|entity| entity.fqname().to_string())
                .unwrap_or_else(|| id.to_string())
        })
        .collect();
    Diagnostic::structural_cycle(graph_name, &path)
}

/// Smallest-node-first rotation, so the same cycle discovered from
/// different classes deduplicates to one report.
fn canonical_rotation(mut nodes: Vec<SymbolId>) -> Vec<SymbolId> {
    if let Some(min_pos) = nodes
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(pos, _)| pos)
    {
        nodes.rotate_left(min_pos);
    }
    nodes
}

/// Resolve every edge kind over the frozen entities. Parallel per
/// entity: no resolver mutates shared state outside its own output.
fn resolve_edges(entities: &[Entity], drafts: &[CallDraft]) -> (EdgeSet, Vec<Diagnostic>) {
    let index = EntityIndex::build(entities.iter());
    let inheritance = InheritanceResolver::new(&index);
    let mut edges = EdgeSet::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    // Superclass links and ancestor chains, fanned out per class.
    let classes: Vec<&ClassEntity> = entities.iter().filter_map(Entity::as_class).collect();
    #[allow(clippy::type_complexity)]
    let chain_results: Vec<(
        Option<(SymbolId, SymbolId)>,
        Option<UnresolvedEdge>,
        Option<Diagnostic>,
        Option<Vec<SymbolId>>,
    )> = classes
        .par_iter()
        .map(|class| {
            let mut edge = None;
            let mut unresolved = None;
            let mut warning = None;
            if let Some(superclass) = &class.superclass {
                match inheritance.resolve_superclass(class) {
                    Some(target) => edge = Some((class.symbol_id, target)),
                    None => {
                        unresolved = Some(UnresolvedEdge::new(
                            GraphKind::Inheritance,
                            class.symbol_id,
                            superclass.clone(),
                        ));
                        warning = Some(Diagnostic::resolution_warning(format!(
                            "unresolved superclass {superclass} of {}",
                            class.fqname
                        )));
                    }
                }
            }
            let cycle = inheritance.ancestors(class.symbol_id).cycle.clone();
            (edge, unresolved, warning, cycle)
        })
        .collect();

    let mut seen_cycles: FxHashSet<Vec<SymbolId>> = FxHashSet::default();
    for (edge, unresolved, warning, cycle) in chain_results {
        edges.inheritance.extend(edge);
        edges.unresolved.extend(unresolved);
        diagnostics.extend(warning);
        if let Some(cycle) = cycle {
            let canonical = canonical_rotation(cycle);
            if seen_cycles.insert(canonical.clone()) {
                let path: Vec<String> = canonical
                    .iter()
                    .map(|id| {
                        index
                            .fqname_of(*id)
                            .map(str::to_string)
                            .unwrap_or_else(|| id.to_string())
                    })
                    .collect();
                diagnostics.push(Diagnostic::structural_cycle("inheritance", &path));
            }
        }
    }

    // Mixin targets resolve to modules, outward from the owner.
    for entity in index.types() {
        for mixin in entity.mixins() {
            match index.resolve_module_outward(&mixin.target, entity.fqname()) {
                Some(target) => edges.mixin.push((entity.symbol_id(), target)),
                None => {
                    edges.unresolved.push(UnresolvedEdge::new(
                        GraphKind::Mixin,
                        entity.symbol_id(),
                        mixin.target.clone(),
                    ));
                    diagnostics.push(Diagnostic::resolution_warning(format!(
                        "unresolved mixin target {} on {}",
                        mixin.target,
                        entity.fqname()
                    )));
                }
            }
        }
    }

    // Call sites and aliases.
    let mro = MroResolver::new(&index, &inheritance);
    let resolver = CrossReferenceResolver::new(&index, &inheritance, &mro);
    for outcome in [resolver.resolve_drafts(drafts), resolver.resolve_aliases()] {
        let XrefOutcome {
            calls,
            constant_refs,
            unresolved,
            diagnostics: xref_diagnostics,
        } = outcome;
        edges.calls.extend(calls);
        edges.constant_refs.extend(constant_refs);
        edges.unresolved.extend(unresolved);
        diagnostics.extend(xref_diagnostics);
    }

    (edges, diagnostics)
}
