//! # symatlas
//!
//! Core library for canonical symbol modeling: reconciles heterogeneous
//! raw symbol facts (parsed source, runtime reflection, formal
//! signatures, type-checker annotations, structured docs) into one
//! deduplicated symbol graph with traceable confidence and provenance.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! session     → run driver: ingest → normalize → dedup → resolve → build
//!   ↓
//! resolve     → namespace, ancestor chains, MRO, cross-references
//!   ↓
//! graph       → typed graphs, lookup indices, cycles, queries
//!   ↓
//! normalize   → per-kind normalizers, provenance, dedup/merge
//!   ↓
//! facts       → raw fact model, origins, batches
//!   ↓
//! base        → identity, locations, namespace paths, relations
//! diagnostics → diagnostic taxonomy (leaf, usable everywhere)
//! ```
//!
//! A typical run:
//!
//! ```
//! use symatlas::facts::{FactBatch, Origin, RawSymbolFact};
//! use symatlas::session::NormalizationSession;
//!
//! let mut batch = FactBatch::for_source("models/user.src");
//! batch.push(RawSymbolFact::class("User", None, Origin::StaticParse).with_superclass("Base"));
//! batch.push(RawSymbolFact::class("Base", None, Origin::StaticParse));
//!
//! let mut session = NormalizationSession::new();
//! session.ingest(batch);
//! let result = session.finish();
//! assert_eq!(result.graph().lookup_by_name("User").len(), 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → facts → normalize → graph → resolve →
// session)
// ============================================================================

/// Foundation types: identity, locations, namespace paths, relations
pub mod base;

/// Diagnostic taxonomy and adapter-facing error types
pub mod diagnostics;

/// Raw symbol facts: the input vocabulary
pub mod facts;

/// Symbol graph index: typed graphs, lookups, cycles, queries
pub mod graph;

/// Normalization and deduplication engine
pub mod normalize;

/// Resolvers: namespaces, inheritance, MRO, cross-references
pub mod resolve;

/// Run driver and frozen run result
pub mod session;

// Re-export the types most callers touch
pub use base::{CallEdgeKind, EntityKind, GraphKind, ReceiverScope, SourceLocation, SymbolId};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use facts::{FactBatch, Origin, RawSymbolFact};
pub use graph::{QueryFilter, SymbolGraph};
pub use normalize::Entity;
pub use session::{NormalizationSession, RunResult, SCHEMA_VERSION};
