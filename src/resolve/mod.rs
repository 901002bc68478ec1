//! # Resolvers
//!
//! Read-only resolution over the frozen entity set: namespace
//! qualification, ancestor chains, mixin-aware method resolution order,
//! and cross-reference resolution of call targets. All failures here
//! are non-fatal; they surface as dangling edges and resolution
//! warnings while the run completes.
//!
//! Resolvers borrow one shared [`EntityIndex`] and never mutate it, so
//! the session fans resolution out across threads.

mod heuristic;
mod index;
mod inheritance;
mod mro;
mod xref;

pub use heuristic::TextHeuristic;
pub use index::EntityIndex;
pub use inheritance::{ChainOutcome, InheritanceResolver};
pub use mro::{MroOutcome, MroResolver};
pub use xref::{CrossReferenceResolver, XrefOutcome};

#[cfg(test)]
mod tests;
