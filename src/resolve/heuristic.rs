//! Last-resort, text-pattern call-target matching.
//!
//! This layer is deliberately separated from the structural resolver:
//! it guesses from names alone and its output is best-effort, never a
//! correctness guarantee. It only runs for operands the structural
//! resolver could not place.

use tracing::trace;

use crate::base::SymbolId;
use crate::resolve::EntityIndex;

/// Name-based matching over the frozen method set.
pub struct TextHeuristic<'a> {
    index: &'a EntityIndex<'a>,
}

impl<'a> TextHeuristic<'a> {
    pub fn new(index: &'a EntityIndex<'a>) -> Self {
        Self { index }
    }

    /// Match a method by simple name when exactly one method in the
    /// whole codebase carries it. Ambiguous names stay unresolved
    /// rather than guessing among candidates.
    pub fn unique_method(&self, name: &str) -> Option<SymbolId> {
        match self.index.methods_named(name) {
            [only] => {
                trace!("[HEURISTIC] unique name match for '{name}'");
                Some(*only)
            }
            _ => None,
        }
    }
}
