//! Raw symbol facts: the input vocabulary of the pipeline.
//!
//! An extraction adapter (AST walker, runtime inspector, signature
//! reader) emits [`RawSymbolFact`] records batched per source file. Facts
//! are unvalidated, may overlap, and may contradict each other; the
//! normalization engine is responsible for reconciling them. Facts are
//! immutable once emitted and consumed exactly once per run.

mod batch;
mod origin;
mod raw;

pub use batch::{ExtractionError, FactBatch};
pub use origin::Origin;
pub use raw::{
    AccessMode, FactKind, FactPayload, MixinKind, ParamKind, RawParam, RawSymbolFact, Visibility,
};
