//! # Normalization & Deduplication Engine
//!
//! Converts raw symbol facts into canonical entities with stable
//! identity, then merges duplicate observations of the same entity
//! using source precedence and confidence scoring.
//!
//! Per-kind normalizers each expose `validate` (reject facts missing
//! required fields, recording a diagnostic) and `normalize`. The
//! [`deduplicate`] pass groups observations by id and merges them; the
//! mixin and constant attachment passes then augment the merged owners.

pub mod call;
pub mod class;
pub mod dedup;
mod entity;
pub mod method;
pub mod mixin;
mod provenance;

pub use call::CallDraft;
pub use dedup::deduplicate;
pub use entity::{ClassEntity, Entity, MethodEntity, MixinRef, ModuleEntity};
pub use method::arity;
pub use mixin::MixinApplication;
pub use provenance::{Provenance, confidence_for};

#[cfg(test)]
mod tests;
