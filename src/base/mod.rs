//! Foundation types for the symatlas core.
//!
//! This module provides fundamental types used throughout the pipeline:
//! - [`SymbolId`], [`EntityKind`], [`ReceiverScope`] - content-derived identity
//! - [`SourceLocation`] - file/line provenance for facts and diagnostics
//! - [`GraphKind`], [`CallEdgeKind`] - relationship vocabulary
//! - Namespace path utilities (dotted paths, depth, common prefix)
//!
//! This module has NO dependencies on other symatlas modules.

mod identity;
mod location;
mod namespace;
mod relations;

pub use identity::{
    EntityKind, ReceiverScope, SymbolId, class_id, generate_id, method_id, module_id,
};
pub use location::SourceLocation;
pub use relations::{CallEdgeKind, GraphKind};
pub use namespace::{
    SEPARATOR, common_prefix, is_absolute, is_nested_within, namespace_depth, qualify,
    resolve_name, simple_name, split_namespace,
};
