//! Content-derived symbol identity.
//!
//! Every canonical entity is addressed by a [`SymbolId`] computed from the
//! tuple `(kind, fully-qualified name, discriminant)`. The same logical
//! entity observed by different sources always hashes to the same id, and
//! the id is stable across runs and process restarts.

use std::fmt;

/// Unique identifier for a canonical entity.
///
/// A 128-bit truncation of a BLAKE3 digest over the canonical identity
/// encoding. Stable across runs: the id depends only on identity inputs,
/// never on merge order or arrival order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(pub u128);

impl SymbolId {
    /// Raw id value (for sharding and ordering).
    pub fn as_u128(self) -> u128 {
        self.0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({:032x})", self.0)
    }
}

impl fmt::Display for SymbolId {
    /// Bare 32-digit hex form used in logs and reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// The kind of a canonical entity. Part of the identity encoding, so a
/// class and a module with the same name never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    Class,
    Module,
    Method,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Module => "module",
            EntityKind::Method => "method",
        }
    }
}

/// Whether a method is looked up on instances or on the class object
/// itself. Part of the method discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum ReceiverScope {
    #[default]
    Instance,
    Class,
}

impl ReceiverScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiverScope::Instance => "instance",
            ReceiverScope::Class => "class",
        }
    }
}

// Field separator inside the identity encoding. A control byte so it can
// never occur in a symbol name.
const UNIT: [u8; 1] = [0x1f];

/// Generate a deterministic id for `(kind, fqname, discriminant)`.
///
/// Identical inputs always produce identical ids; distinct inputs never
/// collide (up to the 128-bit digest space, which is treated as
/// collision-free by contract).
pub fn generate_id(kind: EntityKind, fqname: &str, discriminant: &str) -> SymbolId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(kind.as_str().as_bytes());
    hasher.update(&UNIT);
    hasher.update(fqname.as_bytes());
    hasher.update(&UNIT);
    hasher.update(discriminant.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest.as_bytes()[..16]);
    SymbolId(u128::from_be_bytes(bytes))
}

/// Id for a class. Classes discriminate by kind alone.
pub fn class_id(fqname: &str) -> SymbolId {
    generate_id(EntityKind::Class, fqname, "")
}

/// Id for a module. Modules discriminate by kind alone.
pub fn module_id(fqname: &str) -> SymbolId {
    generate_id(EntityKind::Module, fqname, "")
}

/// Id for a method. Methods discriminate by receiver scope and arity, so
/// same-named methods with different shapes stay distinct.
pub fn method_id(fqname: &str, scope: ReceiverScope, arity: i32) -> SymbolId {
    let discriminant = format!("{}/{}", scope.as_str(), arity);
    generate_id(EntityKind::Method, fqname, &discriminant)
}
