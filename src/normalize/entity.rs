//! Canonical entities: the deduplicated symbol model.
//!
//! An [`Entity`] is a tagged union over the three canonical kinds. Every
//! resolver matches exhaustively on it; there is no loosely-typed record
//! with optional fields for every kind.

use smol_str::SmolStr;

use crate::base::{EntityKind, ReceiverScope, SymbolId};
use crate::facts::{MixinKind, RawParam, Visibility};
use crate::normalize::Provenance;

/// An ordered mixin relation attached to a class or module.
///
/// `target` is the name as written at the declaration site; it is
/// resolved to a concrete module during the resolution phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MixinRef {
    pub relation: MixinKind,
    pub target: String,
}

impl MixinRef {
    pub fn new(relation: MixinKind, target: impl Into<String>) -> Self {
        Self {
            relation,
            target: target.into(),
        }
    }

    /// Dedup key: relation plus the target with any absolute-path marker
    /// stripped, so re-observing the same inclusion is idempotent.
    pub fn dedup_key(&self) -> (MixinKind, &str) {
        (
            self.relation,
            self.target.trim_start_matches(crate::base::SEPARATOR),
        )
    }
}

/// A canonical class.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassEntity {
    pub symbol_id: SymbolId,
    pub name: SmolStr,
    pub fqname: String,
    /// Enclosing namespace path, outermost first. Does not include the
    /// entity's own name.
    pub namespace: Vec<SmolStr>,
    /// Superclass as written at the definition site, if any source
    /// observed one.
    pub superclass: Option<String>,
    /// Mixins in observation order (source order where locations allow
    /// recovering it). Order is load-bearing for method resolution.
    pub mixins: Vec<MixinRef>,
    /// Constants owned by this class, sorted and deduplicated.
    pub constants: Vec<SmolStr>,
    pub provenance: Provenance,
}

/// A canonical module.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleEntity {
    pub symbol_id: SymbolId,
    pub name: SmolStr,
    pub fqname: String,
    pub namespace: Vec<SmolStr>,
    pub mixins: Vec<MixinRef>,
    pub constants: Vec<SmolStr>,
    pub provenance: Provenance,
}

/// A canonical method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodEntity {
    pub symbol_id: SymbolId,
    pub name: SmolStr,
    /// Owner fqname plus the method name.
    pub fqname: String,
    /// The owning type's namespace path including the owner itself.
    pub namespace: Vec<SmolStr>,
    /// Fqname of the owning class or module.
    pub owner: String,
    pub receiver_scope: ReceiverScope,
    pub params: Vec<RawParam>,
    pub arity: i32,
    pub visibility: Visibility,
    /// For methods introduced by an alias declaration: the name of the
    /// method being aliased, on the same owner.
    pub aliased_from: Option<SmolStr>,
    pub provenance: Provenance,
}

/// The canonical entity sum type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum Entity {
    Class(ClassEntity),
    Module(ModuleEntity),
    Method(MethodEntity),
}

impl Entity {
    pub fn symbol_id(&self) -> SymbolId {
        match self {
            Entity::Class(class) => class.symbol_id,
            Entity::Module(module) => module.symbol_id,
            Entity::Method(method) => method.symbol_id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Class(_) => EntityKind::Class,
            Entity::Module(_) => EntityKind::Module,
            Entity::Method(_) => EntityKind::Method,
        }
    }

    /// Simple name (final path segment).
    pub fn name(&self) -> &SmolStr {
        match self {
            Entity::Class(class) => &class.name,
            Entity::Module(module) => &module.name,
            Entity::Method(method) => &method.name,
        }
    }

    pub fn fqname(&self) -> &str {
        match self {
            Entity::Class(class) => &class.fqname,
            Entity::Module(module) => &module.fqname,
            Entity::Method(method) => &method.fqname,
        }
    }

    pub fn namespace(&self) -> &[SmolStr] {
        match self {
            Entity::Class(class) => &class.namespace,
            Entity::Module(module) => &module.namespace,
            Entity::Method(method) => &method.namespace,
        }
    }

    pub fn provenance(&self) -> &Provenance {
        match self {
            Entity::Class(class) => &class.provenance,
            Entity::Module(module) => &module.provenance,
            Entity::Method(method) => &method.provenance,
        }
    }

    /// Method visibility; classes and modules have none.
    pub fn visibility(&self) -> Option<Visibility> {
        match self {
            Entity::Method(method) => Some(method.visibility),
            Entity::Class(_) | Entity::Module(_) => None,
        }
    }

    /// Mixins for types; methods have none.
    pub fn mixins(&self) -> &[MixinRef] {
        match self {
            Entity::Class(class) => &class.mixins,
            Entity::Module(module) => &module.mixins,
            Entity::Method(_) => &[],
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntity> {
        match self {
            Entity::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleEntity> {
        match self {
            Entity::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodEntity> {
        match self {
            Entity::Method(method) => Some(method),
            _ => None,
        }
    }
}
