//! Read-only lookup structure over the frozen entity set.
//!
//! All resolvers share one [`EntityIndex`]. It borrows the entities and
//! never mutates them, so the resolution phase can fan out across
//! threads freely.

use rustc_hash::FxHashMap;

use crate::base::{
    EntityKind, ReceiverScope, SEPARATOR, SymbolId, is_absolute, qualify,
};
use crate::normalize::Entity;

/// Fqname- and name-keyed lookups for resolution.
pub struct EntityIndex<'a> {
    by_id: FxHashMap<SymbolId, &'a Entity>,
    classes_by_fqname: FxHashMap<&'a str, SymbolId>,
    modules_by_fqname: FxHashMap<&'a str, SymbolId>,
    /// Owner fqname -> method ids, sorted for deterministic picks.
    methods_by_owner: FxHashMap<&'a str, Vec<SymbolId>>,
    /// Simple method name -> method ids, sorted. Fuel for the
    /// last-resort text heuristic.
    methods_by_name: FxHashMap<&'a str, Vec<SymbolId>>,
}

impl<'a> EntityIndex<'a> {
    pub fn build(entities: impl IntoIterator<Item = &'a Entity>) -> Self {
        let mut index = EntityIndex {
            by_id: FxHashMap::default(),
            classes_by_fqname: FxHashMap::default(),
            modules_by_fqname: FxHashMap::default(),
            methods_by_owner: FxHashMap::default(),
            methods_by_name: FxHashMap::default(),
        };
        for entity in entities {
            index.by_id.insert(entity.symbol_id(), entity);
            match entity {
                Entity::Class(class) => {
                    index
                        .classes_by_fqname
                        .insert(class.fqname.as_str(), class.symbol_id);
                }
                Entity::Module(module) => {
                    index
                        .modules_by_fqname
                        .insert(module.fqname.as_str(), module.symbol_id);
                }
                Entity::Method(method) => {
                    index
                        .methods_by_owner
                        .entry(method.owner.as_str())
                        .or_default()
                        .push(method.symbol_id);
                    index
                        .methods_by_name
                        .entry(method.name.as_str())
                        .or_default()
                        .push(method.symbol_id);
                }
            }
        }
        for ids in index.methods_by_owner.values_mut() {
            ids.sort_unstable();
        }
        for ids in index.methods_by_name.values_mut() {
            ids.sort_unstable();
        }
        index
    }

    pub fn entity(&self, id: SymbolId) -> Option<&'a Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn fqname_of(&self, id: SymbolId) -> Option<&'a str> {
        self.entity(id).map(Entity::fqname)
    }

    pub fn class_at(&self, fqname: &str) -> Option<SymbolId> {
        self.classes_by_fqname.get(fqname).copied()
    }

    pub fn module_at(&self, fqname: &str) -> Option<SymbolId> {
        self.modules_by_fqname.get(fqname).copied()
    }

    /// A type at an exact fqname, classes shadowing modules.
    pub fn type_at(&self, fqname: &str) -> Option<SymbolId> {
        self.class_at(fqname).or_else(|| self.module_at(fqname))
    }

    /// The method `name` defined directly on `owner` with the given
    /// receiver scope. When several arities were observed, the smallest
    /// id wins, deterministically.
    pub fn method_on(
        &self,
        owner: &str,
        name: &str,
        scope: ReceiverScope,
    ) -> Option<SymbolId> {
        self.methods_by_owner.get(owner).and_then(|ids| {
            ids.iter()
                .copied()
                .find(|id| match self.entity(*id) {
                    Some(Entity::Method(method)) => {
                        method.name == name && method.receiver_scope == scope
                    }
                    _ => false,
                })
        })
    }

    /// All method ids sharing a simple name, sorted.
    pub fn methods_named(&self, name: &str) -> &[SymbolId] {
        self.methods_by_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a type reference as written, walking outward through the
    /// enclosing namespaces: the innermost scope that defines the name
    /// wins, then top level. Absolute references skip the walk.
    pub fn resolve_type_outward(&self, name: &str, enclosing: &str) -> Option<SymbolId> {
        self.resolve_outward(name, enclosing, |fqname| self.type_at(fqname))
    }

    /// As [`Self::resolve_type_outward`], restricted to modules. Mixin
    /// targets must be modules.
    pub fn resolve_module_outward(&self, name: &str, enclosing: &str) -> Option<SymbolId> {
        self.resolve_outward(name, enclosing, |fqname| self.module_at(fqname))
    }

    /// As [`Self::resolve_type_outward`], restricted to classes.
    pub fn resolve_class_outward(&self, name: &str, enclosing: &str) -> Option<SymbolId> {
        self.resolve_outward(name, enclosing, |fqname| self.class_at(fqname))
    }

    fn resolve_outward(
        &self,
        name: &str,
        enclosing: &str,
        probe: impl Fn(&str) -> Option<SymbolId>,
    ) -> Option<SymbolId> {
        if is_absolute(name) {
            return probe(name.trim_start_matches(SEPARATOR));
        }
        let mut scope = enclosing;
        loop {
            if let Some(id) = probe(&qualify(scope, name)) {
                return Some(id);
            }
            match scope.rsplit_once(SEPARATOR) {
                Some((outer, _)) => scope = outer,
                None if !scope.is_empty() => scope = "",
                None => return None,
            }
        }
    }

    /// Whether an owner type defines a constant with this name.
    pub fn owns_constant(&self, owner: &str, constant: &str) -> bool {
        let constants = match self.type_at(owner).and_then(|id| self.entity(id)) {
            Some(Entity::Class(class)) => &class.constants,
            Some(Entity::Module(module)) => &module.constants,
            _ => return false,
        };
        constants.binary_search(&smol_str::SmolStr::from(constant)).is_ok()
    }

    /// All methods that carry an alias marker, in id order.
    pub fn aliased_methods(&self) -> Vec<&'a crate::normalize::MethodEntity> {
        let mut aliases: Vec<_> = self
            .by_id
            .values()
            .filter_map(|entity| entity.as_method())
            .filter(|method| method.aliased_from.is_some())
            .collect();
        aliases.sort_by_key(|method| method.symbol_id);
        aliases
    }

    /// Frozen types (classes and modules), in id order. Used by the
    /// session to drive per-type resolution.
    pub fn types(&self) -> Vec<&'a Entity> {
        let mut types: Vec<_> = self
            .by_id
            .values()
            .copied()
            .filter(|entity| entity.kind() != EntityKind::Method)
            .collect();
        types.sort_by_key(|entity| entity.symbol_id());
        types
    }
}
