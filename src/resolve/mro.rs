//! Method resolution order: the effective instance-method lookup path.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::SymbolId;
use crate::facts::MixinKind;
use crate::normalize::Entity;
use crate::resolve::{EntityIndex, InheritanceResolver};

/// The computed lookup order for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MroOutcome {
    /// Type ids in lookup order: for each type along the superclass
    /// chain, its prepended modules (most recently prepended first),
    /// the type itself, then its included modules (most recently
    /// included first). First occurrence wins on repeats.
    pub order: Vec<SymbolId>,
    /// `(owner id, target text)` for mixin targets that resolved to no
    /// known module.
    pub unresolved_mixins: Vec<(SymbolId, String)>,
}

/// Computes and caches lookup orders over the frozen entity set.
pub struct MroResolver<'a> {
    index: &'a EntityIndex<'a>,
    inheritance: &'a InheritanceResolver<'a>,
    orders: RwLock<FxHashMap<SymbolId, Arc<MroOutcome>>>,
}

impl<'a> MroResolver<'a> {
    pub fn new(index: &'a EntityIndex<'a>, inheritance: &'a InheritanceResolver<'a>) -> Self {
        Self {
            index,
            inheritance,
            orders: RwLock::new(FxHashMap::default()),
        }
    }

    /// The effective instance-method lookup order for a class or
    /// module. `extend` mixins do not participate: they contribute to
    /// the class side, not instance lookup.
    pub fn resolve(&self, type_id: SymbolId) -> Arc<MroOutcome> {
        if let Some(cached) = self.orders.read().get(&type_id) {
            return Arc::clone(cached);
        }
        let outcome = Arc::new(self.compute(type_id));
        self.orders
            .write()
            .entry(type_id)
            .or_insert_with(|| Arc::clone(&outcome))
            .clone()
    }

    fn compute(&self, type_id: SymbolId) -> MroOutcome {
        let mut outcome = MroOutcome::default();

        let mut chain = vec![type_id];
        if let Some(Entity::Class(_)) = self.index.entity(type_id) {
            chain.extend(self.inheritance.ancestors(type_id).ancestors.iter().copied());
        }

        for link in chain {
            let Some(entity) = self.index.entity(link) else {
                continue;
            };
            let enclosing = entity.fqname();
            let mut push = |id: SymbolId, order: &mut Vec<SymbolId>| {
                if !order.contains(&id) {
                    order.push(id);
                }
            };

            // Prepended modules shadow the type's own methods.
            for mixin in entity
                .mixins()
                .iter()
                .rev()
                .filter(|mixin| mixin.relation == MixinKind::Prepend)
            {
                match self.index.resolve_module_outward(&mixin.target, enclosing) {
                    Some(module) => push(module, &mut outcome.order),
                    None => outcome.unresolved_mixins.push((link, mixin.target.clone())),
                }
            }
            push(link, &mut outcome.order);
            for mixin in entity
                .mixins()
                .iter()
                .rev()
                .filter(|mixin| mixin.relation == MixinKind::Include)
            {
                match self.index.resolve_module_outward(&mixin.target, enclosing) {
                    Some(module) => push(module, &mut outcome.order),
                    None => outcome.unresolved_mixins.push((link, mixin.target.clone())),
                }
            }
        }
        outcome
    }
}
