//! Ancestor chains: following superclass links to a root.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::SymbolId;
use crate::normalize::ClassEntity;
use crate::resolve::EntityIndex;

/// The result of walking one class's superclass links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Ancestor ids, nearest first. Does not include the class itself.
    /// Truncated at the point a cycle or unresolved superclass was hit.
    pub ancestors: Vec<SymbolId>,
    /// The cycle path, when following superclass links looped. Fatal to
    /// this class's chain, never to the run.
    pub cycle: Option<Vec<SymbolId>>,
    /// `(class id, superclass text)` for the first link whose target
    /// does not exist in the entity set.
    pub unresolved: Option<(SymbolId, String)>,
}

/// Resolves and caches ancestor chains over the frozen entity set.
///
/// The cache is shared across the parallel resolution fan-out; chains
/// are pure functions of the frozen entities, so any thread may fill
/// any slot.
pub struct InheritanceResolver<'a> {
    index: &'a EntityIndex<'a>,
    chains: RwLock<FxHashMap<SymbolId, Arc<ChainOutcome>>>,
}

impl<'a> InheritanceResolver<'a> {
    pub fn new(index: &'a EntityIndex<'a>) -> Self {
        Self {
            index,
            chains: RwLock::new(FxHashMap::default()),
        }
    }

    /// Resolve a class's declared superclass to a concrete class id,
    /// walking outward from the class's enclosing namespace.
    pub fn resolve_superclass(&self, class: &ClassEntity) -> Option<SymbolId> {
        let superclass = class.superclass.as_deref()?;
        let enclosing = class.namespace.join(".");
        self.index.resolve_class_outward(superclass, &enclosing)
    }

    /// The ordered ancestor chain for a class id.
    pub fn ancestors(&self, class_id: SymbolId) -> Arc<ChainOutcome> {
        if let Some(cached) = self.chains.read().get(&class_id) {
            return Arc::clone(cached);
        }
        let outcome = Arc::new(self.walk(class_id));
        self.chains
            .write()
            .entry(class_id)
            .or_insert_with(|| Arc::clone(&outcome))
            .clone()
    }

    fn walk(&self, class_id: SymbolId) -> ChainOutcome {
        let mut outcome = ChainOutcome::default();
        let mut seen = vec![class_id];
        let mut current = class_id;

        loop {
            let Some(class) = self
                .index
                .entity(current)
                .and_then(|entity| entity.as_class())
            else {
                break;
            };
            if class.superclass.is_none() {
                break; // reached a root
            }
            match self.resolve_superclass(class) {
                Some(next) => {
                    if let Some(position) = seen.iter().position(|&id| id == next) {
                        trace!("[INHERIT] cycle at {}", class.fqname);
                        outcome.cycle = Some(seen[position..].to_vec());
                        break;
                    }
                    seen.push(next);
                    outcome.ancestors.push(next);
                    current = next;
                }
                None => {
                    outcome.unresolved = Some((
                        current,
                        class.superclass.clone().unwrap_or_default(),
                    ));
                    break;
                }
            }
        }
        outcome
    }
}
