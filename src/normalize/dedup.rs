//! Deduplication and merge of canonical entity observations.
//!
//! Observations are grouped by `symbol_id` and merged per the source
//! precedence rules. Merging is pure: inputs are never mutated, and the
//! function is idempotent (its output re-deduplicates to itself).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::SymbolId;
use crate::normalize::{ClassEntity, Entity, MethodEntity, MixinRef, ModuleEntity};

/// Deduplicate a collection of entity observations.
///
/// Groups are processed in `symbol_id` order, so the result is
/// independent of arrival order. Singleton groups pass through
/// unchanged. Within a group, ties between equal-precedence
/// observations keep the first encountered, which the session makes
/// deterministic by canonically ordering facts before normalization.
pub fn deduplicate(entities: Vec<Entity>, at: DateTime<Utc>) -> Vec<Entity> {
    let mut groups: IndexMap<SymbolId, Vec<Entity>> = IndexMap::new();
    for entity in entities {
        groups.entry(entity.symbol_id()).or_default().push(entity);
    }
    groups.sort_unstable_keys();
    debug!("[DEDUP] {} identity groups", groups.len());
    groups
        .into_iter()
        .map(|(_, group)| merge_group(group, at))
        .collect()
}

/// Merge one identity group into a single canonical entity.
fn merge_group(mut group: Vec<Entity>, at: DateTime<Utc>) -> Entity {
    if group.len() == 1 {
        return group.pop().expect("non-empty group");
    }
    assert_consistent_identity(&group);
    let primary = primary_index(&group);
    match &group[primary] {
        Entity::Class(_) => Entity::Class(merge_classes(&group, primary, at)),
        Entity::Module(_) => Entity::Module(merge_modules(&group, primary, at)),
        Entity::Method(_) => Entity::Method(merge_methods(&group, primary, at)),
    }
}

/// A group shares one `symbol_id`; by the identity contract its members
/// must agree on every identity field. Disagreement means the
/// discriminant scheme is broken, which is a bug, not bad input.
fn assert_consistent_identity(group: &[Entity]) {
    let first = &group[0];
    for entity in &group[1..] {
        let consistent = entity.kind() == first.kind()
            && entity.fqname() == first.fqname()
            && match (entity, first) {
                (Entity::Method(a), Entity::Method(b)) => {
                    a.receiver_scope == b.receiver_scope && a.arity == b.arity
                }
                _ => true,
            };
        if !consistent {
            panic!(
                "identity collision: {} {} and {} {} share id {}",
                first.kind().as_str(),
                first.fqname(),
                entity.kind().as_str(),
                entity.fqname(),
                first.symbol_id()
            );
        }
    }
}

/// Index of the primary observation: the one carrying the
/// highest-precedence origin, first-encountered winning ties.
fn primary_index(group: &[Entity]) -> usize {
    let mut best = 0;
    for (index, entity) in group.iter().enumerate().skip(1) {
        let precedence = entity.provenance().best_origin().precedence();
        if precedence > group[best].provenance().best_origin().precedence() {
            best = index;
        }
    }
    best
}

/// Observation indices in descending precedence order, original order
/// breaking ties. Used for first-non-null field scans.
fn precedence_order(group: &[Entity]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..group.len()).collect();
    order.sort_by_key(|&index| {
        std::cmp::Reverse(group[index].provenance().best_origin().precedence())
    });
    order
}

fn merged_provenance(group: &[Entity], primary: usize, at: DateTime<Utc>) -> crate::normalize::Provenance {
    let mut provenance = group[primary].provenance().clone();
    for (index, entity) in group.iter().enumerate() {
        if index != primary {
            provenance = provenance.merged_with(entity.provenance(), at);
        }
    }
    provenance
}

/// Sorted, deduplicated union of owned constants across the group.
fn merged_constants(constants: Vec<&[SmolStr]>) -> Vec<SmolStr> {
    let mut union: Vec<SmolStr> = constants.into_iter().flatten().cloned().collect();
    union.sort_unstable();
    union.dedup();
    union
}

/// Union of mixin lists, primary first, deduplicated by (relation,
/// normalized target). Mixins are normally attached after merge, so
/// this only matters when re-deduplicating an already-built collection.
fn merged_mixins(group: &[Entity], primary: usize) -> Vec<MixinRef> {
    let mut merged: Vec<MixinRef> = Vec::new();
    let mut push_all = |mixins: &[MixinRef]| {
        for mixin in mixins {
            if !merged.iter().any(|m| m.dedup_key() == mixin.dedup_key()) {
                merged.push(mixin.clone());
            }
        }
    };
    push_all(group[primary].mixins());
    for index in precedence_order(group) {
        if index != primary {
            push_all(group[index].mixins());
        }
    }
    merged
}

fn merge_classes(group: &[Entity], primary: usize, at: DateTime<Utc>) -> ClassEntity {
    let base = group[primary].as_class().expect("class group").clone();
    // First non-null superclass by descending precedence: a
    // lower-precedence source may know the superclass the primary lacks.
    let superclass = precedence_order(group)
        .into_iter()
        .find_map(|index| group[index].as_class().and_then(|c| c.superclass.clone()));
    ClassEntity {
        superclass,
        mixins: merged_mixins(group, primary),
        constants: merged_constants(
            group
                .iter()
                .filter_map(|e| e.as_class().map(|c| c.constants.as_slice()))
                .collect(),
        ),
        provenance: merged_provenance(group, primary, at),
        ..base
    }
}

fn merge_modules(group: &[Entity], primary: usize, at: DateTime<Utc>) -> ModuleEntity {
    let base = group[primary].as_module().expect("module group").clone();
    ModuleEntity {
        mixins: merged_mixins(group, primary),
        constants: merged_constants(
            group
                .iter()
                .filter_map(|e| e.as_module().map(|m| m.constants.as_slice()))
                .collect(),
        ),
        provenance: merged_provenance(group, primary, at),
        ..base
    }
}

fn merge_methods(group: &[Entity], primary: usize, at: DateTime<Utc>) -> MethodEntity {
    let base = group[primary].as_method().expect("method group").clone();
    // Most restrictive visibility across the group; `Visibility`'s
    // ordering makes that the maximum.
    let visibility = group
        .iter()
        .filter_map(|e| e.visibility())
        .max()
        .unwrap_or_default();
    let aliased_from = base.aliased_from.clone().or_else(|| {
        precedence_order(group)
            .into_iter()
            .find_map(|index| group[index].as_method().and_then(|m| m.aliased_from.clone()))
    });
    MethodEntity {
        visibility,
        aliased_from,
        provenance: merged_provenance(group, primary, at),
        ..base
    }
}
