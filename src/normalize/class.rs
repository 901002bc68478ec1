//! Class/module normalization and constant attachment.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::{EntityKind, SymbolId, class_id, module_id, qualify, simple_name, split_namespace};
use crate::diagnostics::Diagnostic;
use crate::facts::{FactPayload, Origin, RawSymbolFact};
use crate::normalize::{ClassEntity, Entity, ModuleEntity, Provenance};

/// Reject type facts without a usable name.
pub fn validate(fact: &RawSymbolFact) -> Result<(), Diagnostic> {
    if fact.name.trim().is_empty() {
        return Err(Diagnostic::validation(
            format!("{} fact rejected: missing name", fact.kind.as_str()),
            fact.location.clone(),
        ));
    }
    Ok(())
}

/// Normalize a class or module fact into a canonical type entity.
///
/// The payload's explicit kind tag wins over the fact kind; with neither
/// present the entity defaults to a class.
pub fn normalize(fact: &RawSymbolFact, at: DateTime<Utc>) -> Entity {
    let fqname = qualify(fact.namespace_str(), fact.name.trim());
    let namespace = split_namespace(fact.namespace_str());
    let name = simple_name(&fqname);
    let provenance =
        Provenance::for_observation(fact.origin, fact.location.is_some(), false, at);

    let (superclass, kind_tag) = match &fact.payload {
        FactPayload::Type {
            superclass,
            kind_tag,
        } => (superclass.clone(), *kind_tag),
        _ => (None, None),
    };

    let effective_kind = kind_tag.unwrap_or(match fact.kind {
        crate::facts::FactKind::Module => EntityKind::Module,
        _ => EntityKind::Class,
    });

    trace!(
        "[NORMALIZE] type fact '{}' -> {} {}",
        fact.name,
        effective_kind.as_str(),
        fqname
    );

    match effective_kind {
        EntityKind::Module => Entity::Module(ModuleEntity {
            symbol_id: module_id(&fqname),
            name,
            fqname,
            namespace,
            mixins: Vec::new(),
            constants: Vec::new(),
            provenance,
        }),
        _ => Entity::Class(ClassEntity {
            symbol_id: class_id(&fqname),
            name,
            fqname,
            namespace,
            superclass,
            mixins: Vec::new(),
            constants: Vec::new(),
            provenance,
        }),
    }
}

/// Find the type entity named `owner_fqname`, creating a default class
/// observation when no source defined it explicitly. Used by the mixin
/// and constant attachment passes.
pub fn ensure_type(
    entities: &mut IndexMap<SymbolId, Entity>,
    owner_fqname: &str,
    origin: Origin,
    has_location: bool,
    at: DateTime<Utc>,
) -> SymbolId {
    if let Some(id) = lookup_type(entities, owner_fqname) {
        return id;
    }
    let id = class_id(owner_fqname);
    trace!("[NORMALIZE] implicit class {owner_fqname} for attachment");
    let namespace_str = owner_fqname
        .rsplit_once(crate::base::SEPARATOR)
        .map(|(enclosing, _)| enclosing)
        .unwrap_or("");
    entities.insert(
        id,
        Entity::Class(ClassEntity {
            symbol_id: id,
            name: simple_name(owner_fqname),
            fqname: owner_fqname.to_string(),
            namespace: split_namespace(namespace_str),
            superclass: None,
            mixins: Vec::new(),
            constants: Vec::new(),
            provenance: Provenance::for_observation(origin, has_location, false, at),
        }),
    );
    id
}

/// Look up a type by fqname, classes shadowing modules.
pub fn lookup_type(entities: &IndexMap<SymbolId, Entity>, fqname: &str) -> Option<SymbolId> {
    let as_class = class_id(fqname);
    if entities.contains_key(&as_class) {
        return Some(as_class);
    }
    let as_module = module_id(fqname);
    entities.contains_key(&as_module).then_some(as_module)
}

/// Attach a constant definition to its owning type.
///
/// Returns a diagnostic when the constant has no owning namespace; the
/// fact is otherwise always absorbed (creating an implicit owner when
/// needed).
pub fn apply_constant(
    entities: &mut IndexMap<SymbolId, Entity>,
    fact: &RawSymbolFact,
    at: DateTime<Utc>,
) -> Option<Diagnostic> {
    let owner_fqname = fact.namespace_str();
    if owner_fqname.is_empty() {
        return Some(Diagnostic::resolution_warning(format!(
            "constant {} has no owning type",
            fact.name
        )));
    }
    let owner_id = ensure_type(entities, owner_fqname, fact.origin, fact.location.is_some(), at);
    let constant = SmolStr::from(fact.name.trim());
    let constants = match entities.get_mut(&owner_id) {
        Some(Entity::Class(class)) => &mut class.constants,
        Some(Entity::Module(module)) => &mut module.constants,
        _ => return None,
    };
    if let Err(slot) = constants.binary_search(&constant) {
        constants.insert(slot, constant);
    }
    None
}
