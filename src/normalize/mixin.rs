//! Mixin normalization and attachment to owning types.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::trace;

use crate::base::{SourceLocation, SymbolId, qualify};
use crate::diagnostics::Diagnostic;
use crate::facts::{FactPayload, MixinKind, Origin, RawSymbolFact};
use crate::normalize::{Entity, MixinRef, class};

/// A normalized mixin observation, not yet attached to its owner.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MixinApplication {
    /// Fqname of the class or module receiving the mixin.
    pub owner_fqname: String,
    /// Sorts applications into source order (file, then line) where
    /// locations allow recovering it.
    pub location: Option<SourceLocation>,
    pub relation: MixinKind,
    pub target: String,
    pub origin: Origin,
}

/// Reject mixin facts without an owner name or target.
pub fn validate(fact: &RawSymbolFact) -> Result<(), Diagnostic> {
    if fact.name.trim().is_empty() {
        return Err(Diagnostic::validation(
            "mixin fact rejected: missing owner name",
            fact.location.clone(),
        ));
    }
    match &fact.payload {
        FactPayload::Mixin { target, .. } if target.trim().is_empty() => {
            Err(Diagnostic::validation(
                format!("mixin fact on {} rejected: missing target", fact.name),
                fact.location.clone(),
            ))
        }
        _ => Ok(()),
    }
}

/// Normalize a mixin fact into an application record.
pub fn normalize(fact: &RawSymbolFact) -> MixinApplication {
    let (relation, target) = match &fact.payload {
        FactPayload::Mixin { relation, target } => (*relation, target.trim().to_string()),
        _ => (MixinKind::Include, String::new()),
    };
    MixinApplication {
        owner_fqname: qualify(fact.namespace_str(), fact.name.trim()),
        location: fact.location.clone(),
        relation,
        target,
        origin: fact.origin,
    }
}

/// Attach mixin applications to their owners, in deterministic source
/// order, deduplicating by (relation, normalized target) so the same
/// inclusion observed twice is recorded once.
///
/// Applications whose owner was never defined create an implicit class,
/// matching the default-to-class rule for type facts.
pub fn apply_all(
    entities: &mut IndexMap<SymbolId, Entity>,
    mut applications: Vec<MixinApplication>,
    at: DateTime<Utc>,
) {
    applications.sort();
    for application in applications {
        let owner_id = class::ensure_type(
            entities,
            &application.owner_fqname,
            application.origin,
            application.location.is_some(),
            at,
        );
        let mixin = MixinRef::new(application.relation, application.target);
        let mixins = match entities.get_mut(&owner_id) {
            Some(Entity::Class(owner)) => &mut owner.mixins,
            Some(Entity::Module(owner)) => &mut owner.mixins,
            _ => continue,
        };
        if mixins
            .iter()
            .any(|existing| existing.dedup_key() == mixin.dedup_key())
        {
            trace!(
                "[NORMALIZE] duplicate mixin {} {} on {}",
                mixin.relation.as_str(),
                mixin.target,
                application.owner_fqname
            );
            continue;
        }
        mixins.push(mixin);
    }
}
