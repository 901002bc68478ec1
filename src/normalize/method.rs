//! Method, attribute, and alias normalization.

use chrono::{DateTime, Utc};
use smol_str::SmolStr;

use crate::base::{ReceiverScope, method_id, qualify, split_namespace};
use crate::diagnostics::Diagnostic;
use crate::facts::{FactPayload, ParamKind, RawParam, RawSymbolFact, Visibility};
use crate::normalize::{Entity, MethodEntity, Provenance};

/// Arity reported when a method's parameter shape is unknown (aliases
/// before their target is seen).
pub const UNKNOWN_ARITY: i32 = -1;

/// Compute arity from a declared parameter list.
///
/// A rest parameter makes the arity negative: −(required + 1). Without a
/// rest parameter the arity is the positional parameter count (required
/// plus optional). Keyword-only parameters do not affect arity unless
/// the method has no positional parameters at all, in which case it
/// reports −1.
pub fn arity(params: &[RawParam]) -> i32 {
    let required = params
        .iter()
        .filter(|param| param.kind == ParamKind::Required)
        .count() as i32;
    let optional = params
        .iter()
        .filter(|param| param.kind == ParamKind::Optional)
        .count() as i32;
    let has_rest = params.iter().any(|param| param.kind == ParamKind::Rest);
    let has_keyword = params.iter().any(|param| param.kind == ParamKind::Keyword);

    if has_rest {
        -(required + 1)
    } else if required + optional > 0 {
        required + optional
    } else if has_keyword {
        -1
    } else {
        0
    }
}

/// Reject method-shaped facts without a usable name, and alias facts
/// without a target.
pub fn validate(fact: &RawSymbolFact) -> Result<(), Diagnostic> {
    if fact.name.trim().is_empty() {
        return Err(Diagnostic::validation(
            format!("{} fact rejected: missing name", fact.kind.as_str()),
            fact.location.clone(),
        ));
    }
    if let FactPayload::Alias { target } = &fact.payload {
        if target.trim().is_empty() {
            return Err(Diagnostic::validation(
                format!("alias fact {} rejected: missing target", fact.name),
                fact.location.clone(),
            ));
        }
    }
    Ok(())
}

fn build_method(
    name: &str,
    owner: &str,
    receiver_scope: ReceiverScope,
    params: Vec<RawParam>,
    method_arity: i32,
    visibility: Visibility,
    aliased_from: Option<SmolStr>,
    provenance: Provenance,
) -> MethodEntity {
    let fqname = qualify(owner, name);
    MethodEntity {
        symbol_id: method_id(&fqname, receiver_scope, method_arity),
        name: SmolStr::from(name),
        namespace: split_namespace(owner),
        owner: owner.to_string(),
        fqname,
        receiver_scope,
        params,
        arity: method_arity,
        visibility,
        aliased_from,
        provenance,
    }
}

/// Normalize a method definition fact.
pub fn normalize(fact: &RawSymbolFact, at: DateTime<Utc>) -> Entity {
    let provenance =
        Provenance::for_observation(fact.origin, fact.location.is_some(), false, at);
    let (params, visibility, receiver_scope) = match &fact.payload {
        FactPayload::Method {
            params,
            visibility,
            receiver_scope,
        } => (params.clone(), visibility.unwrap_or_default(), *receiver_scope),
        _ => (Vec::new(), Visibility::default(), ReceiverScope::Instance),
    };
    let method_arity = arity(&params);
    Entity::Method(build_method(
        fact.name.trim(),
        fact.namespace_str(),
        receiver_scope,
        params,
        method_arity,
        visibility,
        None,
        provenance,
    ))
}

/// Expand an attribute declaration into its accessor methods: a reader
/// of arity 0 and/or a writer `name=` of arity 1, per the access mode.
pub fn expand_attribute(fact: &RawSymbolFact, at: DateTime<Utc>) -> Vec<Entity> {
    let (access, visibility) = match &fact.payload {
        FactPayload::Attribute { access, visibility } => {
            (*access, visibility.unwrap_or_default())
        }
        _ => return Vec::new(),
    };
    let provenance =
        Provenance::for_observation(fact.origin, fact.location.is_some(), false, at);
    let owner = fact.namespace_str();
    let name = fact.name.trim();
    let mut accessors = Vec::new();

    if access.generates_reader() {
        accessors.push(Entity::Method(build_method(
            name,
            owner,
            ReceiverScope::Instance,
            Vec::new(),
            0,
            visibility,
            None,
            provenance.clone(),
        )));
    }
    if access.generates_writer() {
        let writer_name = format!("{name}=");
        accessors.push(Entity::Method(build_method(
            &writer_name,
            owner,
            ReceiverScope::Instance,
            vec![RawParam::required("value")],
            1,
            visibility,
            None,
            provenance,
        )));
    }
    accessors
}

/// Normalize an alias declaration into a method entity pointing at the
/// aliased name on the same owner. The alias's own parameter shape is
/// unknown until resolution, so it reports [`UNKNOWN_ARITY`].
pub fn normalize_alias(fact: &RawSymbolFact, at: DateTime<Utc>) -> Entity {
    let target = match &fact.payload {
        FactPayload::Alias { target } => SmolStr::from(target.trim()),
        _ => SmolStr::default(),
    };
    let provenance =
        Provenance::for_observation(fact.origin, fact.location.is_some(), false, at);
    Entity::Method(build_method(
        fact.name.trim(),
        fact.namespace_str(),
        ReceiverScope::Instance,
        Vec::new(),
        UNKNOWN_ARITY,
        Visibility::default(),
        Some(target),
        provenance,
    ))
}
