#![allow(clippy::unwrap_used)]
use crate::base::{CallEdgeKind, GraphKind, ReceiverScope, class_id, method_id};
use crate::facts::{Origin, RawParam, RawSymbolFact};
use crate::normalize::{CallDraft, Entity, call};
use crate::resolve::{CrossReferenceResolver, EntityIndex, InheritanceResolver, MroResolver};

use super::freeze;

fn draft(caller_name: &str, caller_owner: &str, operand: &str) -> CallDraft {
    call::normalize(&RawSymbolFact::call(caller_name, caller_owner, operand))
}

fn resolve(entities: &[Entity], drafts: &[CallDraft]) -> crate::resolve::XrefOutcome {
    let index = EntityIndex::build(entities.iter());
    let inheritance = InheritanceResolver::new(&index);
    let mro = MroResolver::new(&index, &inheritance);
    let resolver = CrossReferenceResolver::new(&index, &inheritance, &mro);
    let mut outcome = resolver.resolve_drafts(drafts);
    let aliases = resolver.resolve_aliases();
    outcome.calls.extend(aliases.calls);
    outcome.unresolved.extend(aliases.unresolved);
    outcome.diagnostics.extend(aliases.diagnostics);
    outcome
}

#[test]
fn test_self_call_resolves_on_own_owner() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
        RawSymbolFact::method("validate", Some("User"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "self.validate")]);
    assert_eq!(outcome.calls.len(), 1);
    let edge = outcome.calls[0];
    assert_eq!(edge.kind, CallEdgeKind::SelfCall);
    assert_eq!(
        edge.to,
        method_id("User.validate", ReceiverScope::Instance, 0)
    );
}

#[test]
fn test_super_resolves_to_nearest_ancestor_definition() {
    let entities = freeze(vec![
        RawSymbolFact::class("Base", None, Origin::StaticParse),
        RawSymbolFact::class("Record", None, Origin::StaticParse).with_superclass("Base"),
        RawSymbolFact::class("User", None, Origin::StaticParse).with_superclass("Record"),
        RawSymbolFact::method("save", Some("Base"), vec![], Origin::StaticParse),
        RawSymbolFact::method("save", Some("Record"), vec![], Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "super")]);
    assert_eq!(outcome.calls.len(), 1);
    let edge = outcome.calls[0];
    assert_eq!(edge.kind, CallEdgeKind::SuperCall);
    // nearest ancestor (Record), not the root definition
    assert_eq!(edge.to, method_id("Record.save", ReceiverScope::Instance, 0));
}

#[test]
fn test_super_without_ancestor_definition_dangles() {
    let entities = freeze(vec![
        RawSymbolFact::class("Base", None, Origin::StaticParse),
        RawSymbolFact::class("User", None, Origin::StaticParse).with_superclass("Base"),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "super")]);
    assert!(outcome.calls.is_empty());
    assert_eq!(outcome.unresolved.len(), 1);
    assert_eq!(outcome.unresolved[0].kind, Some(CallEdgeKind::SuperCall));
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn test_bare_call_resolves_through_mro() {
    use crate::facts::MixinKind;
    use indexmap::IndexMap;

    let mut map: IndexMap<_, _> = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::module("Auditable", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
        RawSymbolFact::method("audit", Some("Auditable"), vec![], Origin::StaticParse),
    ])
    .into_iter()
    .map(|entity| (entity.symbol_id(), entity))
    .collect();
    crate::normalize::mixin::apply_all(
        &mut map,
        vec![crate::normalize::mixin::normalize(&RawSymbolFact::mixin(
            "User",
            None,
            MixinKind::Include,
            "Auditable",
        ))],
        super::at(),
    );
    let entities: Vec<Entity> = map.into_values().collect();

    let outcome = resolve(&entities, &[draft("save", "User", "audit")]);
    assert_eq!(outcome.calls.len(), 1);
    assert_eq!(
        outcome.calls[0].to,
        method_id("Auditable.audit", ReceiverScope::Instance, 0)
    );
}

#[test]
fn test_class_method_call_yields_call_and_constant_edges() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::class("Account", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
        RawSymbolFact::method(
            "find",
            Some("Account"),
            vec![RawParam::required("id")],
            Origin::StaticParse,
        )
        .with_receiver_scope(ReceiverScope::Class),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "Account.find(id)")]);
    assert_eq!(outcome.calls.len(), 1);
    assert_eq!(outcome.calls[0].kind, CallEdgeKind::ClassMethodCall);
    assert_eq!(
        outcome.calls[0].to,
        method_id("Account.find", ReceiverScope::Class, 1)
    );
    assert_eq!(outcome.constant_refs, vec![(
        method_id("User.save", ReceiverScope::Instance, 0),
        class_id("Account"),
    )]);
}

#[test]
fn test_call_to_undefined_method_survives_as_dangling() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "never_defined")]);
    assert!(outcome.calls.is_empty());
    assert_eq!(outcome.unresolved.len(), 1);
    assert_eq!(outcome.unresolved[0].graph, GraphKind::Call);
    assert_eq!(outcome.unresolved[0].target, "never_defined");
}

#[test]
fn test_heuristic_resolves_unique_name_on_unknown_receiver() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::class("Mailer", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
        RawSymbolFact::method("deliver", Some("Mailer"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "mailer.deliver")]);
    assert_eq!(outcome.calls.len(), 1);
    assert_eq!(
        outcome.calls[0].to,
        method_id("Mailer.deliver", ReceiverScope::Instance, 0)
    );
}

#[test]
fn test_heuristic_refuses_ambiguous_names() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::class("Mailer", None, Origin::StaticParse),
        RawSymbolFact::class("Queue", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
        RawSymbolFact::method("deliver", Some("Mailer"), vec![], Origin::StaticParse),
        RawSymbolFact::method("deliver", Some("Queue"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "mailer.deliver")]);
    assert!(outcome.calls.is_empty());
    assert_eq!(outcome.unresolved.len(), 1);
}

#[test]
fn test_constant_reference_resolves_to_type() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::class("Registry", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
    ]);
    let outcome = resolve(&entities, &[draft("save", "User", "Registry")]);
    assert_eq!(outcome.constant_refs, vec![(
        method_id("User.save", ReceiverScope::Instance, 0),
        class_id("Registry"),
    )]);
}

#[test]
fn test_owned_constant_reference_resolves_to_owner() {
    use indexmap::IndexMap;

    let mut map: IndexMap<_, _> = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
    ])
    .into_iter()
    .map(|entity| (entity.symbol_id(), entity))
    .collect();
    let constant = RawSymbolFact {
        kind: crate::facts::FactKind::Constant,
        name: "MAX_RETRIES".into(),
        namespace: Some("User".to_string()),
        payload: crate::facts::FactPayload::Constant,
        origin: Origin::StaticParse,
        location: None,
    };
    crate::normalize::class::apply_constant(&mut map, &constant, super::at());
    let entities: Vec<Entity> = map.into_values().collect();

    let outcome = resolve(&entities, &[draft("save", "User", "MAX_RETRIES")]);
    assert_eq!(outcome.constant_refs, vec![(
        method_id("User.save", ReceiverScope::Instance, 0),
        class_id("User"),
    )]);
}

#[test]
fn test_alias_links_to_target_method() {
    let mut entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse),
        RawSymbolFact::method("save", Some("User"), vec![], Origin::StaticParse),
    ]);
    let alias = RawSymbolFact {
        kind: crate::facts::FactKind::Alias,
        name: "store".into(),
        namespace: Some("User".to_string()),
        payload: crate::facts::FactPayload::Alias {
            target: "save".into(),
        },
        origin: Origin::StaticParse,
        location: None,
    };
    entities.push(crate::normalize::method::normalize_alias(&alias, super::at()));

    let outcome = resolve(&entities, &[]);
    assert_eq!(outcome.calls.len(), 1);
    assert_eq!(
        outcome.calls[0].to,
        method_id("User.save", ReceiverScope::Instance, 0)
    );
}

#[test]
fn test_alias_to_undefined_target_dangles() {
    let mut entities = freeze(vec![RawSymbolFact::class("User", None, Origin::StaticParse)]);
    let alias = RawSymbolFact {
        kind: crate::facts::FactKind::Alias,
        name: "store".into(),
        namespace: Some("User".to_string()),
        payload: crate::facts::FactPayload::Alias {
            target: "save".into(),
        },
        origin: Origin::StaticParse,
        location: None,
    };
    entities.push(crate::normalize::method::normalize_alias(&alias, super::at()));

    let outcome = resolve(&entities, &[]);
    assert!(outcome.calls.is_empty());
    assert_eq!(outcome.unresolved.len(), 1);
    assert_eq!(outcome.unresolved[0].target, "save");
}
