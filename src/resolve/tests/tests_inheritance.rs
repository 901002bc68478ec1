#![allow(clippy::unwrap_used)]
use crate::base::class_id;
use crate::facts::{Origin, RawSymbolFact};
use crate::resolve::{EntityIndex, InheritanceResolver};

use super::freeze;

#[test]
fn test_chain_to_root() {
    let entities = freeze(vec![
        RawSymbolFact::class("Base", None, Origin::StaticParse),
        RawSymbolFact::class("Record", None, Origin::StaticParse).with_superclass("Base"),
        RawSymbolFact::class("User", None, Origin::StaticParse).with_superclass("Record"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let chain = resolver.ancestors(class_id("User"));
    assert_eq!(chain.ancestors, vec![class_id("Record"), class_id("Base")]);
    assert!(chain.cycle.is_none());
    assert!(chain.unresolved.is_none());
}

#[test]
fn test_superclass_resolves_outward_through_namespaces() {
    // App.Billing.Invoice < Record finds App.Record, not a top-level
    // Record that does not exist.
    let entities = freeze(vec![
        RawSymbolFact::class("Record", Some("App"), Origin::StaticParse),
        RawSymbolFact::class("Invoice", Some("App.Billing"), Origin::StaticParse)
            .with_superclass("Record"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let chain = resolver.ancestors(class_id("App.Billing.Invoice"));
    assert_eq!(chain.ancestors, vec![class_id("App.Record")]);
}

#[test]
fn test_inner_definition_shadows_outer() {
    let entities = freeze(vec![
        RawSymbolFact::class("Record", None, Origin::StaticParse),
        RawSymbolFact::class("Record", Some("App"), Origin::StaticParse),
        RawSymbolFact::class("User", Some("App"), Origin::StaticParse).with_superclass("Record"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let chain = resolver.ancestors(class_id("App.User"));
    assert_eq!(chain.ancestors, vec![class_id("App.Record")]);
}

#[test]
fn test_absolute_superclass_skips_enclosing_scopes() {
    let entities = freeze(vec![
        RawSymbolFact::class("Record", None, Origin::StaticParse),
        RawSymbolFact::class("Record", Some("App"), Origin::StaticParse),
        RawSymbolFact::class("User", Some("App"), Origin::StaticParse)
            .with_superclass(".Record"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let chain = resolver.ancestors(class_id("App.User"));
    assert_eq!(chain.ancestors, vec![class_id("Record")]);
}

#[test]
fn test_unresolved_superclass_truncates_chain() {
    let entities = freeze(vec![
        RawSymbolFact::class("User", None, Origin::StaticParse).with_superclass("Ghost"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let chain = resolver.ancestors(class_id("User"));
    assert!(chain.ancestors.is_empty());
    let (from, target) = chain.unresolved.clone().unwrap();
    assert_eq!(from, class_id("User"));
    assert_eq!(target, "Ghost");
}

#[test]
fn test_cycle_is_fatal_to_the_class_not_the_walk() {
    let entities = freeze(vec![
        RawSymbolFact::class("A", None, Origin::StaticParse).with_superclass("B"),
        RawSymbolFact::class("B", None, Origin::StaticParse).with_superclass("C"),
        RawSymbolFact::class("C", None, Origin::StaticParse).with_superclass("A"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let chain = resolver.ancestors(class_id("A"));
    let cycle = chain.cycle.clone().unwrap();
    assert_eq!(cycle.len(), 3);
    // the walk still collected the ancestors it saw before looping
    assert_eq!(chain.ancestors.len(), 2);
}

#[test]
fn test_chain_is_cached() {
    let entities = freeze(vec![
        RawSymbolFact::class("Base", None, Origin::StaticParse),
        RawSymbolFact::class("User", None, Origin::StaticParse).with_superclass("Base"),
    ]);
    let index = EntityIndex::build(entities.iter());
    let resolver = InheritanceResolver::new(&index);

    let first = resolver.ancestors(class_id("User"));
    let second = resolver.ancestors(class_id("User"));
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}
