//! Shared fixtures and assertion helpers for integration tests.
#![allow(dead_code)]

use symatlas::facts::{FactBatch, MixinKind, Origin, RawParam, RawSymbolFact};
use symatlas::normalize::Entity;
use symatlas::session::{NormalizationSession, RunResult};
use symatlas::{SourceLocation, SymbolGraph};

/// Run a session over already-batched facts.
pub fn run_batches(batches: Vec<FactBatch>) -> RunResult {
    let mut session = NormalizationSession::new();
    for batch in batches {
        session.ingest(batch);
    }
    session.finish()
}

/// Run a session over one anonymous batch.
pub fn run_facts(facts: Vec<RawSymbolFact>) -> RunResult {
    run_batches(vec![facts.into_iter().collect()])
}

/// A small fixture codebase: a base record class, a user class with a
/// mixin and methods, and a mailer, spread over three "files".
pub fn sample_codebase() -> Vec<FactBatch> {
    let mut record = FactBatch::for_source("app/record.src");
    record.push(
        RawSymbolFact::class("Record", Some("App"), Origin::StaticParse)
            .with_location(SourceLocation::new("app/record.src", 1)),
    );
    record.push(
        RawSymbolFact::method("save", Some("App.Record"), vec![], Origin::StaticParse)
            .with_location(SourceLocation::new("app/record.src", 4)),
    );

    let mut user = FactBatch::for_source("app/user.src");
    user.push(
        RawSymbolFact::class("User", Some("App"), Origin::StaticParse)
            .with_superclass("Record")
            .with_location(SourceLocation::new("app/user.src", 1)),
    );
    user.push(RawSymbolFact::mixin(
        "User",
        Some("App"),
        MixinKind::Include,
        "Auditable",
    ));
    user.push(
        RawSymbolFact::method("save", Some("App.User"), vec![], Origin::StaticParse)
            .with_location(SourceLocation::new("app/user.src", 5)),
    );
    user.push(RawSymbolFact::call("save", "App.User", "super"));
    user.push(RawSymbolFact::call("save", "App.User", "self.audit"));

    let mut audit = FactBatch::for_source("app/auditable.src");
    audit.push(
        RawSymbolFact::module("Auditable", Some("App"), Origin::StaticParse)
            .with_location(SourceLocation::new("app/auditable.src", 1)),
    );
    audit.push(
        RawSymbolFact::method(
            "audit",
            Some("App.Auditable"),
            vec![RawParam::optional("label")],
            Origin::StaticParse,
        )
        .with_location(SourceLocation::new("app/auditable.src", 2)),
    );

    vec![record, user, audit]
}

/// Assert an entity exists under the given fqname and return it.
pub fn get_entity<'a>(graph: &'a SymbolGraph, name: &str, fqname: &str) -> &'a Entity {
    graph
        .lookup_by_name(name)
        .into_iter()
        .find(|entity| entity.fqname() == fqname)
        .unwrap_or_else(|| panic!("expected entity '{fqname}' in graph"))
}
