mod tests_inheritance;
mod tests_xref;

use chrono::{DateTime, Utc};

use crate::facts::RawSymbolFact;
use crate::normalize::{self, Entity, deduplicate};

pub(super) fn at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

/// Normalize a handful of type/method facts into a frozen entity list.
pub(super) fn freeze(facts: Vec<RawSymbolFact>) -> Vec<Entity> {
    let observations = facts
        .iter()
        .map(|fact| match fact.kind {
            crate::facts::FactKind::Method => normalize::method::normalize(fact, at()),
            _ => normalize::class::normalize(fact, at()),
        })
        .collect();
    deduplicate(observations, at())
}
