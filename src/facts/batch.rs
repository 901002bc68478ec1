//! Per-file fact batches as produced by a parallel extraction pool.

use smol_str::SmolStr;

use crate::base::SourceLocation;
use crate::facts::RawSymbolFact;

/// An error reported by the extraction adapter. Stored verbatim on the
/// run result; the core never interprets these.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionError {
    pub message: String,
    pub category: SmolStr,
    pub location: Option<SourceLocation>,
}

impl ExtractionError {
    pub fn new(message: impl Into<String>, category: impl Into<SmolStr>) -> Self {
        Self {
            message: message.into(),
            category: category.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Facts and extraction errors from one source, usually one file.
///
/// Batches may arrive in any order; nothing downstream depends on
/// arrival order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct FactBatch {
    /// The source the batch was extracted from, when known.
    pub source: Option<SmolStr>,
    pub facts: Vec<RawSymbolFact>,
    pub errors: Vec<ExtractionError>,
}

impl FactBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_source(source: impl Into<SmolStr>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, fact: RawSymbolFact) -> &mut Self {
        self.facts.push(fact);
        self
    }

    pub fn push_error(&mut self, error: ExtractionError) -> &mut Self {
        self.errors.push(error);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty() && self.errors.is_empty()
    }
}

impl FromIterator<RawSymbolFact> for FactBatch {
    fn from_iter<I: IntoIterator<Item = RawSymbolFact>>(iter: I) -> Self {
        Self {
            source: None,
            facts: iter.into_iter().collect(),
            errors: Vec::new(),
        }
    }
}

#[cfg(all(test, feature = "serialize"))]
mod serialize_tests {
    use super::*;
    use crate::facts::Origin;

    #[test]
    fn test_batch_round_trips_through_json() {
        let mut batch = FactBatch::for_source("user.src");
        batch.push(
            RawSymbolFact::class("User", Some("App"), Origin::StaticParse)
                .with_superclass("Base")
                .with_location(SourceLocation::new("user.src", 1)),
        );
        batch.push_error(ExtractionError::new("unexpected token", "parse"));

        let json = serde_json::to_string(&batch).expect("serializes");
        let decoded: FactBatch = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(decoded.facts, batch.facts);
        assert_eq!(decoded.errors, batch.errors);
    }
}
