//! Fact origins and the source precedence table.

use std::str::FromStr;

use crate::diagnostics::TagParseError;

/// Where a fact came from. Ordered by trust: formal signatures beat
/// type-checker annotations beat runtime reflection, and so on down to
/// pure inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum Origin {
    FormalSignature,
    TypeCheckerAnnotation,
    RuntimeReflection,
    StructuredDocAnnotation,
    StaticParse,
    Inferred,
}

impl Origin {
    /// Base confidence assigned to a fact from this origin, before
    /// modifiers.
    pub fn base_confidence(self) -> f64 {
        match self {
            Origin::FormalSignature => 0.95,
            Origin::TypeCheckerAnnotation => 0.90,
            Origin::RuntimeReflection => 0.85,
            Origin::StructuredDocAnnotation => 0.80,
            Origin::StaticParse => 0.75,
            Origin::Inferred => 0.50,
        }
    }

    /// Precedence rank for merge decisions; higher wins. Matches the
    /// confidence table order but is a category comparison, independent
    /// of the numeric confidence a particular observation ended up with.
    pub fn precedence(self) -> u8 {
        match self {
            Origin::FormalSignature => 6,
            Origin::TypeCheckerAnnotation => 5,
            Origin::RuntimeReflection => 4,
            Origin::StructuredDocAnnotation => 3,
            Origin::StaticParse => 2,
            Origin::Inferred => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Origin::FormalSignature => "formal_signature",
            Origin::TypeCheckerAnnotation => "type_checker_annotation",
            Origin::RuntimeReflection => "runtime_reflection",
            Origin::StructuredDocAnnotation => "structured_doc_annotation",
            Origin::StaticParse => "static_parse",
            Origin::Inferred => "inferred",
        }
    }
}

impl FromStr for Origin {
    type Err = TagParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "formal_signature" => Ok(Origin::FormalSignature),
            "type_checker_annotation" => Ok(Origin::TypeCheckerAnnotation),
            "runtime_reflection" => Ok(Origin::RuntimeReflection),
            "structured_doc_annotation" => Ok(Origin::StructuredDocAnnotation),
            "static_parse" => Ok(Origin::StaticParse),
            "inferred" => Ok(Origin::Inferred),
            other => Err(TagParseError::UnknownOrigin(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_matches_confidence_order() {
        let ordered = [
            Origin::FormalSignature,
            Origin::TypeCheckerAnnotation,
            Origin::RuntimeReflection,
            Origin::StructuredDocAnnotation,
            Origin::StaticParse,
            Origin::Inferred,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0].precedence() > pair[1].precedence());
            assert!(pair[0].base_confidence() > pair[1].base_confidence());
        }
    }

    #[test]
    fn test_round_trip_tags() {
        for origin in [
            Origin::FormalSignature,
            Origin::TypeCheckerAnnotation,
            Origin::RuntimeReflection,
            Origin::StructuredDocAnnotation,
            Origin::StaticParse,
            Origin::Inferred,
        ] {
            assert_eq!(origin.as_str().parse::<Origin>(), Ok(origin));
        }
        assert!("psychic_guess".parse::<Origin>().is_err());
    }
}
