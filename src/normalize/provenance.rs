//! Confidence scoring and origin history.

use chrono::{DateTime, Utc};

use crate::facts::Origin;

/// The origin history and confidence of a canonical entity.
///
/// Confidence starts from the origin's base value, adjusted for the
/// presence of a source location and for a missing name, then clamped to
/// `[0, 1]`. Merging unions the origin sets, keeps the maximum
/// confidence, and refreshes the timestamp to merge time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Provenance {
    /// Contributing origins, highest precedence first, deduplicated.
    origins: Vec<Origin>,
    confidence: f64,
    last_touched: DateTime<Utc>,
}

/// Confidence for one observation, per the fixed table and modifiers.
///
/// An empty location record still counts as "location present"; only an
/// absent record forfeits the bonus.
pub fn confidence_for(origin: Origin, has_location: bool, name_empty: bool) -> f64 {
    let mut confidence = origin.base_confidence();
    if has_location {
        confidence += 0.05;
    }
    if name_empty {
        confidence -= 0.10;
    }
    confidence.clamp(0.0, 1.0)
}

impl Provenance {
    /// Provenance for a single freshly-normalized observation.
    pub fn for_observation(
        origin: Origin,
        has_location: bool,
        name_empty: bool,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            origins: vec![origin],
            confidence: confidence_for(origin, has_location, name_empty),
            last_touched: at,
        }
    }

    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn last_touched(&self) -> DateTime<Utc> {
        self.last_touched
    }

    pub fn has_origin(&self, origin: Origin) -> bool {
        self.origins.contains(&origin)
    }

    /// The highest-precedence origin recorded here. Drives primary
    /// selection during merge.
    pub fn best_origin(&self) -> Origin {
        // origins is kept sorted by precedence descending and non-empty
        self.origins[0]
    }

    /// Union origins, take the maximum confidence, refresh the
    /// timestamp. Pure: returns a new record.
    pub fn merged_with(&self, other: &Provenance, at: DateTime<Utc>) -> Provenance {
        let mut origins = self.origins.clone();
        for origin in &other.origins {
            if !origins.contains(origin) {
                origins.push(*origin);
            }
        }
        origins.sort_by(|a, b| b.precedence().cmp(&a.precedence()));
        Provenance {
            origins,
            confidence: self.confidence.max(other.confidence),
            last_touched: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[test]
    fn test_base_table() {
        assert_eq!(confidence_for(Origin::FormalSignature, false, false), 0.95);
        assert_eq!(confidence_for(Origin::Inferred, false, false), 0.50);
    }

    #[test]
    fn test_location_bonus_and_name_penalty() {
        assert!((confidence_for(Origin::StaticParse, true, false) - 0.80).abs() < 1e-9);
        assert!((confidence_for(Origin::StaticParse, false, true) - 0.65).abs() < 1e-9);
        // both modifiers at once
        assert!((confidence_for(Origin::StaticParse, true, true) - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_to_unit_interval() {
        assert!((confidence_for(Origin::FormalSignature, true, false) - 1.0).abs() < 1e-12);
        assert!(confidence_for(Origin::FormalSignature, true, false) <= 1.0);
    }

    #[test]
    fn test_merge_unions_and_takes_max() {
        let formal = Provenance::for_observation(Origin::FormalSignature, false, false, at());
        let parsed = Provenance::for_observation(Origin::StaticParse, true, false, at());
        let merged = parsed.merged_with(&formal, at());
        assert_eq!(merged.confidence(), 0.95);
        assert_eq!(
            merged.origins(),
            &[Origin::FormalSignature, Origin::StaticParse]
        );
    }

    #[test]
    fn test_merge_deduplicates_origins() {
        let a = Provenance::for_observation(Origin::StaticParse, false, false, at());
        let b = Provenance::for_observation(Origin::StaticParse, true, false, at());
        let merged = a.merged_with(&b, at());
        assert_eq!(merged.origins(), &[Origin::StaticParse]);
        assert!((merged.confidence() - 0.80).abs() < 1e-9);
    }
}
