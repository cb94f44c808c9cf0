//! Deterministic Manchester classification.

use triage_core::{AcuityLevel, ClassificationResult, Criterion, VitalSigns};

use crate::criteria::{RuleDescription, DEFAULT_LEVEL, TIERS};

/// Maps a set of observations to an acuity level.
///
/// Tiers are evaluated from most to least severe and the first matching
/// discriminator wins, so a patient who meets criteria for several tiers is
/// always placed in the most severe one. There is no scoring or voting.
///
/// The classifier holds no state: identical inputs always give identical
/// results, and it may be shared freely between threads.
pub struct TriageClassifier;

impl TriageClassifier {
    /// Classify one encounter. Never fails; readings are compared as given,
    /// without clamping. A NaN temperature matches no temperature bound.
    pub fn classify(vitals: &VitalSigns) -> ClassificationResult {
        for tier in &TIERS {
            if let Some(check) = tier.checks.iter().find(|c| c.matches(vitals)) {
                return ClassificationResult::new(tier.level, check.criterion);
            }
        }
        ClassificationResult::new(DEFAULT_LEVEL, Criterion::NominalVitals)
    }

    /// Convenience wrapper returning only the level.
    pub fn level(vitals: &VitalSigns) -> AcuityLevel {
        Self::classify(vitals).level
    }

    /// Every discriminator in evaluation order, followed by the default rule.
    pub fn describe() -> Vec<RuleDescription> {
        let mut rules: Vec<RuleDescription> = TIERS
            .iter()
            .flat_map(|tier| {
                tier.checks.iter().map(move |check| RuleDescription {
                    rule_id: ClassificationResult::new(tier.level, check.criterion).rule_id(),
                    level: tier.level,
                    criterion: check.criterion,
                    description: check.description,
                })
            })
            .collect();
        rules.push(RuleDescription {
            rule_id: ClassificationResult::new(DEFAULT_LEVEL, Criterion::NominalVitals).rule_id(),
            level: DEFAULT_LEVEL,
            criterion: Criterion::NominalVitals,
            description: "no discriminator matched",
        });
        rules
    }
}

#[cfg(test)]
mod tests;
