//! Output of the deterministic classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::acuity::AcuityLevel;

/// The criterion that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    OxygenSaturation,
    HeartRate,
    SystolicPressure,
    Temperature,
    PainWithShock,
    Consciousness,
    PainLevel,
    AcuteChestPain,
    Seizure,
    MajorTrauma,
    Bleeding,
    AbdominalPain,
    PersistentVomiting,
    RespiratoryDistress,
    NotableSymptoms,
    /// Nothing matched; the encounter takes the default level.
    NominalVitals,
}

impl Criterion {
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::OxygenSaturation => "oxygen_saturation",
            Criterion::HeartRate => "heart_rate",
            Criterion::SystolicPressure => "systolic_pressure",
            Criterion::Temperature => "temperature",
            Criterion::PainWithShock => "pain_with_shock",
            Criterion::Consciousness => "consciousness",
            Criterion::PainLevel => "pain_level",
            Criterion::AcuteChestPain => "acute_chest_pain",
            Criterion::Seizure => "seizure",
            Criterion::MajorTrauma => "major_trauma",
            Criterion::Bleeding => "bleeding",
            Criterion::AbdominalPain => "abdominal_pain",
            Criterion::PersistentVomiting => "persistent_vomiting",
            Criterion::RespiratoryDistress => "respiratory_distress",
            Criterion::NotableSymptoms => "notable_symptoms",
            Criterion::NominalVitals => "nominal_vitals",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Level assigned to an encounter together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub level: AcuityLevel,
    pub matched_rule: Criterion,
}

impl ClassificationResult {
    pub fn new(level: AcuityLevel, matched_rule: Criterion) -> Self {
        Self { level, matched_rule }
    }

    /// Stable audit identifier, e.g. `red.oxygen_saturation`.
    pub fn rule_id(&self) -> String {
        format!("{}.{}", self.level.color(), self.matched_rule.key())
    }
}
