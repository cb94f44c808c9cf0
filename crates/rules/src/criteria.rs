//! Manchester discriminators as a decision table.
//!
//! Each tier lists its checks in evaluation order. Bounds are written exactly
//! as the protocol states them; an inclusive bound moved by one can under-triage
//! a patient, so every edge has a test on both sides.

use serde::Serialize;
use triage_core::{AcuityLevel, Consciousness, Criterion, VitalSigns};

/// One discriminator inside a tier.
pub struct Check {
    pub criterion: Criterion,
    pub description: &'static str,
    test: fn(&VitalSigns) -> bool,
}

impl Check {
    pub fn matches(&self, vitals: &VitalSigns) -> bool {
        (self.test)(vitals)
    }
}

/// All discriminators that place a patient at one acuity level.
pub struct Tier {
    pub level: AcuityLevel,
    pub checks: &'static [Check],
}

/// Human-readable listing of one check, for audit endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescription {
    pub rule_id: String,
    pub level: AcuityLevel,
    pub criterion: Criterion,
    pub description: &'static str,
}

// ── Immediate (red) ─────────────────────────────────────────────────

const IMMEDIATE: &[Check] = &[
    Check {
        criterion: Criterion::OxygenSaturation,
        description: "SpO2 below 90%",
        test: |v| v.oxygen_saturation < 90,
    },
    Check {
        criterion: Criterion::HeartRate,
        description: "heart rate below 40 or above 140 bpm",
        test: |v| v.heart_rate < 40 || v.heart_rate > 140,
    },
    Check {
        criterion: Criterion::SystolicPressure,
        description: "systolic pressure below 80 mmHg",
        test: |v| v.systolic_blood_pressure.is_some_and(|s| s < 80),
    },
    Check {
        criterion: Criterion::Temperature,
        description: "temperature above 41.0 °C",
        test: |v| v.temperature > 41.0,
    },
    Check {
        criterion: Criterion::PainWithShock,
        description: "pain 10/10 with signs of shock",
        test: |v| v.pain() == 10 && v.flags.shock_signs,
    },
    Check {
        criterion: Criterion::Consciousness,
        description: "unconscious or severely reduced consciousness",
        test: |v| {
            matches!(
                v.consciousness,
                Some(Consciousness::Unconscious | Consciousness::SeverelyAltered)
            )
        },
    },
];

// ── Very urgent (orange) ────────────────────────────────────────────

const VERY_URGENT: &[Check] = &[
    Check {
        criterion: Criterion::OxygenSaturation,
        description: "SpO2 90-93%",
        test: |v| (90..=93).contains(&v.oxygen_saturation),
    },
    Check {
        criterion: Criterion::HeartRate,
        description: "heart rate 40-49 or 131-140 bpm",
        test: |v| (40..50).contains(&v.heart_rate) || (131..=140).contains(&v.heart_rate),
    },
    Check {
        criterion: Criterion::SystolicPressure,
        description: "systolic pressure 80-89 mmHg",
        test: |v| v.systolic_blood_pressure.is_some_and(|s| (80..90).contains(&s)),
    },
    Check {
        criterion: Criterion::Temperature,
        description: "temperature 39.0-41.0 °C",
        test: |v| (39.0..=41.0).contains(&v.temperature),
    },
    Check {
        criterion: Criterion::PainLevel,
        description: "severe pain, 8/10 or more",
        test: |v| v.pain() >= 8,
    },
    Check {
        criterion: Criterion::AcuteChestPain,
        description: "acute chest pain",
        test: |v| v.flags.acute_chest_pain,
    },
    Check {
        criterion: Criterion::Seizure,
        description: "seizure",
        test: |v| v.flags.seizure,
    },
    Check {
        criterion: Criterion::MajorTrauma,
        description: "major trauma",
        test: |v| v.flags.major_trauma,
    },
    Check {
        criterion: Criterion::Bleeding,
        description: "moderate to severe bleeding",
        test: |v| v.flags.moderate_severe_bleeding,
    },
];

// ── Urgent (yellow) ─────────────────────────────────────────────────

const URGENT: &[Check] = &[
    Check {
        criterion: Criterion::OxygenSaturation,
        description: "SpO2 94-95%",
        test: |v| (94..=95).contains(&v.oxygen_saturation),
    },
    Check {
        criterion: Criterion::HeartRate,
        description: "heart rate 51-60 or 120-129 bpm",
        test: |v| (51..=60).contains(&v.heart_rate) || (120..130).contains(&v.heart_rate),
    },
    Check {
        criterion: Criterion::Temperature,
        description: "temperature 38.0-38.9 °C",
        test: |v| (38.0..39.0).contains(&v.temperature),
    },
    Check {
        criterion: Criterion::PainLevel,
        description: "pain 6-7/10",
        test: |v| (6..=7).contains(&v.pain()),
    },
    Check {
        criterion: Criterion::AbdominalPain,
        description: "severe abdominal pain",
        test: |v| v.flags.severe_abdominal_pain,
    },
    Check {
        criterion: Criterion::PersistentVomiting,
        description: "persistent vomiting",
        test: |v| v.flags.persistent_vomiting,
    },
    Check {
        criterion: Criterion::RespiratoryDistress,
        description: "asthma or COPD with dyspnoea",
        test: |v| v.flags.respiratory_distress,
    },
];

// ── Standard (green) ────────────────────────────────────────────────

const STANDARD: &[Check] = &[
    Check {
        criterion: Criterion::PainLevel,
        description: "pain 3-5/10",
        test: |v| (3..=5).contains(&v.pain()),
    },
    Check {
        criterion: Criterion::NotableSymptoms,
        description: "stable vitals with non-trivial symptoms",
        test: |v| v.flags.notable_symptoms,
    },
];

/// Tiers in evaluation order, most severe first. Anything that matches none
/// of them is non-urgent.
pub const TIERS: [Tier; 4] = [
    Tier { level: AcuityLevel::Immediate, checks: IMMEDIATE },
    Tier { level: AcuityLevel::VeryUrgent, checks: VERY_URGENT },
    Tier { level: AcuityLevel::Urgent, checks: URGENT },
    Tier { level: AcuityLevel::Standard, checks: STANDARD },
];

pub const DEFAULT_LEVEL: AcuityLevel = AcuityLevel::NonUrgent;
