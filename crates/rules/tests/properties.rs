//! Property tests for the classifier's safety guarantees.

use proptest::prelude::*;
use triage_core::{AcuityLevel, ClinicalFlags, Consciousness, Criterion, VitalSigns};
use triage_rules::criteria::{DEFAULT_LEVEL, TIERS};
use triage_rules::TriageClassifier;

fn consciousness() -> impl Strategy<Value = Option<Consciousness>> {
    prop_oneof![
        Just(None),
        Just(Some(Consciousness::Alert)),
        Just(Some(Consciousness::Altered)),
        Just(Some(Consciousness::SeverelyAltered)),
        Just(Some(Consciousness::Unconscious)),
    ]
}

fn flags() -> impl Strategy<Value = ClinicalFlags> {
    prop::array::uniform9(any::<bool>()).prop_map(|f| ClinicalFlags {
        shock_signs: f[0],
        acute_chest_pain: f[1],
        seizure: f[2],
        major_trauma: f[3],
        moderate_severe_bleeding: f[4],
        severe_abdominal_pain: f[5],
        persistent_vomiting: f[6],
        respiratory_distress: f[7],
        notable_symptoms: f[8],
    })
}

prop_compose! {
    fn vitals()(
        systolic in prop::option::of(40..220i32),
        heart_rate in 20..200i32,
        oxygen_saturation in 70..=100i32,
        temperature in 34.0..43.0f64,
        pain_level in prop::option::of(0..=10i32),
        consciousness in consciousness(),
        flags in flags(),
    ) -> VitalSigns {
        VitalSigns {
            systolic_blood_pressure: systolic,
            heart_rate,
            oxygen_saturation,
            temperature,
            pain_level,
            consciousness,
            flags,
            free_text_symptoms: String::new(),
        }
    }
}

/// Most severe tier with any matching discriminator, checked independently.
fn most_severe_match(vitals: &VitalSigns) -> AcuityLevel {
    TIERS
        .iter()
        .filter(|tier| tier.checks.iter().any(|c| c.matches(vitals)))
        .map(|tier| tier.level)
        .max()
        .unwrap_or(DEFAULT_LEVEL)
}

proptest! {
    #[test]
    fn classification_is_a_pure_function(v in vitals()) {
        prop_assert_eq!(TriageClassifier::classify(&v), TriageClassifier::classify(&v.clone()));
    }

    #[test]
    fn never_below_the_most_severe_matching_tier(v in vitals()) {
        prop_assert_eq!(TriageClassifier::level(&v), most_severe_match(&v));
    }

    #[test]
    fn hypoxia_always_wins(v in vitals(), spo2 in 0..90i32) {
        let v = VitalSigns { oxygen_saturation: spo2, ..v };
        prop_assert_eq!(TriageClassifier::level(&v), AcuityLevel::Immediate);
    }

    #[test]
    fn raising_a_flag_never_lowers_the_level(v in vitals()) {
        let before = TriageClassifier::level(&v);
        let raised = ClinicalFlags {
            shock_signs: true,
            acute_chest_pain: true,
            seizure: true,
            major_trauma: true,
            moderate_severe_bleeding: true,
            severe_abdominal_pain: true,
            persistent_vomiting: true,
            respiratory_distress: true,
            notable_symptoms: true,
        };
        let after = TriageClassifier::level(&v.clone().with_flags(raised));
        prop_assert!(after >= before);
        prop_assert!(after >= AcuityLevel::VeryUrgent);
    }

    #[test]
    fn absent_systolic_never_decides(v in vitals()) {
        let v = VitalSigns { systolic_blood_pressure: None, ..v };
        prop_assert_ne!(TriageClassifier::classify(&v).matched_rule, Criterion::SystolicPressure);
    }

    #[test]
    fn matched_rule_belongs_to_assigned_tier(v in vitals()) {
        let result = TriageClassifier::classify(&v);
        let listed = TriageClassifier::describe()
            .into_iter()
            .any(|r| r.level == result.level && r.criterion == result.matched_rule);
        prop_assert!(listed, "{} is not a listed rule", result.rule_id());
    }
}
