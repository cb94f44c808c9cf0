//! Boundary and ordering tests for the classifier.

use triage_core::{AcuityLevel, ClinicalFlags, Consciousness, Criterion, VitalSigns};

use super::TriageClassifier;

/// BP 120 systolic, HR 75, SpO2 98, 36.5 °C, no pain.
fn nominal() -> VitalSigns {
    VitalSigns::new(75, 98, 36.5).with_systolic(120).with_pain(0)
}

fn level(vitals: &VitalSigns) -> AcuityLevel {
    TriageClassifier::classify(vitals).level
}

fn with_spo2(spo2: i32) -> VitalSigns {
    VitalSigns { oxygen_saturation: spo2, ..nominal() }
}

fn with_hr(hr: i32) -> VitalSigns {
    VitalSigns { heart_rate: hr, ..nominal() }
}

fn with_temp(temp: f64) -> VitalSigns {
    VitalSigns { temperature: temp, ..nominal() }
}

fn with_flags(flags: ClinicalFlags) -> VitalSigns {
    nominal().with_flags(flags)
}

/// A single raised flag.
fn flag(raise: impl FnOnce(&mut ClinicalFlags)) -> ClinicalFlags {
    let mut flags = ClinicalFlags::default();
    raise(&mut flags);
    flags
}

// ── Default path ────────────────────────────────────────────────────

#[test]
fn nominal_vitals_are_non_urgent() {
    let result = TriageClassifier::classify(&nominal());
    assert_eq!(result.level, AcuityLevel::NonUrgent);
    assert_eq!(result.matched_rule, Criterion::NominalVitals);
    assert_eq!(result.rule_id(), "blue.nominal_vitals");
}

#[test]
fn mild_pain_stays_non_urgent() {
    for pain in 0..=2 {
        assert_eq!(level(&nominal().with_pain(pain)), AcuityLevel::NonUrgent, "pain {pain}");
    }
}

#[test]
fn absent_pain_counts_as_zero() {
    let vitals = VitalSigns { pain_level: None, ..nominal() };
    assert_eq!(level(&vitals), AcuityLevel::NonUrgent);
}

// ── Oxygen saturation ───────────────────────────────────────────────

#[test]
fn spo2_boundaries() {
    assert_eq!(level(&with_spo2(89)), AcuityLevel::Immediate);
    assert_eq!(level(&with_spo2(90)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_spo2(93)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_spo2(94)), AcuityLevel::Urgent);
    assert_eq!(level(&with_spo2(95)), AcuityLevel::Urgent);
    assert_eq!(level(&with_spo2(96)), AcuityLevel::NonUrgent);
}

#[test]
fn spo2_reports_its_rule() {
    let result = TriageClassifier::classify(&with_spo2(89));
    assert_eq!(result.matched_rule, Criterion::OxygenSaturation);
    assert_eq!(result.rule_id(), "red.oxygen_saturation");
}

#[test]
fn implausible_spo2_is_taken_literally() {
    assert_eq!(level(&with_spo2(0)), AcuityLevel::Immediate);
    assert_eq!(level(&with_spo2(-4)), AcuityLevel::Immediate);
    assert_eq!(level(&with_spo2(130)), AcuityLevel::NonUrgent);
}

// ── Heart rate ──────────────────────────────────────────────────────

#[test]
fn heart_rate_low_boundaries() {
    assert_eq!(level(&with_hr(39)), AcuityLevel::Immediate);
    assert_eq!(level(&with_hr(40)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_hr(49)), AcuityLevel::VeryUrgent);
    // 50 sits between the orange and yellow bands and matches neither.
    assert_eq!(level(&with_hr(50)), AcuityLevel::NonUrgent);
    assert_eq!(level(&with_hr(51)), AcuityLevel::Urgent);
    assert_eq!(level(&with_hr(60)), AcuityLevel::Urgent);
    assert_eq!(level(&with_hr(61)), AcuityLevel::NonUrgent);
}

#[test]
fn heart_rate_high_boundaries() {
    assert_eq!(level(&with_hr(119)), AcuityLevel::NonUrgent);
    assert_eq!(level(&with_hr(120)), AcuityLevel::Urgent);
    assert_eq!(level(&with_hr(129)), AcuityLevel::Urgent);
    // 130 is excluded from both neighbouring bands.
    assert_eq!(level(&with_hr(130)), AcuityLevel::NonUrgent);
    assert_eq!(level(&with_hr(131)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_hr(140)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_hr(141)), AcuityLevel::Immediate);
}

// ── Blood pressure ──────────────────────────────────────────────────

#[test]
fn systolic_boundaries() {
    let bp = |s| nominal().with_systolic(s);
    assert_eq!(level(&bp(79)), AcuityLevel::Immediate);
    assert_eq!(level(&bp(80)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&bp(89)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&bp(90)), AcuityLevel::NonUrgent);
}

#[test]
fn missing_systolic_never_matches_pressure_rules() {
    let vitals = VitalSigns { systolic_blood_pressure: None, ..nominal() };
    let result = TriageClassifier::classify(&vitals);
    assert_eq!(result.level, AcuityLevel::NonUrgent);
    assert_ne!(result.matched_rule, Criterion::SystolicPressure);

    // The remaining criteria still decide.
    let vitals = VitalSigns { systolic_blood_pressure: None, ..with_spo2(94) };
    assert_eq!(level(&vitals), AcuityLevel::Urgent);
}

// ── Temperature ─────────────────────────────────────────────────────

#[test]
fn temperature_boundaries() {
    assert_eq!(level(&with_temp(41.1)), AcuityLevel::Immediate);
    assert_eq!(level(&with_temp(41.0)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_temp(39.0)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&with_temp(38.99)), AcuityLevel::Urgent);
    assert_eq!(level(&with_temp(38.0)), AcuityLevel::Urgent);
    assert_eq!(level(&with_temp(37.99)), AcuityLevel::NonUrgent);
}

#[test]
fn nan_temperature_matches_no_temperature_rule() {
    let result = TriageClassifier::classify(&with_temp(f64::NAN));
    assert_eq!(result.level, AcuityLevel::NonUrgent);
    assert_ne!(result.matched_rule, Criterion::Temperature);
}

// ── Pain ────────────────────────────────────────────────────────────

#[test]
fn pain_bands() {
    let pain = |p| nominal().with_pain(p);
    assert_eq!(level(&pain(3)), AcuityLevel::Standard);
    assert_eq!(level(&pain(5)), AcuityLevel::Standard);
    assert_eq!(level(&pain(6)), AcuityLevel::Urgent);
    assert_eq!(level(&pain(7)), AcuityLevel::Urgent);
    assert_eq!(level(&pain(8)), AcuityLevel::VeryUrgent);
    assert_eq!(level(&pain(9)), AcuityLevel::VeryUrgent);
}

#[test]
fn maximal_pain_without_shock_is_very_urgent() {
    let result = TriageClassifier::classify(&nominal().with_pain(10));
    assert_eq!(result.level, AcuityLevel::VeryUrgent);
    assert_eq!(result.matched_rule, Criterion::PainLevel);
}

#[test]
fn maximal_pain_with_shock_is_immediate() {
    let flags = ClinicalFlags { shock_signs: true, ..ClinicalFlags::default() };
    let result = TriageClassifier::classify(&nominal().with_pain(10).with_flags(flags));
    assert_eq!(result.level, AcuityLevel::Immediate);
    assert_eq!(result.matched_rule, Criterion::PainWithShock);

    // Shock signs alone do not escalate.
    let vitals = nominal().with_pain(9).with_flags(flags);
    assert_eq!(level(&vitals), AcuityLevel::VeryUrgent);
}

// ── Consciousness ───────────────────────────────────────────────────

#[test]
fn consciousness_levels() {
    let c = |state| nominal().with_consciousness(state);
    assert_eq!(level(&c(Consciousness::Unconscious)), AcuityLevel::Immediate);
    assert_eq!(level(&c(Consciousness::SeverelyAltered)), AcuityLevel::Immediate);
    assert_eq!(level(&c(Consciousness::Altered)), AcuityLevel::NonUrgent);
    assert_eq!(level(&c(Consciousness::Alert)), AcuityLevel::NonUrgent);
}

// ── Qualitative flags ───────────────────────────────────────────────

#[test]
fn orange_flags() {
    let cases = [
        (flag(|f| f.acute_chest_pain = true), Criterion::AcuteChestPain),
        (flag(|f| f.seizure = true), Criterion::Seizure),
        (flag(|f| f.major_trauma = true), Criterion::MajorTrauma),
        (flag(|f| f.moderate_severe_bleeding = true), Criterion::Bleeding),
    ];
    for (flags, criterion) in cases {
        let result = TriageClassifier::classify(&with_flags(flags));
        assert_eq!(result.level, AcuityLevel::VeryUrgent, "{criterion}");
        assert_eq!(result.matched_rule, criterion);
    }
}

#[test]
fn yellow_flags() {
    let cases = [
        (flag(|f| f.severe_abdominal_pain = true), Criterion::AbdominalPain),
        (flag(|f| f.persistent_vomiting = true), Criterion::PersistentVomiting),
        (flag(|f| f.respiratory_distress = true), Criterion::RespiratoryDistress),
    ];
    for (flags, criterion) in cases {
        let result = TriageClassifier::classify(&with_flags(flags));
        assert_eq!(result.level, AcuityLevel::Urgent, "{criterion}");
        assert_eq!(result.matched_rule, criterion);
    }
}

#[test]
fn notable_symptoms_with_normal_vitals_are_standard() {
    let flags = ClinicalFlags { notable_symptoms: true, ..Default::default() };
    let result = TriageClassifier::classify(&with_flags(flags));
    assert_eq!(result.level, AcuityLevel::Standard);
    assert_eq!(result.matched_rule, Criterion::NotableSymptoms);
}

#[test]
fn free_text_symptoms_are_ignored() {
    let vitals = nominal().with_symptoms("crushing chest pain, collapsed at home");
    assert_eq!(level(&vitals), AcuityLevel::NonUrgent);
}

// ── Ordering ────────────────────────────────────────────────────────

#[test]
fn most_severe_tier_wins() {
    // SpO2 85 is red, pain 4 alone would be green.
    let vitals = with_spo2(85).with_pain(4);
    assert_eq!(level(&vitals), AcuityLevel::Immediate);

    // Orange temperature with yellow heart rate and green pain.
    let vitals = VitalSigns { temperature: 39.5, heart_rate: 125, ..nominal() }.with_pain(4);
    let result = TriageClassifier::classify(&vitals);
    assert_eq!(result.level, AcuityLevel::VeryUrgent);
    assert_eq!(result.matched_rule, Criterion::Temperature);
}

#[test]
fn first_criterion_in_tier_is_reported() {
    let vitals = VitalSigns { oxygen_saturation: 80, heart_rate: 30, ..nominal() };
    let result = TriageClassifier::classify(&vitals);
    assert_eq!(result.matched_rule, Criterion::OxygenSaturation);
}

#[test]
fn classification_is_repeatable() {
    let vitals = VitalSigns { temperature: 38.4, ..nominal() }.with_pain(6);
    let first = TriageClassifier::classify(&vitals);
    let second = TriageClassifier::classify(&vitals);
    assert_eq!(first, second);
}

// ── Rule listing ────────────────────────────────────────────────────

#[test]
fn describe_lists_tiers_in_order() {
    let rules = TriageClassifier::describe();
    assert_eq!(rules.first().unwrap().rule_id, "red.oxygen_saturation");
    assert_eq!(rules.last().unwrap().rule_id, "blue.nominal_vitals");

    let levels: Vec<_> = rules.iter().map(|r| r.level).collect();
    let mut sorted = levels.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(levels, sorted, "rules must be listed most severe first");

    let mut ids: Vec<_> = rules.iter().map(|r| r.rule_id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), rules.len(), "rule ids must be unique");
}
