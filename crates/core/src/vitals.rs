//! Vital signs captured at intake, plus the qualitative findings that the
//! Manchester discriminators use alongside them.

use serde::{Deserialize, Serialize};

/// Level of consciousness as assessed by the triage nurse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consciousness {
    Alert,
    /// Confused or drowsy but responsive to voice.
    Altered,
    /// Responds to pain only.
    SeverelyAltered,
    Unconscious,
}

/// Qualitative findings. Every flag defaults to `false`: a finding that was
/// not recorded is treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClinicalFlags {
    pub shock_signs: bool,
    pub acute_chest_pain: bool,
    pub seizure: bool,
    pub major_trauma: bool,
    pub moderate_severe_bleeding: bool,
    pub severe_abdominal_pain: bool,
    pub persistent_vomiting: bool,
    /// Asthma or COPD presenting with dyspnoea.
    pub respiratory_distress: bool,
    /// Vitals are normal but the complaint is more than trivial.
    pub notable_symptoms: bool,
}

/// One set of observations for a triage encounter.
///
/// Values are taken literally: nothing here checks physiological plausibility.
/// Built once per encounter and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    #[serde(default)]
    pub systolic_blood_pressure: Option<i32>,
    pub heart_rate: i32,
    pub oxygen_saturation: i32,
    pub temperature: f64,
    #[serde(default)]
    pub pain_level: Option<i32>,
    #[serde(default)]
    pub consciousness: Option<Consciousness>,
    #[serde(default)]
    pub flags: ClinicalFlags,
    #[serde(default)]
    pub free_text_symptoms: String,
}

impl VitalSigns {
    /// Start from the three measurements every triage form requires.
    pub fn new(heart_rate: i32, oxygen_saturation: i32, temperature: f64) -> Self {
        Self {
            systolic_blood_pressure: None,
            heart_rate,
            oxygen_saturation,
            temperature,
            pain_level: None,
            consciousness: None,
            flags: ClinicalFlags::default(),
            free_text_symptoms: String::new(),
        }
    }

    pub fn with_systolic(mut self, mmhg: i32) -> Self {
        self.systolic_blood_pressure = Some(mmhg);
        self
    }

    pub fn with_pain(mut self, level: i32) -> Self {
        self.pain_level = Some(level);
        self
    }

    pub fn with_consciousness(mut self, consciousness: Consciousness) -> Self {
        self.consciousness = Some(consciousness);
        self
    }

    pub fn with_flags(mut self, flags: ClinicalFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.free_text_symptoms = symptoms.into();
        self
    }

    /// Pain score with the documented default of 0 when not recorded.
    pub fn pain(&self) -> i32 {
        self.pain_level.unwrap_or(0)
    }
}
