//! Raw intake forms and their conversion into typed values.
//!
//! Forms arrive as strings exactly as typed at the desk. Parsing checks that
//! required fields are present and that numbers are numbers; it does not judge
//! whether a reading is physiologically plausible. Every problem is collected
//! so the user can fix the whole form in one pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, IntakeError};
use crate::patient::PatientData;
use crate::vitals::{ClinicalFlags, Consciousness, VitalSigns};

/// Patient registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub cpf: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub birth_date: String,
    pub gender: String,
    pub phone: String,
}

/// Vital signs and clinical assessment form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VitalsForm {
    /// `systolic/diastolic` or systolic alone.
    pub blood_pressure: String,
    pub heart_rate: String,
    pub oxygen_saturation: String,
    pub temperature: String,
    pub pain_level: String,
    pub consciousness: String,
    pub symptoms: String,
    pub observations: String,
    pub flags: ClinicalFlags,
}

/// Registration and vitals submitted together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntakeForm {
    pub registration: RegistrationForm,
    pub vitals: VitalsForm,
}

/// A fully parsed intake.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSubmission {
    pub patient: PatientData,
    pub vitals: VitalSigns,
    pub observations: Option<String>,
}

impl RegistrationForm {
    pub fn parse(&self) -> Result<PatientData, IntakeError> {
        let mut errors = Vec::new();
        let patient = self.collect(&mut errors);
        match patient {
            Some(patient) if errors.is_empty() => Ok(patient),
            _ => Err(IntakeError::Invalid(errors)),
        }
    }

    fn collect(&self, errors: &mut Vec<FieldError>) -> Option<PatientData> {
        let name = required(&self.name, "name", errors);
        let cpf = required(&self.cpf, "cpf", errors);
        let birth_date = required(&self.birth_date, "birthDate", errors).and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| {
                    errors.push(FieldError::invalid("birthDate", "must be a date (YYYY-MM-DD)"))
                })
                .ok()
        });
        let gender = required(&self.gender, "gender", errors);

        Some(PatientData {
            name: name?.to_string(),
            cpf: cpf?.to_string(),
            birth_date: birth_date?,
            gender: gender?.to_string(),
            phone: optional(&self.phone),
        })
    }
}

impl VitalsForm {
    pub fn parse(&self) -> Result<VitalSigns, IntakeError> {
        let mut errors = Vec::new();
        let vitals = self.collect(&mut errors);
        match vitals {
            Some(vitals) if errors.is_empty() => Ok(vitals),
            _ => Err(IntakeError::Invalid(errors)),
        }
    }

    fn collect(&self, errors: &mut Vec<FieldError>) -> Option<VitalSigns> {
        let systolic = required(&self.blood_pressure, "bloodPressure", errors)
            .and_then(|raw| record(parse_systolic(raw), "bloodPressure", errors));
        let heart_rate = required(&self.heart_rate, "heartRate", errors)
            .and_then(|raw| record(parse_whole(raw), "heartRate", errors));
        let saturation = required(&self.oxygen_saturation, "oxygenSaturation", errors)
            .and_then(|raw| record(parse_whole(raw), "oxygenSaturation", errors));
        let temperature = required(&self.temperature, "temperature", errors)
            .and_then(|raw| record(parse_decimal(raw), "temperature", errors));
        let symptoms = required(&self.symptoms, "symptoms", errors);

        let pain = match self.pain_level.trim() {
            "" => None,
            raw => record(parse_pain(raw), "painLevel", errors),
        };
        let consciousness = match self.consciousness.trim() {
            "" => None,
            raw => record(parse_consciousness(raw), "consciousness", errors),
        };

        Some(VitalSigns {
            systolic_blood_pressure: Some(systolic?),
            heart_rate: heart_rate?,
            oxygen_saturation: saturation?,
            temperature: temperature?,
            pain_level: pain,
            consciousness,
            flags: self.flags,
            free_text_symptoms: symptoms?.to_string(),
        })
    }
}

impl IntakeForm {
    /// Parse both halves, reporting the errors of both.
    pub fn parse(&self) -> Result<IntakeSubmission, IntakeError> {
        let mut errors = Vec::new();
        let patient = self.registration.collect(&mut errors);
        let vitals = self.vitals.collect(&mut errors);

        match (patient, vitals) {
            (Some(patient), Some(vitals)) if errors.is_empty() => Ok(IntakeSubmission {
                patient,
                vitals,
                observations: optional(&self.vitals.observations),
            }),
            _ => Err(IntakeError::Invalid(errors)),
        }
    }
}

// ── Field parsers ───────────────────────────────────────────────────

fn required<'a>(
    raw: &'a str,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::required(field));
        None
    } else {
        Some(trimmed)
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn record<T>(
    parsed: Result<T, String>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    parsed
        .map_err(|message| errors.push(FieldError::invalid(field, message)))
        .ok()
}

fn parse_whole(raw: &str) -> Result<i32, String> {
    raw.parse::<i32>()
        .map_err(|_| "must be a whole number".to_string())
}

/// Accepts `120/80`, `120 / 80` or `120`; only the systolic value is kept,
/// but a diastolic value, when given, must be a whole number too.
fn parse_systolic(raw: &str) -> Result<i32, String> {
    let invalid = |_| "must look like 120/80".to_string();
    let systolic = match raw.split_once('/') {
        Some((systolic, diastolic)) => {
            diastolic.trim().parse::<i32>().map_err(invalid)?;
            systolic
        }
        None => raw,
    };
    systolic.trim().parse::<i32>().map_err(invalid)
}

/// Decimal with either `.` or `,` as separator. Non-finite values are refused.
fn parse_decimal(raw: &str) -> Result<f64, String> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| "must be a number".to_string())
}

fn parse_pain(raw: &str) -> Result<i32, String> {
    let pain = parse_whole(raw)?;
    if (0..=10).contains(&pain) {
        Ok(pain)
    } else {
        Err("must be between 0 and 10".to_string())
    }
}

fn parse_consciousness(raw: &str) -> Result<Consciousness, String> {
    match raw.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
        "alert" => Ok(Consciousness::Alert),
        "altered" => Ok(Consciousness::Altered),
        "severely_altered" => Ok(Consciousness::SeverelyAltered),
        "unconscious" => Ok(Consciousness::Unconscious),
        _ => Err("must be alert, altered, severely_altered or unconscious".to_string()),
    }
}
