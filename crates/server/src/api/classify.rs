//! Classification endpoints.
//!
//! `POST /classify` runs the deterministic table on typed vitals.
//! `POST /classify-triage` accepts the loosely typed payload the intake front
//! end sends and answers with a single colour, using the configured engine.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use triage_core::intake::{IntakeForm, RegistrationForm, VitalsForm};
use triage_core::{AssessmentRequest, IntakeError, VitalSigns};
use triage_rules::TriageClassifier;

use crate::state::AppState;

use super::ApiError;

// ── POST /classify ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub level: &'static str,
    pub color: &'static str,
    pub target_wait_minutes: u32,
    pub matched_rule: String,
}

pub async fn classify(
    payload: Result<Json<VitalSigns>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Json(vitals) = payload?;
    let result = TriageClassifier::classify(&vitals);
    Ok(Json(ClassifyResponse {
        level: result.level.name(),
        color: result.level.color(),
        target_wait_minutes: result.level.target_wait_minutes(),
        matched_rule: result.rule_id(),
    }))
}

// ── POST /classify-triage ────────────────────────────────────────

/// Vital readings as the browser form sends them: numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LooseVitals {
    pub blood_pressure: Value,
    pub heart_rate: Value,
    pub oxygen_saturation: Value,
    pub temperature: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyTriageRequest {
    #[serde(default)]
    pub patient_data: Option<RegistrationForm>,
    #[serde(default)]
    pub vital_signs: LooseVitals,
    #[serde(default)]
    pub symptoms: Value,
    #[serde(default)]
    pub pain_level: Value,
}

#[derive(Debug, Serialize)]
pub struct ClassifyTriageResponse {
    pub classification: &'static str,
}

/// Render a JSON scalar the way a form field would hold it.
fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ClassifyTriageRequest {
    fn vitals_form(&self) -> VitalsForm {
        VitalsForm {
            blood_pressure: text(&self.vital_signs.blood_pressure),
            heart_rate: text(&self.vital_signs.heart_rate),
            oxygen_saturation: text(&self.vital_signs.oxygen_saturation),
            temperature: text(&self.vital_signs.temperature),
            pain_level: text(&self.pain_level),
            symptoms: text(&self.symptoms),
            ..Default::default()
        }
    }

    /// Parse into an engine request. Patient details are optional here; when
    /// present they are validated together with the vitals.
    pub fn into_request(self) -> Result<AssessmentRequest, IntakeError> {
        let vitals = self.vitals_form();
        match self.patient_data {
            Some(registration) => {
                let submission = IntakeForm {
                    registration,
                    vitals,
                }
                .parse()?;
                Ok(AssessmentRequest::new(submission.vitals).with_patient(submission.patient))
            }
            None => Ok(AssessmentRequest::new(vitals.parse()?)),
        }
    }
}

pub async fn classify_triage(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ClassifyTriageRequest>, JsonRejection>,
) -> Result<Json<ClassifyTriageResponse>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let outcome = state.selector.assess(&request).await?;
    Ok(Json(ClassifyTriageResponse {
        classification: outcome.level.color(),
    }))
}
