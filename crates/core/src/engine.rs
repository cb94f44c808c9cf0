//! The single classification interface shared by the deterministic rules and
//! the remote AI classifier.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::acuity::AcuityLevel;
use crate::error::EngineError;
use crate::patient::PatientData;
use crate::vitals::VitalSigns;

/// Which implementation produced a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Rules,
    Remote,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Rules => write!(f, "rules"),
            EngineKind::Remote => write!(f, "remote"),
        }
    }
}

/// Everything an engine may look at. The rules engine only reads `vitals`;
/// the remote classifier also sends patient demographics and symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    #[serde(default)]
    pub patient: Option<PatientData>,
    pub vitals: VitalSigns,
}

impl AssessmentRequest {
    pub fn new(vitals: VitalSigns) -> Self {
        Self { patient: None, vitals }
    }

    pub fn with_patient(mut self, patient: PatientData) -> Self {
        self.patient = Some(patient);
        self
    }
}

/// Level chosen by one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub level: AcuityLevel,
    pub engine: EngineKind,
    /// Audit identifier of the deciding rule; remote verdicts have none.
    pub matched_rule: Option<String>,
}

/// A classification strategy.
#[async_trait]
pub trait TriageEngine: Send + Sync {
    fn kind(&self) -> EngineKind;

    async fn assess(&self, request: &AssessmentRequest) -> Result<Assessment, EngineError>;
}
