use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::acuity::AcuityLevel;
use crate::engine::EngineKind;
use crate::patient::PatientData;
use crate::selector::Outcome;
use crate::vitals::VitalSigns;

/// Where a classified patient is in the department's workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Waiting,
    InCare,
    Completed,
    PendingRecheck,
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 4] = [
        RecordStatus::Waiting,
        RecordStatus::InCare,
        RecordStatus::Completed,
        RecordStatus::PendingRecheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Waiting => "waiting",
            RecordStatus::InCare => "in_care",
            RecordStatus::Completed => "completed",
            RecordStatus::PendingRecheck => "pending_recheck",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        RecordStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown record status: '{}'", s))
    }
}

/// A classified encounter, ready to hand to whatever stores triage history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub patient: PatientData,
    pub vitals: VitalSigns,
    pub observations: Option<String>,
    pub level: AcuityLevel,
    pub engine: EngineKind,
    pub matched_rule: Option<String>,
    pub target_wait_minutes: u32,
    pub status: RecordStatus,
}

impl TriageRecord {
    /// New records start out waiting.
    pub fn new(
        patient: PatientData,
        vitals: VitalSigns,
        observations: Option<String>,
        outcome: &Outcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            patient,
            vitals,
            observations,
            level: outcome.level,
            engine: outcome.engine,
            matched_rule: outcome.matched_rule.clone(),
            target_wait_minutes: outcome.level.target_wait_minutes(),
            status: RecordStatus::default(),
        }
    }

    /// Newest first, as the dashboards list them.
    pub fn sort_newest_first(records: &mut [TriageRecord]) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    /// Other encounters of the same patient (matched by CPF), newest first.
    /// The record itself is never part of its own history.
    pub fn history<'a>(&self, records: &'a [TriageRecord]) -> Vec<&'a TriageRecord> {
        let mut earlier: Vec<&TriageRecord> = records
            .iter()
            .rev()
            .filter(|r| r.id != self.id && r.patient.cpf == self.patient.cpf)
            .collect();
        earlier.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        earlier
    }
}
