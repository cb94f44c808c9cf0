//! Readiness and rule-table endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use triage_core::EngineMode;
use triage_rules::{RuleDescription, TriageClassifier};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine: EngineMode,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine: state.selector.mode(),
    })
}

/// The deterministic discriminator table, in evaluation order.
pub async fn rules() -> Json<Vec<RuleDescription>> {
    Json(TriageClassifier::describe())
}
