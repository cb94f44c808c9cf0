//! Intake and triage history endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use triage_core::intake::IntakeForm;
use triage_core::stats::TriageStats;
use triage_core::{AssessmentRequest, RecordStatus, TriageRecord};

use crate::state::AppState;

use super::ApiError;

/// Validate both forms, classify with the configured engine and keep the
/// record.
pub async fn intake(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IntakeForm>, JsonRejection>,
) -> Result<(StatusCode, Json<TriageRecord>), ApiError> {
    let Json(form) = payload?;
    let submission = form.parse()?;
    let request =
        AssessmentRequest::new(submission.vitals.clone()).with_patient(submission.patient.clone());
    let outcome = state.selector.assess(&request).await?;

    let record = TriageRecord::new(
        submission.patient,
        submission.vitals,
        submission.observations,
        &outcome,
    );
    info!(id = %record.id, level = %record.level, engine = %record.engine, "triage recorded");
    state.store(record.clone()).await;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn records(State(state): State<Arc<AppState>>) -> Json<Vec<TriageRecord>> {
    Json(state.records_newest_first().await)
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: RecordStatus,
}

/// `PATCH /records/{id}/status`
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<TriageRecord>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let record = state
        .update_status(id, update.status)
        .await
        .ok_or_else(|| ApiError::not_found(format!("record {}", id)))?;
    info!(id = %id, status = %update.status, "record status changed");
    Ok(Json(record))
}

/// `GET /records/{id}/history`: the same patient's other encounters.
pub async fn record_history(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<TriageRecord>>, ApiError> {
    let Path(id) = id?;
    state
        .history(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("record {}", id)))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<TriageStats> {
    let records = state.records.read().await;
    Json(TriageStats::from_records(&records, Local::now().date_naive()))
}
