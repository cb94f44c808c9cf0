//! Route handlers, grouped by concern.
//!
//! Shared error mapping lives here in mod.rs.

mod classify;
mod health;
mod records;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use triage_core::{EngineError, FieldError, IntakeError};

// ── Shared error response ────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// Handler failure rendered as `{error}` with a status matching its category.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub(crate) fn not_found(what: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{} not found", what))
    }

    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                fields: Vec::new(),
            },
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let status = match &err {
            EngineError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            EngineError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            EngineError::Upstream { .. }
            | EngineError::Transport(_)
            | EngineError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            EngineError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self::new(status, err.to_string())
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorBody {
                error: err.to_string(),
                fields: err.fields().to_vec(),
            },
        }
    }
}

/// Bodies that are not JSON (400) or do not fit the expected shape (422).
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ── Re-exports ───────────────────────────────────────────────────

pub use classify::{classify, classify_triage, ClassifyResponse, ClassifyTriageRequest};
pub use health::{health, rules};
pub use records::{intake, record_history, records, stats, update_status};
