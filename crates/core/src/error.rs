use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Failure of a triage engine to produce a level.
///
/// Each variant is a distinct, user-visible category; none of them is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("classification rate limit exceeded, try again shortly")]
    RateLimited,

    #[error("classification quota exhausted, add credits to the workspace")]
    QuotaExhausted,

    #[error("classification service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("classification service unreachable: {0}")]
    Transport(String),

    #[error("malformed classification response: {0}")]
    MalformedResponse(String),

    #[error("engine not configured: {0}")]
    NotConfigured(String),
}

impl EngineError {
    /// Short machine-readable category.
    pub fn category(&self) -> &'static str {
        match self {
            EngineError::RateLimited => "rate_limited",
            EngineError::QuotaExhausted => "quota_exhausted",
            EngineError::Upstream { .. } => "upstream",
            EngineError::Transport(_) => "transport",
            EngineError::MalformedResponse(_) => "malformed_response",
            EngineError::NotConfigured(_) => "not_configured",
        }
    }
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: "is required".to_string(),
        }
    }

    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Form input that could not be turned into typed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("invalid form: {}", join_fields(.0))]
    Invalid(Vec<FieldError>),
}

impl IntakeError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            IntakeError::Invalid(fields) => fields,
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_error_lists_every_field() {
        let err = IntakeError::Invalid(vec![
            FieldError::required("name"),
            FieldError::invalid("heartRate", "must be a whole number"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid form: name is required, heartRate must be a whole number"
        );
        assert_eq!(err.fields().len(), 2);
    }

    #[test]
    fn categories_are_distinct() {
        let errors = [
            EngineError::RateLimited,
            EngineError::QuotaExhausted,
            EngineError::Upstream { status: 500, message: String::new() },
            EngineError::Transport(String::new()),
            EngineError::MalformedResponse(String::new()),
            EngineError::NotConfigured(String::new()),
        ];
        let mut categories: Vec<_> = errors.iter().map(|e| e.category()).collect();
        categories.sort();
        categories.dedup();
        assert_eq!(categories.len(), errors.len());
    }
}
