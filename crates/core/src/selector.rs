//! Engine selection: run the deterministic rules, the remote classifier, or
//! both side by side.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::acuity::AcuityLevel;
use crate::engine::{Assessment, AssessmentRequest, EngineKind, TriageEngine};
use crate::error::EngineError;

/// Configured classification strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    Rules,
    Remote,
    Compare,
}

impl EngineMode {
    pub fn needs_remote(&self) -> bool {
        matches!(self, EngineMode::Remote | EngineMode::Compare)
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMode::Rules => write!(f, "rules"),
            EngineMode::Remote => write!(f, "remote"),
            EngineMode::Compare => write!(f, "compare"),
        }
    }
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rules" | "local" => Ok(EngineMode::Rules),
            "remote" | "ai" => Ok(EngineMode::Remote),
            "compare" => Ok(EngineMode::Compare),
            other => Err(format!("unknown triage engine: '{}'", other)),
        }
    }
}

/// Remote failure reported alongside a rules result in compare mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFailure {
    pub category: &'static str,
    pub message: String,
}

impl From<&EngineError> for RemoteFailure {
    fn from(err: &EngineError) -> Self {
        Self {
            category: err.category(),
            message: err.to_string(),
        }
    }
}

/// Final verdict for an encounter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub level: AcuityLevel,
    /// Engine whose level was adopted.
    pub engine: EngineKind,
    pub matched_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_level: Option<AcuityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_level: Option<AcuityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_error: Option<RemoteFailure>,
}

impl Outcome {
    fn single(assessment: Assessment) -> Self {
        Self {
            level: assessment.level,
            engine: assessment.engine,
            matched_rule: assessment.matched_rule,
            rules_level: None,
            remote_level: None,
            agreement: None,
            remote_error: None,
        }
    }
}

/// Dispatches requests to the engines chosen by [`EngineMode`].
#[derive(Clone)]
pub struct EngineSelector {
    mode: EngineMode,
    rules: Arc<dyn TriageEngine>,
    remote: Option<Arc<dyn TriageEngine>>,
}

impl EngineSelector {
    /// Fails with [`EngineError::NotConfigured`] when the mode needs a remote
    /// engine and none was supplied.
    pub fn new(
        mode: EngineMode,
        rules: Arc<dyn TriageEngine>,
        remote: Option<Arc<dyn TriageEngine>>,
    ) -> Result<Self, EngineError> {
        if mode.needs_remote() && remote.is_none() {
            return Err(EngineError::NotConfigured(format!(
                "engine mode '{}' requires a remote classifier",
                mode
            )));
        }
        Ok(Self { mode, rules, remote })
    }

    pub fn rules_only(rules: Arc<dyn TriageEngine>) -> Self {
        Self {
            mode: EngineMode::Rules,
            rules,
            remote: None,
        }
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub async fn assess(&self, request: &AssessmentRequest) -> Result<Outcome, EngineError> {
        let outcome = match (self.mode, &self.remote) {
            (EngineMode::Remote, Some(remote)) => Outcome::single(remote.assess(request).await?),
            (EngineMode::Compare, Some(remote)) => self.compare(remote.as_ref(), request).await?,
            _ => Outcome::single(self.rules.assess(request).await?),
        };
        info!(
            mode = %self.mode,
            engine = %outcome.engine,
            level = %outcome.level,
            rule = outcome.matched_rule.as_deref().unwrap_or("-"),
            "encounter classified"
        );
        Ok(outcome)
    }

    /// Run both engines and adopt the more urgent level. A remote failure
    /// leaves the rules level in place and is reported, not propagated.
    async fn compare(
        &self,
        remote: &dyn TriageEngine,
        request: &AssessmentRequest,
    ) -> Result<Outcome, EngineError> {
        let reference = self.rules.assess(request).await?;
        let rules_level = reference.level;

        match remote.assess(request).await {
            Ok(verdict) => {
                let agreement = verdict.level == rules_level;
                if !agreement {
                    warn!(
                        rules = %rules_level,
                        remote = %verdict.level,
                        "engines disagree, keeping the more urgent level"
                    );
                }
                let adopted = if verdict.level > rules_level {
                    verdict.clone()
                } else {
                    reference
                };
                Ok(Outcome {
                    level: adopted.level,
                    engine: adopted.engine,
                    matched_rule: adopted.matched_rule,
                    rules_level: Some(rules_level),
                    remote_level: Some(verdict.level),
                    agreement: Some(agreement),
                    remote_error: None,
                })
            }
            Err(err) => {
                warn!(
                    category = err.category(),
                    error = %err,
                    "remote classifier failed, using rules level"
                );
                Ok(Outcome {
                    level: rules_level,
                    engine: EngineKind::Rules,
                    matched_rule: reference.matched_rule,
                    rules_level: Some(rules_level),
                    remote_level: None,
                    agreement: None,
                    remote_error: Some(RemoteFailure::from(&err)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::vitals::VitalSigns;

    struct Fixed {
        kind: EngineKind,
        result: Result<AcuityLevel, EngineError>,
    }

    #[async_trait]
    impl TriageEngine for Fixed {
        fn kind(&self) -> EngineKind {
            self.kind
        }

        async fn assess(&self, _request: &AssessmentRequest) -> Result<Assessment, EngineError> {
            let level = self.result.clone()?;
            Ok(Assessment {
                level,
                engine: self.kind,
                matched_rule: match self.kind {
                    EngineKind::Rules => Some(format!("{}.fixed", level.color())),
                    EngineKind::Remote => None,
                },
            })
        }
    }

    fn rules(level: AcuityLevel) -> Arc<dyn TriageEngine> {
        Arc::new(Fixed { kind: EngineKind::Rules, result: Ok(level) })
    }

    fn remote(result: Result<AcuityLevel, EngineError>) -> Arc<dyn TriageEngine> {
        Arc::new(Fixed { kind: EngineKind::Remote, result })
    }

    fn request() -> AssessmentRequest {
        AssessmentRequest::new(VitalSigns::new(75, 98, 36.5))
    }

    #[test]
    fn mode_parses_aliases() {
        assert_eq!("AI".parse::<EngineMode>(), Ok(EngineMode::Remote));
        assert_eq!("local".parse::<EngineMode>(), Ok(EngineMode::Rules));
        assert_eq!(" compare ".parse::<EngineMode>(), Ok(EngineMode::Compare));
        assert!("voting".parse::<EngineMode>().is_err());
    }

    #[test]
    fn remote_mode_without_remote_engine_is_rejected() {
        let err = EngineSelector::new(EngineMode::Compare, rules(AcuityLevel::Urgent), None)
            .err()
            .unwrap();
        assert_eq!(err.category(), "not_configured");
    }

    #[tokio::test]
    async fn rules_mode_ignores_remote() {
        let selector = EngineSelector::new(
            EngineMode::Rules,
            rules(AcuityLevel::Standard),
            Some(remote(Ok(AcuityLevel::Immediate))),
        )
        .unwrap();
        let outcome = selector.assess(&request()).await.unwrap();
        assert_eq!(outcome.level, AcuityLevel::Standard);
        assert_eq!(outcome.engine, EngineKind::Rules);
        assert_eq!(outcome.matched_rule.as_deref(), Some("green.fixed"));
    }

    #[tokio::test]
    async fn remote_mode_surfaces_errors() {
        let selector = EngineSelector::new(
            EngineMode::Remote,
            rules(AcuityLevel::Standard),
            Some(remote(Err(EngineError::RateLimited))),
        )
        .unwrap();
        let err = selector.assess(&request()).await.unwrap_err();
        assert_eq!(err, EngineError::RateLimited);
    }

    #[tokio::test]
    async fn compare_keeps_the_more_urgent_level() {
        let selector = EngineSelector::new(
            EngineMode::Compare,
            rules(AcuityLevel::Standard),
            Some(remote(Ok(AcuityLevel::VeryUrgent))),
        )
        .unwrap();
        let outcome = selector.assess(&request()).await.unwrap();
        assert_eq!(outcome.level, AcuityLevel::VeryUrgent);
        assert_eq!(outcome.engine, EngineKind::Remote);
        assert_eq!(outcome.agreement, Some(false));
        assert_eq!(outcome.rules_level, Some(AcuityLevel::Standard));

        // Remote less urgent than the rules: the rules level stands.
        let selector = EngineSelector::new(
            EngineMode::Compare,
            rules(AcuityLevel::Immediate),
            Some(remote(Ok(AcuityLevel::NonUrgent))),
        )
        .unwrap();
        let outcome = selector.assess(&request()).await.unwrap();
        assert_eq!(outcome.level, AcuityLevel::Immediate);
        assert_eq!(outcome.engine, EngineKind::Rules);
        assert_eq!(outcome.remote_level, Some(AcuityLevel::NonUrgent));
    }

    #[tokio::test]
    async fn compare_falls_back_to_rules_on_remote_failure() {
        let selector = EngineSelector::new(
            EngineMode::Compare,
            rules(AcuityLevel::Urgent),
            Some(remote(Err(EngineError::QuotaExhausted))),
        )
        .unwrap();
        let outcome = selector.assess(&request()).await.unwrap();
        assert_eq!(outcome.level, AcuityLevel::Urgent);
        assert_eq!(outcome.engine, EngineKind::Rules);
        let failure = outcome.remote_error.unwrap();
        assert_eq!(failure.category, "quota_exhausted");
        assert_eq!(outcome.agreement, None);
    }
}
