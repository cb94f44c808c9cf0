use async_trait::async_trait;
use tracing::debug;
use triage_core::{Assessment, AssessmentRequest, EngineError, EngineKind, TriageEngine};

use crate::classifier::TriageClassifier;

/// [`TriageClassifier`] behind the shared engine interface. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

#[async_trait]
impl TriageEngine for RuleEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Rules
    }

    async fn assess(&self, request: &AssessmentRequest) -> Result<Assessment, EngineError> {
        let result = TriageClassifier::classify(&request.vitals);
        let rule_id = result.rule_id();
        debug!(rule = %rule_id, "rules engine matched");
        Ok(Assessment {
            level: result.level,
            engine: EngineKind::Rules,
            matched_rule: Some(rule_id),
        })
    }
}
