//! Model-backed classifier.

use std::fmt::Write as _;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};
use triage_core::config::{LlmConfig, OllamaConfig};
use triage_core::{
    AcuityLevel, Assessment, AssessmentRequest, ClinicalFlags, EngineError, EngineKind,
    TriageEngine,
};

use crate::provider::{LlmError, LlmProvider, Message};
use crate::providers::create_provider;

const SYSTEM_PROMPT: &str = include_str!("../prompts/manchester-system.md");

/// Asks a chat model for the Manchester colour of one encounter.
///
/// The reply is normalized (trimmed, lowercased). Anything other than one of
/// the five colour words is replaced by [`AcuityLevel::FALLBACK`].
pub struct RemoteClassifier {
    provider: Box<dyn LlmProvider>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl RemoteClassifier {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    pub fn from_config(llm: &LlmConfig, ollama: &OllamaConfig) -> Result<Self, LlmError> {
        let provider = create_provider(llm, ollama)?;
        info!(
            provider = provider.name(),
            model = provider.model(),
            "remote classifier ready"
        );
        Ok(Self::new(provider, llm.temperature, llm.max_tokens))
    }

    pub fn system_prompt() -> &'static str {
        SYSTEM_PROMPT
    }
}

/// Map the model's reply to a level, falling back to yellow on anything else.
pub fn parse_label(raw: &str) -> AcuityLevel {
    match AcuityLevel::from_label(raw) {
        Some(level) => level,
        None => {
            warn!(
                reply_len = raw.len(),
                fallback = AcuityLevel::FALLBACK.color(),
                "unrecognized classification label"
            );
            AcuityLevel::FALLBACK
        }
    }
}

/// Render the encounter for the model. `today` anchors the age calculation.
pub fn user_prompt(request: &AssessmentRequest, today: NaiveDate) -> String {
    let vitals = &request.vitals;
    let mut out = String::from("Classify this patient:\n\nPatient:\n");

    match &request.patient {
        Some(patient) => {
            let _ = writeln!(out, "- Name: {}", patient.name);
            let _ = writeln!(out, "- Age: {} years", patient.age_on(today));
            let _ = writeln!(out, "- Gender: {}", patient.gender);
        }
        None => out.push_str("- Not identified\n"),
    }

    out.push_str("\nVital signs:\n");
    match vitals.systolic_blood_pressure {
        Some(sbp) => {
            let _ = writeln!(out, "- Systolic blood pressure: {sbp} mmHg");
        }
        None => out.push_str("- Systolic blood pressure: not recorded\n"),
    }
    let _ = writeln!(out, "- Heart rate: {} bpm", vitals.heart_rate);
    let _ = writeln!(out, "- Oxygen saturation: {}%", vitals.oxygen_saturation);
    let _ = writeln!(out, "- Temperature: {} °C", vitals.temperature);

    out.push_str("\nClinical assessment:\n");
    if let Some(consciousness) = vitals.consciousness {
        let _ = writeln!(out, "- Consciousness: {consciousness:?}");
    }
    let findings = findings(&vitals.flags);
    if !findings.is_empty() {
        let _ = writeln!(out, "- Findings: {}", findings.join(", "));
    }
    let _ = writeln!(out, "- Symptoms: {}", vitals.free_text_symptoms);
    let _ = writeln!(out, "- Pain: {}/10", vitals.pain());

    out.push_str("\nWhich Manchester category applies?");
    out
}

fn findings(flags: &ClinicalFlags) -> Vec<&'static str> {
    [
        (flags.shock_signs, "signs of shock"),
        (flags.acute_chest_pain, "acute chest pain"),
        (flags.seizure, "seizure"),
        (flags.major_trauma, "major trauma"),
        (flags.moderate_severe_bleeding, "moderate to severe bleeding"),
        (flags.severe_abdominal_pain, "severe abdominal pain"),
        (flags.persistent_vomiting, "persistent vomiting"),
        (flags.respiratory_distress, "respiratory distress"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect()
}

#[async_trait]
impl TriageEngine for RemoteClassifier {
    fn kind(&self) -> EngineKind {
        EngineKind::Remote
    }

    async fn assess(&self, request: &AssessmentRequest) -> Result<Assessment, EngineError> {
        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(user_prompt(request, Local::now().date_naive())),
        ];

        let reply = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await
            .map_err(|e| {
                warn!(provider = self.provider.name(), error = %e, "remote classification failed");
                EngineError::from(e)
            })?;

        let level = parse_label(&reply);
        debug!(provider = self.provider.name(), level = level.color(), "remote engine replied");
        Ok(Assessment {
            level,
            engine: EngineKind::Remote,
            matched_rule: None,
        })
    }
}
