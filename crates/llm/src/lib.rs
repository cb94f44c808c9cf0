//! Remote (model-based) triage classification.
//!
//! A chat-completion backend is asked for a single Manchester colour word.
//! Providers speak either the OpenAI-compatible chat-completions API or the
//! Ollama chat API; [`RemoteClassifier`] wraps whichever one is configured
//! behind the shared `TriageEngine` interface.

pub mod classify;
pub mod provider;
pub mod providers;

pub use classify::RemoteClassifier;
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;
