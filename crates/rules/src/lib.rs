//! Deterministic Manchester triage rules.
//!
//! This crate provides:
//! - The discriminator table for the four escalating tiers
//! - [`TriageClassifier`], an ordered first-match evaluator over that table
//! - [`RuleEngine`], the classifier behind the shared `TriageEngine` interface

pub mod classifier;
pub mod criteria;
pub mod engine;

pub use classifier::TriageClassifier;
pub use criteria::RuleDescription;
pub use engine::RuleEngine;
