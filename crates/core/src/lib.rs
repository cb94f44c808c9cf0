pub mod acuity;
pub mod classification;
pub mod config;
pub mod engine;
pub mod error;
pub mod intake;
pub mod patient;
pub mod record;
pub mod selector;
pub mod stats;
pub mod vitals;

pub use acuity::AcuityLevel;
pub use classification::{ClassificationResult, Criterion};
pub use config::Config;
pub use engine::{Assessment, AssessmentRequest, EngineKind, TriageEngine};
pub use error::*;
pub use patient::PatientData;
pub use record::{RecordStatus, TriageRecord};
pub use selector::{EngineMode, EngineSelector, Outcome};
pub use vitals::{ClinicalFlags, Consciousness, VitalSigns};
