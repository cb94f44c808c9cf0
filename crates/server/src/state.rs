use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use triage_core::{Config, EngineSelector, RecordStatus, TriageEngine, TriageRecord};
use triage_llm::RemoteClassifier;
use triage_rules::RuleEngine;

/// Records kept when no limit is configured.
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

pub struct AppState {
    pub selector: EngineSelector,
    /// Records of this process's lifetime, in insertion order.
    pub records: RwLock<Vec<TriageRecord>>,
    max_records: usize,
}

impl AppState {
    pub fn new(selector: EngineSelector) -> Self {
        Self::with_record_limit(selector, DEFAULT_MAX_RECORDS)
    }

    /// Keep at most `max_records` (at least one); the oldest go first.
    pub fn with_record_limit(selector: EngineSelector, max_records: usize) -> Self {
        Self {
            selector,
            records: RwLock::new(Vec::new()),
            max_records: max_records.max(1),
        }
    }

    /// Wire up the engines the configured mode needs. A mode that needs the
    /// remote classifier fails here when the provider is not configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let rules: Arc<dyn TriageEngine> = Arc::new(RuleEngine);
        let mode = config.engine.mode;

        let remote: Option<Arc<dyn TriageEngine>> = if mode.needs_remote() {
            let classifier = RemoteClassifier::from_config(&config.llm, &config.ollama)?;
            Some(Arc::new(classifier))
        } else {
            None
        };

        let selector = EngineSelector::new(mode, rules, remote)?;
        info!(mode = %mode, max_records = config.server.max_records, "triage engines ready");
        Ok(Self::with_record_limit(selector, config.server.max_records))
    }

    pub async fn store(&self, record: TriageRecord) {
        let mut records = self.records.write().await;
        records.push(record);
        if records.len() > self.max_records {
            let excess = records.len() - self.max_records;
            records.drain(..excess);
            debug!(dropped = excess, "record limit reached, oldest records dropped");
        }
    }

    /// Snapshot of all records, newest first.
    pub async fn records_newest_first(&self) -> Vec<TriageRecord> {
        // Reverse first so equal timestamps keep the later insertion on top.
        let mut records: Vec<TriageRecord> =
            self.records.read().await.iter().rev().cloned().collect();
        TriageRecord::sort_newest_first(&mut records);
        records
    }

    /// Move a record to `status`. `None` when the id is unknown.
    pub async fn update_status(&self, id: Uuid, status: RecordStatus) -> Option<TriageRecord> {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id == id)?;
        record.status = status;
        Some(record.clone())
    }

    /// Other records of the same patient. `None` when the id is unknown.
    pub async fn history(&self, id: Uuid) -> Option<Vec<TriageRecord>> {
        let records = self.records.read().await;
        let current = records.iter().find(|r| r.id == id)?;
        Some(current.history(&records).into_iter().cloned().collect())
    }
}
