pub mod quests;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use quests::{JournalEntry, JournalView, Quest, QuestBook};

/// One quest progress mark: quest `id` reached `stage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub id: String,
    pub stage: f64,
}

impl JournalRecord {
    pub fn new(id: impl Into<String>, stage: f64) -> Self {
        Self {
            id: id.into(),
            stage,
        }
    }
}

/// Append-only history of quest progress.
///
/// Records are never edited or removed. Cloning is cheap and yields a
/// snapshot: an append on one copy does not show up in the other. The
/// current stage of a quest is its most recently appended record, so a
/// later, smaller stage does move the quest backwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalLedger {
    records: Arc<Vec<JournalRecord>>,
}

impl JournalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: JournalRecord) {
        tracing::debug!(quest = %record.id, stage = record.stage, "journal record added");
        Arc::make_mut(&mut self.records).push(record);
    }

    /// Whether `(id, stage)` appears anywhere in the history.
    pub fn has_record_stage(&self, id: &str, stage: f64) -> bool {
        self.records
            .iter()
            .rev()
            .any(|r| r.id == id && r.stage == stage)
    }

    /// The latest record for quest `id`.
    pub fn record_stage(&self, id: &str) -> Option<&JournalRecord> {
        self.records.iter().rev().find(|r| r.id == id)
    }

    pub fn current_stage(&self, id: &str) -> Option<f64> {
        self.record_stage(id).map(|r| r.stage)
    }

    pub fn records(&self) -> &[JournalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
