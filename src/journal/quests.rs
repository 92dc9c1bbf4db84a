use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialogue::NpcBindings;
use crate::error::ResourceError;
use crate::model::GameWorld;

use super::JournalLedger;

/// Journal text shown when quest progress reaches `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub value: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub title: String,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

/// A ledger record rendered for the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalView {
    pub quest: String,
    pub stage: f64,
    pub title: Option<String>,
    pub text: Option<String>,
}

/// Quest titles and stage texts, keyed by quest id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestBook {
    quests: BTreeMap<String, Quest>,
}

impl QuestBook {
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, id: impl Into<String>, quest: Quest) {
        self.quests.insert(id.into(), quest);
    }

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.get(id)
    }

    pub fn title(&self, id: &str) -> Option<&str> {
        self.quest(id).map(|q| q.title.as_str())
    }

    /// The entry for `quest` whose value is exactly `stage`.
    pub fn entry(&self, quest: &str, stage: f64) -> Option<&JournalEntry> {
        self.quest(quest)?.entries.iter().find(|e| e.value == stage)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Fill NPC placeholders in every entry text.
    pub fn resolve_npcs(&mut self, bindings: &NpcBindings, world: &GameWorld) {
        for quest in self.quests.values_mut() {
            for entry in &mut quest.entries {
                entry.text = bindings.render(&entry.text, world);
            }
        }
    }

    /// Every ledger record in order, with its quest title and stage text
    /// when the book has them.
    pub fn journal_view(&self, ledger: &JournalLedger) -> Vec<JournalView> {
        ledger
            .records()
            .iter()
            .map(|record| JournalView {
                quest: record.id.clone(),
                stage: record.stage,
                title: self.title(&record.id).map(str::to_string),
                text: self
                    .entry(&record.id, record.stage)
                    .map(|e| e.text.clone()),
            })
            .collect()
    }
}
