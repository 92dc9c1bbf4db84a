//! Topic-based NPC dialogue: the topic table loaded from resources, NPC
//! reference binding, topic hyperlinking, and the conversation engine.

pub mod engine;
pub mod hyperlink;
pub mod npc;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::model::GameWorld;

pub use engine::{Conversation, DialogueEngine, DialogueState, TranscriptEntry};
pub use hyperlink::{TextSegment, TopicMatch, TopicMatcher};
pub use npc::{NpcBinding, NpcBindings};

/// Topic whose first matching line opens every conversation.
pub const GREETING_TOPIC: &str = "_greeting0";

/// Topics starting with this are never listed or linked.
pub const INTERNAL_TOPIC_PREFIX: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionKind {
    /// The speaking NPC has this character id.
    Npc,
    /// The speaking NPC is of this race.
    Race,
    /// A DSL condition script holds.
    Dsl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "cType")]
    pub kind: ConditionKind,
    #[serde(rename = "cValue")]
    pub value: String,
}

/// Effect scripts appear either bare or wrapped as `{"effect": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effect {
    Script(String),
    Wrapped { effect: String },
}

impl Effect {
    pub fn script(&self) -> &str {
        match self {
            Effect::Script(s) | Effect::Wrapped { effect: s } => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub text: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

/// Dialogue lines per topic. Line order is significant: the first line
/// whose conditions all hold is spoken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicTable {
    topics: BTreeMap<String, Vec<DialogueLine>>,
}

pub fn is_internal_topic(topic: &str) -> bool {
    topic.starts_with(INTERNAL_TOPIC_PREFIX)
}

impl TopicTable {
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, topic: impl Into<String>, lines: Vec<DialogueLine>) {
        self.topics.insert(topic.into(), lines);
    }

    pub fn lines(&self, topic: &str) -> Option<&[DialogueLine]> {
        self.topics.get(topic).map(Vec::as_slice)
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.contains_key(topic)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Sorted topic names without internal ones.
    pub fn public_topics(&self) -> Vec<String> {
        self.topics
            .keys()
            .filter(|t| !is_internal_topic(t))
            .cloned()
            .collect()
    }

    /// Every `$NPC_` reference in `npc` conditions, condition and effect
    /// scripts, and topic names.
    pub fn npc_references(&self) -> BTreeSet<String> {
        let mut references = BTreeSet::new();
        for (topic, lines) in &self.topics {
            if topic.starts_with(npc::NPC_PREFIX) {
                references.insert(topic.clone());
            }
            for line in lines {
                for condition in &line.conditions {
                    match condition.kind {
                        ConditionKind::Npc => {
                            references.insert(condition.value.clone());
                        }
                        ConditionKind::Dsl => {
                            npc::collect_script_references(&condition.value, &mut references);
                        }
                        ConditionKind::Race => {}
                    }
                }
                if let Some(effect) = &line.effect {
                    npc::collect_script_references(effect.script(), &mut references);
                }
            }
        }
        references
    }

    /// Rewrite references to bound character ids, fill text templates, and
    /// rename `$NPC_` topics to the bound character's name. A renamed topic
    /// that collides with an existing one has its lines appended.
    pub fn resolve_npcs(&mut self, bindings: &NpcBindings, world: &GameWorld) {
        for lines in self.topics.values_mut() {
            for line in lines.iter_mut() {
                for condition in &mut line.conditions {
                    match condition.kind {
                        ConditionKind::Npc => {
                            condition.value = bindings.character_id(&condition.value).to_string();
                        }
                        ConditionKind::Dsl => {
                            condition.value = bindings.rewrite_script(&condition.value);
                        }
                        ConditionKind::Race => {}
                    }
                }
                if let Some(effect) = line.effect.take() {
                    line.effect = Some(Effect::Script(bindings.rewrite_script(effect.script())));
                }
                line.text = bindings.render(&line.text, world);
            }
        }

        let renamed: Vec<String> = self
            .topics
            .keys()
            .filter(|t| bindings.get(t).is_some())
            .cloned()
            .collect();
        for topic in renamed {
            let (Some(lines), Some(binding)) = (self.topics.remove(&topic), bindings.get(&topic))
            else {
                continue;
            };
            tracing::debug!(from = %topic, to = %binding.name, "topic renamed");
            self.topics
                .entry(binding.name.clone())
                .or_default()
                .extend(lines);
        }
    }
}
