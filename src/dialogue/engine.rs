use std::collections::BTreeMap;

use serde::Serialize;

use crate::dsl;
use crate::error::{DialogueError, DslError};
use crate::id::IdGenerator;
use crate::journal::JournalLedger;
use crate::model::{Character, GameWorld};

use super::hyperlink::{TextSegment, TopicMatch, TopicMatcher};
use super::npc::NpcBindings;
use super::{ConditionKind, DialogueLine, GREETING_TOPIC, TopicTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    Greeting,
    TopicSelected,
    Ended,
}

/// One spoken line. `topic` is `None` for the greeting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    pub id: String,
    pub npc: Character,
    pub state: DialogueState,
    pub transcript: Vec<TranscriptEntry>,
}

/// Runs conversations over a topic table.
#[derive(Debug, Clone, Default)]
pub struct DialogueEngine {
    topics: TopicTable,
    matcher: TopicMatcher,
    ids: IdGenerator,
    /// Open conversations plus ended ones not yet pruned. Ended ones stay
    /// readable until the next conversation starts.
    conversations: BTreeMap<String, Conversation>,
    active: Option<String>,
}

impl DialogueEngine {
    pub fn new(topics: TopicTable) -> Self {
        let matcher = TopicMatcher::new(topics.public_topics());
        Self {
            topics,
            matcher,
            ..Self::default()
        }
    }

    pub fn topics(&self) -> &TopicTable {
        &self.topics
    }

    /// Bind NPC references in the table, then rebuild the topic matcher
    /// since topic names may have changed.
    pub fn resolve_npcs(&mut self, bindings: &NpcBindings, world: &GameWorld) {
        self.topics.resolve_npcs(bindings, world);
        self.matcher = TopicMatcher::new(self.topics.public_topics());
    }

    /// Public topic names, sorted.
    pub fn all_topics(&self) -> Vec<String> {
        self.topics.public_topics()
    }

    pub fn search_topics_in_text(&self, text: &str) -> Vec<TopicMatch> {
        self.matcher.search(text)
    }

    pub fn segment_text(&self, text: &str) -> Vec<TextSegment> {
        self.matcher.segment(text)
    }

    /// The first line of `topic` whose conditions all hold for `npc`.
    /// Conditions are checked in order and stop at the first failure.
    pub fn select_line(
        &self,
        npc: &Character,
        topic: &str,
        ledger: &JournalLedger,
    ) -> Result<Option<&DialogueLine>, DslError> {
        let Some(lines) = self.topics.lines(topic) else {
            return Ok(None);
        };
        for line in lines {
            if conditions_met(line, npc, ledger)? {
                return Ok(Some(line));
            }
        }
        tracing::debug!(npc = %npc.id, topic, "no dialogue line matched");
        Ok(None)
    }

    /// Text of the line `npc` says on `topic`, running its effect unless
    /// `skip_effects` is set.
    pub fn get_line(
        &self,
        npc: &Character,
        topic: &str,
        ledger: &mut JournalLedger,
        skip_effects: bool,
    ) -> Result<Option<String>, DslError> {
        let Some(line) = self.select_line(npc, topic, ledger)? else {
            return Ok(None);
        };
        if !skip_effects {
            if let Some(effect) = &line.effect {
                dsl::execute_effect(effect.script(), ledger)?;
            }
        }
        Ok(Some(line.text.clone()))
    }

    /// Whether `npc` has something to say on `topic`. Effects never run.
    pub fn knows_topic(
        &self,
        npc: &Character,
        topic: &str,
        ledger: &JournalLedger,
    ) -> Result<bool, DslError> {
        Ok(self.select_line(npc, topic, ledger)?.is_some())
    }

    /// Public topics `npc` has a line for.
    pub fn known_topics(
        &self,
        npc: &Character,
        ledger: &JournalLedger,
    ) -> Result<Vec<String>, DslError> {
        let mut known = Vec::new();
        for topic in self.topics.public_topics() {
            if self.knows_topic(npc, &topic, ledger)? {
                known.push(topic);
            }
        }
        Ok(known)
    }

    /// Open a conversation with `npc` and make it the active one. The
    /// greeting line is spoken and its effect runs. Ended conversations are
    /// dropped.
    pub fn start_dialogue(
        &mut self,
        npc: &Character,
        ledger: &mut JournalLedger,
    ) -> Result<String, DialogueError> {
        let greeting = self
            .get_line(npc, GREETING_TOPIC, ledger, false)?
            .ok_or_else(|| DialogueError::MissingGreeting {
                npc: npc.id.clone(),
            })?;

        self.conversations
            .retain(|_, c| c.state != DialogueState::Ended);
        let id = self.ids.next_tagged("dialogue-");
        tracing::info!(dialogue = %id, npc = %npc.id, "dialogue started");
        self.conversations.insert(
            id.clone(),
            Conversation {
                id: id.clone(),
                npc: npc.clone(),
                state: DialogueState::Greeting,
                transcript: vec![TranscriptEntry {
                    speaker: npc.name.clone(),
                    text: greeting,
                    topic: None,
                }],
            },
        );
        self.active = Some(id.clone());
        Ok(id)
    }

    /// Ask the active conversation's NPC about `topic`.
    pub fn advance_dialogue(
        &mut self,
        topic: &str,
        ledger: &mut JournalLedger,
    ) -> Result<Option<String>, DialogueError> {
        let id = self.active.clone().ok_or(DialogueError::NoActiveDialogue)?;
        self.advance(&id, topic, ledger)
    }

    /// Ask about `topic` in conversation `id`. The spoken line is appended
    /// to the transcript; when no line matches nothing is said.
    pub fn advance(
        &mut self,
        id: &str,
        topic: &str,
        ledger: &mut JournalLedger,
    ) -> Result<Option<String>, DialogueError> {
        let conversation = self
            .conversations
            .get(id)
            .ok_or_else(|| DialogueError::UnknownDialogue(id.to_string()))?;
        if conversation.state == DialogueState::Ended {
            return Err(DialogueError::NoActiveDialogue);
        }
        let npc = conversation.npc.clone();

        let text = self.get_line(&npc, topic, ledger, false)?;
        if let Some(conversation) = self.conversations.get_mut(id) {
            conversation.state = DialogueState::TopicSelected;
            if let Some(text) = &text {
                conversation.transcript.push(TranscriptEntry {
                    speaker: npc.name.clone(),
                    text: text.clone(),
                    topic: Some(topic.to_string()),
                });
            }
        }
        Ok(text)
    }

    /// End the active conversation.
    pub fn end_dialogue(&mut self) -> Result<(), DialogueError> {
        let id = self.active.take().ok_or(DialogueError::NoActiveDialogue)?;
        if let Some(conversation) = self.conversations.get_mut(&id) {
            conversation.state = DialogueState::Ended;
        }
        tracing::info!(dialogue = %id, "dialogue ended");
        Ok(())
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active
            .as_deref()
            .and_then(|id| self.conversations.get(id))
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }
}

fn conditions_met(
    line: &DialogueLine,
    npc: &Character,
    ledger: &JournalLedger,
) -> Result<bool, DslError> {
    for condition in &line.conditions {
        let met = match condition.kind {
            ConditionKind::Npc => condition.value == npc.id,
            ConditionKind::Race => condition.value == npc.race,
            ConditionKind::Dsl => dsl::condition_holds(&condition.value, ledger)?,
        };
        if !met {
            return Ok(false);
        }
    }
    Ok(true)
}
