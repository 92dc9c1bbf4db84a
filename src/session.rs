use serde::{Deserialize, Serialize};

use crate::dialogue::{DialogueEngine, NpcBindings, TextSegment, TopicMatch, TopicTable};
use crate::dsl::{self, Value};
use crate::error::{DialogueError, DslError, GenerationError};
use crate::journal::{JournalLedger, JournalView, QuestBook};
use crate::model::{Character, GameWorld, MapLayout};
use crate::pathfinding;
use crate::worldgen::{WorldGenConfig, WorldGenContext, generate_world_with};

/// Parsed resource documents a new game starts from.
#[derive(Debug, Clone, Default)]
pub struct GameResources {
    pub topics: TopicTable,
    pub quests: QuestBook,
}

/// Where the player stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "map", rename_all = "snake_case")]
pub enum PlayerLocation {
    Overworld { point: usize },
    Local { map: usize, point: usize },
}

/// One running game: the generated world, quest progress, dialogue state,
/// and the player's position.
#[derive(Debug, Clone)]
pub struct GameSession {
    world: GameWorld,
    ledger: JournalLedger,
    dialogue: DialogueEngine,
    quests: QuestBook,
    bindings: NpcBindings,
    location: PlayerLocation,
}

impl GameSession {
    /// Generate a world, bind NPC references in dialogue and quest texts,
    /// and place the player at overworld point 0.
    pub fn new_game(
        config: WorldGenConfig,
        resources: GameResources,
    ) -> Result<Self, GenerationError> {
        let mut ctx = WorldGenContext::new(config);
        let world = generate_world_with(&mut ctx)?;

        let mut dialogue = DialogueEngine::new(resources.topics);
        let references = dialogue.topics().npc_references();
        let bindings = NpcBindings::resolve(&references, &world, &mut ctx.rng)?;
        dialogue.resolve_npcs(&bindings, &world);
        let mut quests = resources.quests;
        quests.resolve_npcs(&bindings, &world);

        tracing::info!(
            seed = ctx.config.seed,
            topics = dialogue.all_topics().len(),
            npcs = bindings.len(),
            "new game ready"
        );
        Ok(Self {
            world,
            ledger: JournalLedger::new(),
            dialogue,
            quests,
            bindings,
            location: PlayerLocation::Overworld { point: 0 },
        })
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn ledger(&self) -> &JournalLedger {
        &self.ledger
    }

    pub fn quests(&self) -> &QuestBook {
        &self.quests
    }

    pub fn bindings(&self) -> &NpcBindings {
        &self.bindings
    }

    pub fn dialogue(&self) -> &DialogueEngine {
        &self.dialogue
    }

    pub fn location(&self) -> PlayerLocation {
        self.location
    }

    /// The player's point on the current map.
    pub fn point(&self) -> usize {
        match self.location {
            PlayerLocation::Overworld { point } | PlayerLocation::Local { point, .. } => point,
        }
    }

    /// Layout of the map the player is on.
    pub fn current_layout(&self) -> &MapLayout {
        match self.location {
            PlayerLocation::Local { map, .. } => match self.world.maps.get(map) {
                Some(m) => &m.layout,
                None => &self.world.overworld.layout,
            },
            PlayerLocation::Overworld { .. } => &self.world.overworld.layout,
        }
    }

    /// Enter the local map linked to the current overworld point. Returns
    /// the map index, or `None` when the point has no map or the player is
    /// already inside one.
    pub fn enter_location(&mut self) -> Option<usize> {
        let PlayerLocation::Overworld { point } = self.location else {
            return None;
        };
        if point >= self.world.maps.len() {
            return None;
        }
        self.location = PlayerLocation::Local {
            map: point,
            point: 0,
        };
        tracing::info!(map = point, name = %self.world.maps[point].name, "entered location");
        Some(point)
    }

    /// Return to the overworld point of the current local map.
    pub fn leave_location(&mut self) -> bool {
        let PlayerLocation::Local { map, .. } = self.location else {
            return false;
        };
        self.location = PlayerLocation::Overworld { point: map };
        tracing::info!(map, "left location");
        true
    }

    /// Walk to `destination` on the current map. On success the player is
    /// moved there and the route is returned.
    pub fn travel_to(&mut self, destination: usize) -> Option<Vec<usize>> {
        let from = self.point();
        let path = pathfinding::find_path(self.current_layout(), from, destination)?;
        match &mut self.location {
            PlayerLocation::Overworld { point } | PlayerLocation::Local { point, .. } => {
                *point = destination;
            }
        }
        tracing::debug!(from, to = destination, hops = path.len() - 1, "travelled");
        Some(path)
    }

    /// Route between two points of the current map.
    pub fn find_path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        pathfinding::find_path(self.current_layout(), from, to)
    }

    /// Characters at the player's point. The overworld has none.
    pub fn characters_here(&self) -> &[Character] {
        match self.location {
            PlayerLocation::Local { map, point } => self
                .world
                .maps
                .get(map)
                .map(|m| m.roster(point))
                .unwrap_or(&[]),
            PlayerLocation::Overworld { .. } => &[],
        }
    }

    pub fn start_dialogue(&mut self, npc_id: &str) -> Result<String, DialogueError> {
        let (_, npc) = self
            .world
            .find_character(npc_id)
            .ok_or_else(|| DialogueError::UnknownNpc(npc_id.to_string()))?;
        let npc = npc.clone();
        self.dialogue.start_dialogue(&npc, &mut self.ledger)
    }

    pub fn advance_dialogue(&mut self, topic: &str) -> Result<Option<String>, DialogueError> {
        self.dialogue.advance_dialogue(topic, &mut self.ledger)
    }

    pub fn end_dialogue(&mut self) -> Result<(), DialogueError> {
        self.dialogue.end_dialogue()
    }

    pub fn all_topics(&self) -> Vec<String> {
        self.dialogue.all_topics()
    }

    pub fn search_topics_in_text(&self, text: &str) -> Vec<TopicMatch> {
        self.dialogue.search_topics_in_text(text)
    }

    pub fn segment_text(&self, text: &str) -> Vec<TextSegment> {
        self.dialogue.segment_text(text)
    }

    pub fn evaluate_effect(&mut self, source: &str) -> Result<(), DslError> {
        dsl::execute_effect(source, &mut self.ledger)
    }

    /// Run a script and return its final top of stack. Writes it makes
    /// reach the ledger.
    pub fn evaluate_condition(&mut self, source: &str) -> Result<Option<Value>, DslError> {
        dsl::evaluate(source, &mut self.ledger)
    }

    pub fn journal_view(&self) -> Vec<JournalView> {
        self.quests.journal_view(&self.ledger)
    }
}
