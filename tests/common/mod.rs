#![allow(dead_code)]

use lucanis::dialogue::TopicTable;
use lucanis::journal::QuestBook;
use lucanis::model::{Edge, MapLayout, Point};
use lucanis::{GameResources, GameSession, WorldGenConfig};

pub const TOPICS: &str = r#"{
    "_greeting0": [
        {"text": "Hail, kinsman.", "conditions": [{"cType": "race", "cValue": "human"}]},
        {"text": "Greetings, traveller.", "conditions": []}
    ],
    "$NPC_smith": [
        {"text": "$NPC_smith keeps the forge at $POINT_NPC_smith in $LOC_NPC_smith.", "conditions": []}
    ],
    "lost hammer": [
        {"text": "Thank you for returning it.",
         "conditions": [{"cType": "npc", "cValue": "$NPC_smith"},
                        {"cType": "dsl", "cValue": "hammer 10 is_journal_stage"}],
         "effect": "hammer 20 set_journal_stage"},
        {"text": "Find the hammer for $HIM_NPC_smith; $HE_NPC_smith waits in $LOC_NPC_smith.",
         "conditions": [{"cType": "dsl", "cValue": "hammer get_journal_stage 0 ="}],
         "effect": {"effect": "hammer 10 set_journal_stage"}},
        {"text": "Have you found the hammer yet?", "conditions": []}
    ],
    "rumors": [
        {"text": "They say the lost hammer was stolen.", "conditions": []}
    ],
    "_internal": [
        {"text": "hidden", "conditions": []}
    ]
}"#;

pub const QUESTS: &str = r#"{
    "hammer": {
        "title": "The Lost Hammer",
        "entries": [
            {"id": "hammer_10", "value": 10, "text": "$NPC_smith lost a hammer."},
            {"id": "hammer_20", "value": 20, "text": "I returned the hammer to $NPC_smith."}
        ]
    }
}"#;

pub fn fixture_topics() -> TopicTable {
    TopicTable::from_json_str(TOPICS).unwrap()
}

pub fn fixture_quests() -> QuestBook {
    QuestBook::from_json_str(QUESTS).unwrap()
}

pub fn new_session(seed: u64) -> GameSession {
    let resources = GameResources {
        topics: fixture_topics(),
        quests: fixture_quests(),
    };
    GameSession::new_game(WorldGenConfig::with_seed(seed), resources).unwrap()
}

/// Two triangles joined by a bridge between points 2 and 3.
pub fn small_layout() -> MapLayout {
    MapLayout {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.5, 1.0),
            Point::new(2.5, 1.0),
            Point::new(3.0, 0.0),
            Point::new(4.0, 0.0),
        ],
        edges: vec![
            Edge(0, 1),
            Edge(1, 2),
            Edge(0, 2),
            Edge(2, 3),
            Edge(3, 4),
            Edge(4, 5),
            Edge(3, 5),
        ],
        bridges: vec![Edge(2, 3)],
        articulation_points: vec![2, 3],
    }
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
