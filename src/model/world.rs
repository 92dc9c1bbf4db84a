use serde::{Deserialize, Serialize};

use super::character::Character;
use super::layout::MapLayout;

/// Category tag of a map point. Local maps use the settlement categories
/// (gate through house), the overworld uses the regional ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PointKind {
    Gate,
    Shop,
    Inn,
    Tavern,
    Blacksmith,
    Temple,
    Library,
    Guild,
    Academy,
    Barracks,
    House,
    Town,
    City,
    Village,
    Camp,
    Fort,
    Castle,
    Tower,
    Monastery,
    Ruins,
    Dungeon,
    Cave,
    Forest,
    Mountain,
    Lake,
}

string_enum!(PointKind {
    Gate => "gate",
    Shop => "shop",
    Inn => "inn",
    Tavern => "tavern",
    Blacksmith => "blacksmith",
    Temple => "temple",
    Library => "library",
    Guild => "guild",
    Academy => "academy",
    Barracks => "barracks",
    House => "house",
    Town => "town",
    City => "city",
    Village => "village",
    Camp => "camp",
    Fort => "fort",
    Castle => "castle",
    Tower => "tower",
    Monastery => "monastery",
    Ruins => "ruins",
    Dungeon => "dungeon",
    Cave => "cave",
    Forest => "forest",
    Mountain => "mountain",
    Lake => "lake",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPointData {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub name: String,
    pub description: String,
}

/// A local map: one settlement or site with its points and inhabitants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub name: String,
    pub size: (f64, f64),
    pub layout: MapLayout,
    pub points_data: Vec<MapPointData>,
    /// `characters[i]` is the roster standing at point `i`.
    pub characters: Vec<Vec<Character>>,
}

impl GameMap {
    pub fn roster(&self, point: usize) -> &[Character] {
        self.characters.get(point).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn character_count(&self) -> usize {
        self.characters.iter().map(Vec::len).sum()
    }
}

/// The region map. Its points are places; the first `maps.len()` of them
/// lead into the local maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverworldMap {
    pub size: (f64, f64),
    pub layout: MapLayout,
    pub points_data: Vec<MapPointData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameWorld {
    pub overworld: OverworldMap,
    pub maps: Vec<GameMap>,
}

/// Where a character lives in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterLocation {
    pub map_index: usize,
    pub point_index: usize,
}

impl GameWorld {
    pub fn character_count(&self) -> usize {
        self.maps.iter().map(GameMap::character_count).sum()
    }

    /// Every character with its location, in map → point → roster order.
    pub fn characters(&self) -> impl Iterator<Item = (CharacterLocation, &Character)> {
        self.maps.iter().enumerate().flat_map(|(map_index, map)| {
            map.characters
                .iter()
                .enumerate()
                .flat_map(move |(point_index, roster)| {
                    roster.iter().map(move |c| {
                        (
                            CharacterLocation {
                                map_index,
                                point_index,
                            },
                            c,
                        )
                    })
                })
        })
    }

    pub fn find_character(&self, id: &str) -> Option<(CharacterLocation, &Character)> {
        self.characters().find(|(_, c)| c.id == id)
    }
}
