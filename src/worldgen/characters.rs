use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::model::Stat;
use crate::rng::WorldRng;

/// Base statistics for one playable race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDefinition {
    pub name: String,
    #[serde(default)]
    pub base_attributes: BTreeMap<String, i32>,
    #[serde(default)]
    pub base_skills: BTreeMap<String, i32>,
}

/// Races keyed by name. Iteration order is the sorted race list used when
/// drawing a race for a new character.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RaceTable {
    races: BTreeMap<String, RaceDefinition>,
}

const ATTRIBUTES: &[&str] = &[
    "strength",
    "intelligence",
    "willpower",
    "agility",
    "speed",
    "endurance",
    "personality",
    "luck",
];

const SKILLS: &[&str] = &[
    "alchemy", "alteration", "athletics", "axe", "block", "blunt", "conjuration", "destruction",
    "enchant", "handtohand", "heavyarmor", "illusion", "lightarmor", "longblade", "marksman",
    "mediumarmor", "mysticism", "restoration", "shortblade", "sneak", "speechcraft", "spear",
];

/// Per-race attribute adjustments over a flat base of 40, and favoured
/// skills that start at 10 instead of 0.
const BUILTIN_RACES: &[(&str, &[(&str, i32)], &[&str])] = &[
    ("darkelf", &[("agility", 10), ("speed", 10), ("willpower", -10)], &["destruction", "shortblade", "sneak"]),
    ("dwarf", &[("strength", 10), ("endurance", 10), ("speed", -10)], &["blunt", "heavyarmor", "enchant"]),
    ("elf", &[("agility", 10), ("personality", 10), ("strength", -10)], &["marksman", "illusion", "alchemy"]),
    ("goblin", &[("agility", 10), ("luck", 10), ("intelligence", -10)], &["sneak", "shortblade", "marksman"]),
    ("halfdemon", &[("willpower", 10), ("strength", 10), ("personality", -10)], &["destruction", "conjuration", "axe"]),
    ("highelf", &[("intelligence", 20), ("endurance", -10)], &["alteration", "mysticism", "destruction"]),
    ("human", &[("personality", 10), ("luck", 10)], &["longblade", "speechcraft", "block"]),
    ("orc", &[("strength", 20), ("intelligence", -10)], &["axe", "heavyarmor", "athletics"]),
];

impl RaceTable {
    /// Parse `[{name, baseAttributes, baseSkills}]`.
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        let list: Vec<RaceDefinition> = serde_json::from_str(json)?;
        Ok(Self::from_definitions(list))
    }

    pub fn from_definitions(list: impl IntoIterator<Item = RaceDefinition>) -> Self {
        Self {
            races: list.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::from_definitions(BUILTIN_RACES.iter().map(|(name, adjust, favoured)| {
            let base_attributes = ATTRIBUTES
                .iter()
                .map(|&attr| {
                    let bonus: i32 = adjust
                        .iter()
                        .filter(|(a, _)| *a == attr)
                        .map(|(_, v)| v)
                        .sum();
                    (attr.to_string(), 40 + bonus)
                })
                .collect();
            let base_skills = SKILLS
                .iter()
                .map(|&skill| {
                    let value = if favoured.contains(&skill) { 10 } else { 0 };
                    (skill.to_string(), value)
                })
                .collect();
            RaceDefinition {
                name: name.to_string(),
                base_attributes,
                base_skills,
            }
        }))
    }

    pub fn get(&self, name: &str) -> Option<&RaceDefinition> {
        self.races.get(name)
    }

    /// Sorted race names.
    pub fn names(&self) -> Vec<String> {
        self.races.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}

/// Rolls the attribute and skill sheet for a new character.
pub trait CharacterGenerator {
    fn stats(&self, race: &str, rng: &mut WorldRng) -> (Vec<Stat>, Vec<Stat>);
}

/// Copies the race's base values. Unknown races get empty sheets.
#[derive(Debug, Clone, Default)]
pub struct BaseStats {
    races: RaceTable,
}

impl BaseStats {
    pub fn new(races: RaceTable) -> Self {
        Self { races }
    }
}

fn to_stats(values: &BTreeMap<String, i32>) -> Vec<Stat> {
    values
        .iter()
        .map(|(name, &value)| Stat {
            name: name.clone(),
            value,
        })
        .collect()
}

impl CharacterGenerator for BaseStats {
    fn stats(&self, race: &str, _rng: &mut WorldRng) -> (Vec<Stat>, Vec<Stat>) {
        match self.races.get(race) {
            Some(def) => (to_stats(&def.base_attributes), to_stats(&def.base_skills)),
            None => (Vec::new(), Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_races_are_sorted() {
        let table = RaceTable::builtin();
        assert_eq!(
            table.names(),
            vec!["darkelf", "dwarf", "elf", "goblin", "halfdemon", "highelf", "human", "orc"]
        );
    }

    #[test]
    fn builtin_adjustments_apply() {
        let table = RaceTable::builtin();
        let orc = table.get("orc").unwrap();
        assert_eq!(orc.base_attributes["strength"], 60);
        assert_eq!(orc.base_attributes["intelligence"], 30);
        assert_eq!(orc.base_attributes["luck"], 40);
        assert_eq!(orc.base_skills["axe"], 10);
        assert_eq!(orc.base_skills["sneak"], 0);
    }

    #[test]
    fn base_stats_copies_race_values() {
        let chargen = BaseStats::new(RaceTable::builtin());
        let (attributes, skills) = chargen.stats("dwarf", &mut WorldRng::from_seed(1));
        assert_eq!(attributes.len(), ATTRIBUTES.len());
        assert_eq!(skills.len(), SKILLS.len());
        let strength = attributes.iter().find(|s| s.name == "strength").unwrap();
        assert_eq!(strength.value, 50);
    }

    #[test]
    fn unknown_race_has_empty_sheet() {
        let chargen = BaseStats::new(RaceTable::builtin());
        let (attributes, skills) = chargen.stats("merfolk", &mut WorldRng::from_seed(1));
        assert!(attributes.is_empty() && skills.is_empty());
    }

    #[test]
    fn parses_race_json() {
        let table = RaceTable::from_json_str(
            r#"[{"name": "human", "baseAttributes": {"luck": 50}, "baseSkills": {"block": 5}}]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("human").unwrap().base_attributes["luck"], 50);
    }
}
