use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::GenerationError;
use crate::model::{GameWorld, Gender};
use crate::rng::WorldRng;

/// Prefix of a symbolic NPC reference in authored content.
pub const NPC_PREFIX: &str = "$NPC_";

static TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(HE|HIM|LOC|POINT)_)?(NPC_[A-Za-z0-9_]+)")
        .expect("npc template regex must compile")
});

/// The character a `$NPC_<name>` reference was bound to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpcBinding {
    pub character_id: String,
    pub name: String,
    pub gender: Gender,
    pub map_index: usize,
    pub point_index: usize,
}

/// Reference → character bindings for one world, keyed by the full
/// `$NPC_<name>` token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NpcBindings {
    bindings: BTreeMap<String, NpcBinding>,
}

impl NpcBindings {
    /// Bind every reference to a random character.
    ///
    /// Each pick draws a map, then a point of that map, then a character of
    /// that point's roster; empty maps and points are skipped. References
    /// are visited in sorted order so the draws are reproducible.
    pub fn resolve(
        references: &BTreeSet<String>,
        world: &GameWorld,
        rng: &mut WorldRng,
    ) -> Result<Self, GenerationError> {
        let mut bindings = BTreeMap::new();
        if references.is_empty() {
            return Ok(Self { bindings });
        }

        let populated_maps: Vec<usize> = (0..world.maps.len())
            .filter(|&i| world.maps[i].character_count() > 0)
            .collect();

        for reference in references {
            let map_index = *rng.pick(&populated_maps).ok_or(GenerationError::EmptyWorld)?;
            let map = &world.maps[map_index];
            let populated_points: Vec<usize> = (0..map.characters.len())
                .filter(|&i| !map.characters[i].is_empty())
                .collect();
            let point_index = *rng
                .pick(&populated_points)
                .ok_or(GenerationError::EmptyWorld)?;
            let character = rng
                .pick(&map.characters[point_index])
                .ok_or(GenerationError::EmptyWorld)?;

            tracing::debug!(
                reference = %reference,
                npc = %character.name,
                map = map_index,
                point = point_index,
                "npc reference bound"
            );
            bindings.insert(
                reference.clone(),
                NpcBinding {
                    character_id: character.id.clone(),
                    name: character.name.clone(),
                    gender: character.gender,
                    map_index,
                    point_index,
                },
            );
        }

        tracing::info!(references = bindings.len(), "npc references resolved");
        Ok(Self { bindings })
    }

    pub fn get(&self, reference: &str) -> Option<&NpcBinding> {
        self.bindings.get(reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NpcBinding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The character id bound to `reference`, or `reference` itself.
    pub fn character_id<'a>(&'a self, reference: &'a str) -> &'a str {
        self.get(reference)
            .map_or(reference, |b| b.character_id.as_str())
    }

    /// Replace bound `$NPC_` tokens of a whitespace-separated script with
    /// character ids.
    pub fn rewrite_script(&self, source: &str) -> String {
        source
            .split_whitespace()
            .map(|token| self.character_id(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Substitute text placeholders:
    ///
    /// - `$NPC_x` the bound name (kept verbatim when unbound)
    /// - `$HE_NPC_x` he/she, or `they`
    /// - `$HIM_NPC_x` him/her, or `them`
    /// - `$LOC_NPC_x` the name of the map the character lives on, or `somewhere`
    /// - `$POINT_NPC_x` the name of the character's point, or `somewhere`
    pub fn render(&self, text: &str, world: &GameWorld) -> String {
        TEMPLATE
            .replace_all(text, |caps: &Captures| {
                let whole = &caps[0];
                let reference = format!("${}", &caps[2]);
                let binding = self.get(&reference);
                match caps.get(1).map(|m| m.as_str()) {
                    None => binding.map_or(whole.to_string(), |b| b.name.clone()),
                    Some("HE") => binding
                        .map_or("they", |b| b.gender.subject_pronoun())
                        .to_string(),
                    Some("HIM") => binding
                        .map_or("them", |b| b.gender.object_pronoun())
                        .to_string(),
                    Some("LOC") => binding
                        .and_then(|b| world.maps.get(b.map_index))
                        .map_or("somewhere".to_string(), |m| m.name.clone()),
                    Some(_) => binding
                        .and_then(|b| {
                            world
                                .maps
                                .get(b.map_index)?
                                .points_data
                                .get(b.point_index)
                        })
                        .map_or("somewhere".to_string(), |p| p.name.clone()),
                }
            })
            .into_owned()
    }
}

/// Add every `$NPC_` token of a whitespace-separated script to `into`.
pub fn collect_script_references(source: &str, into: &mut BTreeSet<String>) {
    for token in source.split_whitespace() {
        if token.starts_with(NPC_PREFIX) {
            into.insert(token.to_string());
        }
    }
}
