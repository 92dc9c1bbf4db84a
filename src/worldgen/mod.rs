pub mod characters;
pub mod config;
pub mod generator;
pub mod layout;
pub mod names;
pub mod points;
pub mod sampling;

use std::collections::HashSet;

use crate::error::GenerationError;
use crate::id::IdGenerator;
use crate::model::{
    Character, GameMap, GameWorld, Gender, MapLayout, MapPointData, OverworldMap,
};
use crate::rng::WorldRng;

pub use characters::{BaseStats, CharacterGenerator, RaceDefinition, RaceTable};
pub use config::{LayoutConfig, WorldGenConfig};
pub use generator::TextGenerator;
pub use layout::generate_layout;
pub use names::{NameGenerator, SyllableNames};
pub use points::MapScope;

/// Everything world generation draws on: the shared RNG, config, id
/// counter, and the name/stat collaborators.
pub struct WorldGenContext {
    pub config: WorldGenConfig,
    pub rng: WorldRng,
    pub ids: IdGenerator,
    /// Sorted race names a character's race is drawn from.
    pub races: Vec<String>,
    pub names: Box<dyn NameGenerator>,
    pub chargen: Box<dyn CharacterGenerator>,
    pub location_names: TextGenerator,
    pub house_names: TextGenerator,
}

impl WorldGenContext {
    /// Context with the built-in race table and generators.
    pub fn new(config: WorldGenConfig) -> Self {
        let races = RaceTable::builtin();
        Self::with_collaborators(
            config,
            races.names(),
            Box::new(SyllableNames),
            Box::new(BaseStats::new(races)),
        )
    }

    pub fn with_collaborators(
        config: WorldGenConfig,
        races: Vec<String>,
        names: Box<dyn NameGenerator>,
        chargen: Box<dyn CharacterGenerator>,
    ) -> Self {
        Self {
            rng: WorldRng::from_seed(config.seed),
            config,
            ids: IdGenerator::new(),
            races,
            names,
            chargen,
            location_names: TextGenerator::location_name(),
            house_names: TextGenerator::house_name(),
        }
    }
}

/// Generate a complete world from a seed with default settings.
pub fn generate_world(seed: u64) -> Result<GameWorld, GenerationError> {
    let mut ctx = WorldGenContext::new(WorldGenConfig::with_seed(seed));
    generate_world_with(&mut ctx)
}

/// Generate the overworld, then each local map with its inhabitants.
///
/// Draw order is fixed (overworld, then maps in index order; within a map:
/// layout, point kinds, map name, point names, rosters), so the same
/// context seed always yields the same world.
pub fn generate_world_with(ctx: &mut WorldGenContext) -> Result<GameWorld, GenerationError> {
    tracing::info!(seed = ctx.config.seed, maps = ctx.config.map_count, "generating world");

    let mut overworld = generate_overworld(ctx)?;
    tracing::info!(points = overworld.layout.point_count(), "overworld generated");

    let mut map_names = HashSet::new();
    let mut character_names = HashSet::new();
    let mut maps = Vec::with_capacity(ctx.config.map_count);
    for index in 0..ctx.config.map_count {
        let map = generate_local_map(ctx, &mut map_names, &mut character_names)?;
        if let Some(point) = overworld.points_data.get_mut(index) {
            point.name = map.name.clone();
        }
        tracing::info!(
            map = index + 1,
            of = ctx.config.map_count,
            name = %map.name,
            points = map.layout.point_count(),
            characters = map.character_count(),
            "map generated"
        );
        maps.push(map);
    }

    let world = GameWorld { overworld, maps };
    tracing::info!(characters = world.character_count(), "world generated");
    Ok(world)
}

fn generate_overworld(ctx: &mut WorldGenContext) -> Result<OverworldMap, GenerationError> {
    let config = ctx.config.overworld.clone();
    let layout = generate_layout(&config, &mut ctx.rng)?;
    let points_data = generate_points_data(ctx, &layout, MapScope::Overworld)?;
    Ok(OverworldMap {
        size: (config.width, config.height),
        layout,
        points_data,
    })
}

fn generate_local_map(
    ctx: &mut WorldGenContext,
    map_names: &mut HashSet<String>,
    character_names: &mut HashSet<String>,
) -> Result<GameMap, GenerationError> {
    let config = ctx.config.local.clone();
    let layout = generate_layout(&config, &mut ctx.rng)?;
    let attempts = ctx.config.max_name_attempts;
    let name = unique_name("map name", map_names, attempts, || {
        ctx.location_names.generate(&mut ctx.rng)
    })?;
    let points_data = generate_points_data(ctx, &layout, MapScope::Local)?;

    let characters = (0..layout.point_count())
        .map(|_| generate_roster(ctx, character_names))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GameMap {
        name,
        size: (config.width, config.height),
        layout,
        points_data,
        characters,
    })
}

fn generate_points_data(
    ctx: &mut WorldGenContext,
    layout: &MapLayout,
    scope: MapScope,
) -> Result<Vec<MapPointData>, GenerationError> {
    let kinds = points::assign_point_kinds(
        layout.point_count(),
        scope.quotas(),
        scope.backfill(),
        &mut ctx.rng,
    );

    // Local point names are unique within their map.
    let mut used = HashSet::new();
    let attempts = ctx.config.max_name_attempts;
    let mut points_data = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let mut draw = || points::point_name(kind, scope, &ctx.house_names, &mut ctx.rng);
        let name = match scope {
            MapScope::Local => unique_name("point name", &mut used, attempts, draw)?,
            MapScope::Overworld => draw(),
        };
        points_data.push(MapPointData {
            kind,
            name,
            description: points::DEFAULT_DESCRIPTION.to_string(),
        });
    }
    Ok(points_data)
}

/// Draw the characters standing at one point.
fn generate_roster(
    ctx: &mut WorldGenContext,
    used_names: &mut HashSet<String>,
) -> Result<Vec<Character>, GenerationError> {
    let count = ctx
        .rng
        .range_inclusive(ctx.config.min_characters, ctx.config.max_characters);
    let attempts = ctx.config.max_name_attempts;
    let mut roster = Vec::with_capacity(count);
    for _ in 0..count {
        let gender = ctx
            .rng
            .pick(Gender::ALL)
            .copied()
            .unwrap_or(Gender::Male);
        let race = ctx.rng.pick(&ctx.races).cloned().unwrap_or_default();
        let name = unique_name("character name", used_names, attempts, || {
            ctx.names.generate(&race, gender, &mut ctx.rng)
        })?;
        let (attributes, skills) = ctx.chargen.stats(&race, &mut ctx.rng);
        roster.push(Character {
            id: ctx.ids.next_tagged(&format!("{race}_")),
            name,
            race,
            gender,
            attributes,
            skills,
        });
    }
    Ok(roster)
}

/// Draw until `make` produces a name not in `used`, then record it.
fn unique_name(
    what: &'static str,
    used: &mut HashSet<String>,
    attempts: usize,
    mut make: impl FnMut() -> String,
) -> Result<String, GenerationError> {
    for attempt in 0..attempts {
        let candidate = make();
        if used.insert(candidate.clone()) {
            return Ok(candidate);
        }
        tracing::trace!(what, attempt, name = %candidate, "name collision");
    }
    Err(GenerationError::NameExhausted { what, attempts })
}
