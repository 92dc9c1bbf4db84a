use crate::model::PointKind;
use crate::rng::WorldRng;

use super::generator::{TextGenerator, capitalize};

pub const DEFAULT_DESCRIPTION: &str = "To be written...";

/// Inclusive count range for one point category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryQuota {
    pub kind: PointKind,
    pub min: usize,
    pub max: usize,
}

const fn quota(kind: PointKind, min: usize, max: usize) -> CategoryQuota {
    CategoryQuota { kind, min, max }
}

pub const LOCAL_QUOTAS: &[CategoryQuota] = &[
    quota(PointKind::Gate, 1, 1),
    quota(PointKind::Shop, 1, 3),
    quota(PointKind::Inn, 1, 1),
    quota(PointKind::Tavern, 0, 1),
    quota(PointKind::Blacksmith, 0, 1),
    quota(PointKind::Temple, 0, 1),
    quota(PointKind::Library, 0, 1),
    quota(PointKind::Guild, 0, 2),
    quota(PointKind::Academy, 0, 1),
    quota(PointKind::Barracks, 0, 1),
];

pub const OVERWORLD_QUOTAS: &[CategoryQuota] = &[
    quota(PointKind::Town, 5, 10),
    quota(PointKind::City, 3, 6),
    quota(PointKind::Village, 10, 20),
    quota(PointKind::Camp, 10, 20),
    quota(PointKind::Fort, 1, 3),
    quota(PointKind::Castle, 1, 3),
    quota(PointKind::Tower, 5, 10),
    quota(PointKind::Monastery, 1, 3),
    quota(PointKind::Temple, 4, 10),
];

pub const OVERWORLD_WILDS: &[PointKind] = &[
    PointKind::Ruins,
    PointKind::Dungeon,
    PointKind::Cave,
    PointKind::Forest,
    PointKind::Mountain,
    PointKind::Lake,
];

/// Which map a point belongs to. Temples are named differently in towns and
/// out in the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapScope {
    Local,
    Overworld,
}

/// How points beyond the quotas are filled.
#[derive(Debug, Clone, Copy)]
pub enum Backfill<'a> {
    Fixed(PointKind),
    Pick(&'a [PointKind]),
}

impl MapScope {
    pub fn quotas(self) -> &'static [CategoryQuota] {
        match self {
            MapScope::Local => LOCAL_QUOTAS,
            MapScope::Overworld => OVERWORLD_QUOTAS,
        }
    }

    pub fn backfill(self) -> Backfill<'static> {
        match self {
            MapScope::Local => Backfill::Fixed(PointKind::House),
            MapScope::Overworld => Backfill::Pick(OVERWORLD_WILDS),
        }
    }
}

/// Draw a category for each of `count` points.
///
/// Quota counts are drawn in table order, the list is truncated or
/// backfilled to exactly `count`, then shuffled.
pub fn assign_point_kinds(
    count: usize,
    quotas: &[CategoryQuota],
    backfill: Backfill<'_>,
    rng: &mut WorldRng,
) -> Vec<PointKind> {
    let mut kinds = Vec::with_capacity(count);
    for q in quotas {
        let n = rng.range_inclusive(q.min, q.max);
        kinds.extend(std::iter::repeat_n(q.kind, n));
    }
    kinds.truncate(count);
    while kinds.len() < count {
        let kind = match backfill {
            Backfill::Fixed(kind) => kind,
            Backfill::Pick(options) => match rng.pick(options) {
                Some(&kind) => kind,
                None => PointKind::House,
            },
        };
        kinds.push(kind);
    }
    rng.shuffle(&mut kinds);
    kinds
}

const GATE_WORDS: &[&str] = &[
    "north", "south", "east", "west", "front", "back", "inner", "outer", "upper", "lower",
    "old", "new", "river", "market", "iron", "stone", "wooden", "golden",
];

const SHOP_WORDS: &[&str] = &[
    "general", "magic", "armor", "weapon", "food", "clothing", "jewelry", "potion", "scroll",
    "curiosity", "herb", "trinket",
];

const INN_ADJECTIVES: &[&str] = &[
    "sleeping", "resting", "waking", "dreaming", "drowsy", "silent", "quiet", "happy", "calm",
    "peaceful", "weary", "wandering",
];

const TAVERN_ADJECTIVES: &[&str] = &[
    "drunken", "dancing", "singing", "laughing", "crying", "loud", "noisy", "angry",
    "stumbling", "jolly", "rowdy", "thirsty",
];

const HOSTEL_NOUNS: &[&str] = &[
    "pony", "dragon", "giant", "goose", "stag", "boar", "owl", "fox", "moon", "star", "maiden",
    "knight", "barrel", "lantern",
];

const FORGE_WORDS: &[&str] = &[
    "forge", "anvil", "hammer", "tongs", "bellows", "grindstone", "whetstone", "crucible",
];

const HOLY_ADJECTIVES: &[&str] = &[
    "divine", "holy", "sacred", "blessed", "radiant", "eternal", "silent", "merciful",
];

const SHRINE_NOUNS: &[&str] = &[
    "shrine", "altar", "sanctuary", "chapel", "church", "cathedral", "abbey", "priory",
];

const LORE_ADJECTIVES: &[&str] = &["book", "scroll", "tome", "codex", "quill", "ink"];

const ARCHIVE_NOUNS: &[&str] = &["library", "archive", "scriptorium", "study", "athenaeum"];

const TRADE_ADJECTIVES: &[&str] = &["craft", "trade", "merchant", "artisan", "masons", "weavers"];

const FELLOWSHIP_NOUNS: &[&str] = &[
    "guild", "union", "society", "brotherhood", "sisterhood", "fellowship", "league", "company",
];

const ARCANE_ADJECTIVES: &[&str] = &[
    "arcane", "mystic", "occult", "esoteric", "forbidden", "ancient", "hidden", "starlit",
];

const SCHOOL_NOUNS: &[&str] = &["academy", "school", "college", "institute", "conservatory"];

const GUARD_ADJECTIVES: &[&str] = &["guard", "watch", "ranger", "militia", "sentinel", "knights"];

const FORTIFICATION_NOUNS: &[&str] = &["barracks", "armory", "keep", "hold", "stockade"];

const REGION_ADJECTIVES: &[&str] = &[
    "small", "great", "grand", "mighty", "ancient", "new", "old", "eternal", "endless",
    "hidden", "lonely", "proud", "sunken", "windswept", "misty", "golden",
];

const RUIN_ADJECTIVES: &[&str] = &[
    "ancient", "old", "timeless", "forgotten", "crumbling", "fallen", "broken", "lost",
];

const WILD_ADJECTIVES: &[&str] = &[
    "dark", "light", "good", "evil", "lawful", "chaotic", "elemental", "cursed", "blessed",
    "whispering", "silent", "shadowed",
];

/// A display name for a point of `kind`. Houses come from the `house`
/// generator; everything else from the category word tables.
pub fn point_name(
    kind: PointKind,
    scope: MapScope,
    houses: &TextGenerator,
    rng: &mut WorldRng,
) -> String {
    if kind == PointKind::House {
        return houses.generate(rng);
    }
    let mut word = |table: &[&str]| capitalize(rng.pick(table).copied().unwrap_or_default());
    match (kind, scope) {
        (PointKind::Gate, _) => format!("The {} Gate", word(GATE_WORDS)),
        (PointKind::Shop, _) => format!("The {} Shop", word(SHOP_WORDS)),
        (PointKind::Inn, _) => {
            format!("The {} {}", word(INN_ADJECTIVES), word(HOSTEL_NOUNS))
        }
        (PointKind::Tavern, _) => {
            format!("The {} {}", word(TAVERN_ADJECTIVES), word(HOSTEL_NOUNS))
        }
        (PointKind::Blacksmith, _) => format!("The {}", word(FORGE_WORDS)),
        (PointKind::Temple, MapScope::Local) => {
            format!("The {} {}", word(HOLY_ADJECTIVES), word(SHRINE_NOUNS))
        }
        (PointKind::Library, _) => {
            format!("The {} {}", word(LORE_ADJECTIVES), word(ARCHIVE_NOUNS))
        }
        (PointKind::Guild, _) => {
            format!("The {} {}", word(TRADE_ADJECTIVES), word(FELLOWSHIP_NOUNS))
        }
        (PointKind::Academy, _) => {
            format!("The {} {}", word(ARCANE_ADJECTIVES), word(SCHOOL_NOUNS))
        }
        (PointKind::Barracks, _) => {
            format!("The {} {}", word(GUARD_ADJECTIVES), word(FORTIFICATION_NOUNS))
        }
        (PointKind::Ruins, _) => format!("The {} Ruins", word(RUIN_ADJECTIVES)),
        (
            PointKind::Dungeon
            | PointKind::Cave
            | PointKind::Forest
            | PointKind::Mountain
            | PointKind::Lake,
            _,
        ) => format!("The {} {}", word(WILD_ADJECTIVES), capitalize(kind.as_str())),
        _ => format!("The {} {}", word(REGION_ADJECTIVES), capitalize(kind.as_str())),
    }
}
