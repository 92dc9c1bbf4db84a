use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

/// Parameters for one map layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Area width in abstract units.
    pub width: f64,
    /// Area height in abstract units.
    pub height: f64,
    /// Minimum distance between sampled points.
    pub min_distance: f64,
    /// Maximum distance from a sample to the candidates spawned around it.
    pub max_distance: f64,
    /// Candidates tried around an active sample before it is retired.
    pub max_tries: usize,
    /// Chance that each sampled point is kept.
    pub retain_probability: f64,
    /// Non-tree triangulation edges shorter than this are restored.
    pub restore_max_length: f64,
    /// Layout draws allowed when sampling keeps fewer than two points.
    pub max_attempts: usize,
}

impl LayoutConfig {
    /// Local maps: one settlement on a 500x500 area.
    pub fn local() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            min_distance: 70.0,
            max_distance: 120.0,
            max_tries: 30,
            retain_probability: 0.7,
            restore_max_length: 120.0,
            max_attempts: 10,
        }
    }

    /// The overworld: a 1000x1000 region with more attempts per sample.
    pub fn overworld() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            max_tries: 50,
            ..Self::local()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::local()
    }
}

/// Configuration for world generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Number of local maps generated after the overworld.
    pub map_count: usize,
    pub overworld: LayoutConfig,
    pub local: LayoutConfig,
    /// Inclusive bounds on the roster size of each local map point.
    pub min_characters: usize,
    pub max_characters: usize,
    /// Attempts allowed to find an unused name before giving up.
    pub max_name_attempts: usize,
}

impl WorldGenConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config; absent fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            map_count: 5,
            overworld: LayoutConfig::overworld(),
            local: LayoutConfig::local(),
            min_characters: 2,
            max_characters: 7,
            max_name_attempts: 100,
        }
    }
}
