use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::rng::WorldRng;

const LOCATION_PREFIXES: &[&str] = &[
    "ash", "oak", "iron", "stone", "raven", "wolf", "elder", "thorn", "red", "black",
    "white", "grey", "silver", "gold", "frost", "storm", "moss", "pine", "willow", "amber",
    "dusk", "dawn", "bright", "cold", "high", "deep", "mire", "hollow", "lucan", "vale",
];

const LOCATION_SUFFIXES: &[&str] = &[
    "ford", "haven", "hold", "bury", "wick", "stead", "moor", "dale", "mere", "gate",
    "crest", "fall", "watch", "reach", "brook", "field", "wood", "helm", "port", "vale",
];

const HOUSE_FAMILIES: &[&str] = &[
    "Ashford", "Blackthorn", "Brightwater", "Coldwell", "Dunmere",
    "Fairwind", "Greymoor", "Hartwood", "Ironhand", "Kingsward",
    "Longbridge", "Mossbank", "Northgate", "Oakshield", "Pinehurst",
    "Ravencrest", "Silverleaf", "Stonemark", "Thornwall", "Whitevale",
];

const DWELLINGS: &[&str] = &[
    "house", "cottage", "manor", "lodge", "hall", "cabin", "homestead", "residence", "hut",
    "villa",
];

/// A postfix string generator: `rpn` is evaluated left to right against a
/// stack of strings, with `$key` tokens drawing from `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGenerator {
    pub name: String,
    pub rpn: Vec<String>,
    #[serde(default)]
    pub data: BTreeMap<String, Vec<String>>,
}

impl TextGenerator {
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn generate(&self, rng: &mut WorldRng) -> String {
        let mut stack: Vec<String> = Vec::new();
        for token in &self.rpn {
            if token.starts_with('$') {
                if let Some(table) = self.data.get(token) {
                    stack.push(rng.pick(table).cloned().unwrap_or_default());
                    continue;
                }
            }
            match token.as_str() {
                "concat" => {
                    let right = stack.pop().unwrap_or_default();
                    let left = stack.pop().unwrap_or_default();
                    stack.push(left + &right);
                }
                "capitalize" => {
                    let top = stack.pop().unwrap_or_default();
                    stack.push(capitalize(&top));
                }
                _ => stack.push(token.clone()),
            }
        }
        stack.concat()
    }

    /// Settlement and site names: `Ash` + `ford`.
    pub fn location_name() -> Self {
        Self::builtin(
            "location-name",
            &["$prefix", "$suffix", "concat", "capitalize"],
            &[("$prefix", LOCATION_PREFIXES), ("$suffix", LOCATION_SUFFIXES)],
        )
    }

    /// House names: a family name and a dwelling, `Ashford Cottage`.
    pub fn house_name() -> Self {
        Self::builtin(
            "house",
            &["$family", " ", "concat", "$dwelling", "capitalize", "concat"],
            &[("$family", HOUSE_FAMILIES), ("$dwelling", DWELLINGS)],
        )
    }

    fn builtin(name: &str, rpn: &[&str], data: &[(&str, &[&str])]) -> Self {
        Self {
            name: name.to_string(),
            rpn: rpn.iter().map(|t| t.to_string()).collect(),
            data: data
                .iter()
                .map(|(key, words)| {
                    (
                        key.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
