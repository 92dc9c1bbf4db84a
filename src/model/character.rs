use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Gender {
    Male,
    Female,
}

string_enum!(Gender {
    Male => "male",
    Female => "female",
});

impl Gender {
    pub fn subject_pronoun(self) -> &'static str {
        match self {
            Gender::Male => "he",
            Gender::Female => "she",
        }
    }

    pub fn object_pronoun(self) -> &'static str {
        match self {
            Gender::Male => "him",
            Gender::Female => "her",
        }
    }
}

/// A named attribute or skill score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub race: String,
    pub gender: Gender,
    pub attributes: Vec<Stat>,
    pub skills: Vec<Stat>,
}
