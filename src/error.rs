use thiserror::Error;

/// Failures while building a world. These are fatal for the current
/// "new game" request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Sampling left fewer than two points to connect.
    #[error("layout needs at least 2 points, sampled {sampled} and kept {retained}")]
    TooFewPoints { sampled: usize, retained: usize },

    /// The spanning tree did not reach every point.
    #[error("layout graph has {components} components after spanning tree construction")]
    Disconnected { components: usize },

    /// A unique-name loop ran out of attempts.
    #[error("could not find a unique {what} after {attempts} attempts")]
    NameExhausted { what: &'static str, attempts: usize },

    /// No characters were generated, so nothing can be bound to NPC references.
    #[error("world has no characters")]
    EmptyWorld,
}

/// Evaluation failures of the quest DSL. Authored content is expected to be
/// well formed, so these always propagate to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DslError {
    #[error("`{instruction}` needs {needed} operand(s), stack has {available}")]
    StackUnderflow {
        instruction: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("`{instruction}` expected {expected}, found {found}")]
    TypeMismatch {
        instruction: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Conditions only read the journal.
    #[error("`{instruction}` writes the journal and cannot run in a condition")]
    ReadOnly { instruction: &'static str },
}

/// Failures of the conversation state machine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialogueError {
    /// The greeting topic had no line for this NPC. The greeting table must
    /// end with an unconditional fallback line.
    #[error("no greeting line matches npc {npc}")]
    MissingGreeting { npc: String },

    #[error("no dialogue is active")]
    NoActiveDialogue,

    #[error("unknown dialogue {0}")]
    UnknownDialogue(String),

    #[error("no character with id {0}")]
    UnknownNpc(String),

    #[error(transparent)]
    Dsl(#[from] DslError),
}

/// Failures while parsing resource documents handed over by the loader.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("malformed resource: {0}")]
    Json(#[from] serde_json::Error),

    #[error("resource io: {0}")]
    Io(#[from] std::io::Error),
}
