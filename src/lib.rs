#[macro_use]
pub mod model;

pub mod dialogue;
pub mod dsl;
pub mod error;
pub mod flush;
pub mod graph;
pub mod id;
pub mod journal;
pub mod pathfinding;
pub mod rng;
pub mod session;
pub mod worldgen;

pub use error::{DialogueError, DslError, GenerationError, ResourceError};
pub use id::IdGenerator;
pub use model::{Character, Edge, GameMap, GameWorld, MapLayout, Point};
pub use pathfinding::find_path;
pub use rng::WorldRng;
pub use session::{GameResources, GameSession, PlayerLocation};
pub use worldgen::{WorldGenConfig, generate_world};
