#[macro_use]
mod macros;

pub mod character;
pub mod layout;
pub mod world;

pub use character::{Character, Gender, Stat};
pub use layout::{Edge, MapLayout, Point};
pub use world::{CharacterLocation, GameMap, GameWorld, MapPointData, OverworldMap, PointKind};
