//! Rendering-agnostic game logic.

pub mod battle;
pub mod map;
pub mod movement;
pub mod utils;
