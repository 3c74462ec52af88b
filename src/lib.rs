//! A grid-based tactical combat engine: one hero against one enemy on a
//! small board, breadth-first pathfinding, and a timed turn state machine.

pub mod config;
pub mod core;
pub mod error;
pub mod geom;
pub mod session;

pub use crate::{config::Config, error::Error, session::Session};

pub type Result<T = ()> = std::result::Result<T, Error>;
