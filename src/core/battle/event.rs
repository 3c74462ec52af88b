use serde::{Deserialize, Serialize};

use crate::core::{
    battle::{AttackMode, Hp, Turn, UnitId},
    map::Tile,
};

/// A single state change. Everything that happens to `State` goes through one of these.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The turn latch is engaged: input is ignored until `EndResolution`.
    BeginResolution,

    /// One tile of an animated walk.
    MoveTo { id: UnitId, from: Tile, to: Tile },

    Attack {
        attacker_id: UnitId,
        target_id: UnitId,
        mode: AttackMode,
        damage: Hp,
    },

    /// Only the enemy can be taken off the board.
    Remove { id: UnitId },

    SetTurn(Turn),

    /// Releases the turn latch and hands the turn over.
    EndResolution(Turn),

    Log(String),
}
