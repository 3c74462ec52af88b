use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::map::Tile;

pub use crate::core::battle::{
    check::check_move,
    combat_log::CombatLog,
    execute::execute,
    state::{BattleResult, State},
};

pub mod check;
pub mod combat_log;
pub mod event;
pub mod execute;
pub mod state;


#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitId {
    Player,
    Enemy,
}

impl UnitId {
    pub fn foe(self) -> Self {
        match self {
            UnitId::Player => UnitId::Enemy,
            UnitId::Enemy => UnitId::Player,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UnitId::Player => write!(f, "player"),
            UnitId::Enemy => write!(f, "enemy"),
        }
    }
}

/// Hit points.
#[derive(
    Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Hp(pub i32);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    pub pos: Tile,
    pub hp: Hp,
    pub max_hp: Hp,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.hp > Hp(0)
    }
}

/// The two combatants. The enemy disappears once it is beaten;
/// the player always stays on the board.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Units {
    pub player: Unit,
    pub enemy: Option<Unit>,
}

impl Units {
    pub fn get_opt(&self, id: UnitId) -> Option<&Unit> {
        match id {
            UnitId::Player => Some(&self.player),
            UnitId::Enemy => self.enemy.as_ref(),
        }
    }

    pub fn get(&self, id: UnitId) -> &Unit {
        self.get_opt(id)
            .unwrap_or_else(|| panic!("no {} on the board", id))
    }

    pub fn get_mut(&mut self, id: UnitId) -> &mut Unit {
        match id {
            UnitId::Player => &mut self.player,
            UnitId::Enemy => self
                .enemy
                .as_mut()
                .unwrap_or_else(|| panic!("no {} on the board", id)),
        }
    }
}

/// Who may act. `Defeated` is terminal.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Player,
    Enemy,
    Defeated,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Turn::Player => write!(f, "player"),
            Turn::Enemy => write!(f, "enemy"),
            Turn::Defeated => write!(f, "defeated"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackMode {
    /// A regular melee blow.
    Strike,

    /// The enemy's smaller follow-up after closing in.
    Bite,
}
