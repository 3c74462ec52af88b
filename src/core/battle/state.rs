use std::time::Duration;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, DamageTable},
    core::{
        battle::{event::Event, CombatLog, Hp, Turn, Unit, UnitId, Units},
        map::{self, Distance, Grid},
        utils,
    },
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleResult {
    PlayerDefeated,
    EnemyDefeated,
}

/// Everything the turn engine owns. Mutated only through `apply`.
#[derive(Clone, Debug)]
pub struct State {
    grid: Grid,
    move_range: Distance,
    step_duration: Duration,
    damage: DamageTable,
    units: Units,
    turn: Turn,
    is_resolving: bool,
    log: CombatLog,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let spawn = |spawn: &crate::config::Spawn| Unit {
            pos: spawn.pos,
            hp: spawn.hp(),
            max_hp: spawn.max_hp(),
        };
        Self {
            grid: config.grid(),
            move_range: config.move_range(),
            step_duration: config.step_duration(),
            damage: config.damage,
            units: Units {
                player: spawn(&config.player),
                enemy: Some(spawn(&config.enemy)),
            },
            turn: Turn::Player,
            is_resolving: false,
            log: CombatLog::new(config.log_capacity),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn move_range(&self) -> Distance {
        self.move_range
    }

    pub fn step_duration(&self) -> Duration {
        self.step_duration
    }

    pub fn damage(&self) -> &DamageTable {
        &self.damage
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Is the turn latch engaged?
    pub fn is_resolving(&self) -> bool {
        self.is_resolving
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn battle_result(&self) -> Option<BattleResult> {
        if self.turn == Turn::Defeated {
            Some(BattleResult::PlayerDefeated)
        } else if self.units.enemy.is_none() {
            Some(BattleResult::EnemyDefeated)
        } else {
            None
        }
    }

    /// Are both units alive and standing next to each other?
    pub fn are_engaged(&self) -> bool {
        match self.units.enemy {
            Some(enemy) => {
                self.units.player.is_alive() && map::is_adjacent(self.units.player.pos, enemy.pos)
            }
            None => false,
        }
    }

    pub(crate) fn apply(&mut self, event: &Event) {
        trace!("State::apply: {:?}", event);
        match *event {
            Event::BeginResolution => {
                assert!(!self.is_resolving, "turn latch engaged twice");
                self.is_resolving = true;
            }
            Event::MoveTo { id, from, to } => self.apply_move_to(id, from, to),
            Event::Attack {
                target_id, damage, ..
            } => self.apply_attack(target_id, damage),
            Event::Remove { id } => {
                assert_eq!(id, UnitId::Enemy, "the player never leaves the board");
                assert!(self.units.enemy.is_some());
                self.units.enemy = None;
            }
            Event::SetTurn(turn) => {
                assert_ne!(self.turn, Turn::Defeated);
                self.turn = turn;
            }
            Event::EndResolution(turn) => {
                assert!(self.is_resolving, "turn latch released twice");
                self.is_resolving = false;
                self.turn = turn;
            }
            Event::Log(ref text) => self.log.push(text.as_str()),
        }
    }

    fn apply_move_to(&mut self, id: UnitId, from: map::Tile, to: map::Tile) {
        assert!(self.grid.is_inboard(to), "{} steps off the board to {}", id, to);
        assert!(map::is_adjacent(from, to));
        if let Some(other) = self.units.get_opt(id.foe()) {
            assert_ne!(other.pos, to, "{} steps onto its foe", id);
        }
        let unit = self.units.get_mut(id);
        assert_eq!(unit.pos, from);
        unit.pos = to;
    }

    fn apply_attack(&mut self, target_id: UnitId, damage: Hp) {
        assert!(damage >= Hp(0));
        let unit = self.units.get_mut(target_id);
        unit.hp = Hp(utils::clamp_min(unit.hp.0 - damage.0, 0));
        debug_assert!(unit.hp >= Hp(0) && unit.hp <= unit.max_hp);
    }
}
