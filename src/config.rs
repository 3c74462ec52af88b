//! Match configuration. Fixed once a session is built.

use std::{fs, ops::RangeInclusive, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        battle::Hp,
        map::{self, Distance, Grid, Tile},
    },
    error::Error,
    Result,
};

/// Inclusive damage range.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dice {
    pub min: i32,
    pub max: i32,
}

impl Dice {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn range(self) -> RangeInclusive<i32> {
        self.min..=self.max
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DamageTable {
    /// The player's melee blow.
    pub player_strike: Dice,

    /// The enemy's blow when it starts its turn next to the player.
    pub enemy_strike: Dice,

    /// The enemy's bonus after walking up to the player.
    pub enemy_bite: Dice,
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            player_strike: Dice::new(3, 5),
            enemy_strike: Dice::new(2, 4),
            enemy_bite: Dice::new(2, 3),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub pos: Tile,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub grid_rows: i32,
    pub grid_cols: i32,
    pub move_range: i32,
    pub step_duration_ms: u64,
    pub log_capacity: usize,

    /// Edge length of one tile in presentation units.
    pub tile_size: f32,

    pub player: Spawn,
    pub enemy: Spawn,
    pub damage: DamageTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_rows: 10,
            grid_cols: 10,
            move_range: 3,
            step_duration_ms: 260,
            log_capacity: 8,
            tile_size: 1.0,
            player: Spawn {
                pos: Tile::new(8, 5),
                hp: 20,
                max_hp: 20,
            },
            enemy: Spawn {
                pos: Tile::new(1, 6),
                hp: 12,
                max_hp: 12,
            },
            damage: DamageTable::default(),
        }
    }
}

impl Config {
    pub fn from_ron_str(s: &str) -> Result<Self> {
        let config: Self = ron::de::from_str(s).map_err(Error::from_ron_de_error_in_memory)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let config: Self =
            ron::de::from_str(&s).map_err(|e| Error::from_ron_de_error(e, path.into()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_rows, self.grid_cols)
    }

    pub fn move_range(&self) -> Distance {
        Distance(self.move_range)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    pub fn validate(&self) -> Result {
        let bad = |msg: String| Err(Error::BadConfig(msg));
        if self.grid_rows <= 0 || self.grid_cols <= 0 {
            return bad(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_rows, self.grid_cols
            ));
        }
        if self.grid().tiles_count() > map::MAX_TILES {
            return bad(format!(
                "grid {}x{} is larger than {} tiles",
                self.grid_rows,
                self.grid_cols,
                map::MAX_TILES
            ));
        }
        if self.move_range <= 0 {
            return bad(format!("move_range must be positive, got {}", self.move_range));
        }
        if self.log_capacity == 0 {
            return bad("log_capacity must be positive".into());
        }
        if !(self.tile_size > 0.0) {
            return bad(format!("tile_size must be positive, got {}", self.tile_size));
        }
        let grid = self.grid();
        for (name, spawn) in &[("player", self.player), ("enemy", self.enemy)] {
            if !grid.is_inboard(spawn.pos) {
                return bad(format!("{} spawns off the board at {}", name, spawn.pos));
            }
            if spawn.hp <= 0 || spawn.hp > spawn.max_hp {
                return bad(format!(
                    "{} hp must be in 1..={}, got {}",
                    name, spawn.max_hp, spawn.hp
                ));
            }
        }
        if self.player.pos == self.enemy.pos {
            return bad(format!("both units spawn at {}", self.player.pos));
        }
        let damage = &self.damage;
        for (name, dice) in &[
            ("player_strike", damage.player_strike),
            ("enemy_strike", damage.enemy_strike),
            ("enemy_bite", damage.enemy_bite),
        ] {
            if dice.min < 0 || dice.min > dice.max {
                return bad(format!("bad {} range {}..={}", name, dice.min, dice.max));
            }
        }
        Ok(())
    }
}

impl Spawn {
    pub fn hp(&self) -> Hp {
        Hp(self.hp)
    }

    pub fn max_hp(&self) -> Hp {
        Hp(self.max_hp)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.grid(), Grid::new(10, 10));
        assert_eq!(config.move_range(), Distance(3));
        assert_eq!(config.step_duration(), Duration::from_millis(260));
        assert_eq!(config.damage.player_strike.range(), 3..=5);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = Config::from_ron_str("(move_range: 4, log_capacity: 5)").unwrap();
        assert_eq!(config.move_range, 4);
        assert_eq!(config.log_capacity, 5);
        assert_eq!(config.grid_rows, 10);
        assert_eq!(config.player, Config::default().player);
    }

    #[test]
    fn full_ron() {
        let s = r#"(
            grid_rows: 6,
            grid_cols: 7,
            player: (pos: (row: 5, col: 0), hp: 9, max_hp: 10),
            enemy: (pos: (row: 0, col: 6), hp: 4, max_hp: 4),
            damage: (enemy_bite: (min: 1, max: 1)),
        )"#;
        let config = Config::from_ron_str(s).unwrap();
        assert_eq!(config.grid(), Grid::new(6, 7));
        assert_eq!(config.player.pos, Tile::new(5, 0));
        assert_eq!(config.player.hp(), Hp(9));
        assert_eq!(config.enemy.max_hp(), Hp(4));
        assert_eq!(config.damage.enemy_bite, Dice::new(1, 1));
        assert_eq!(config.damage.player_strike, Dice::new(3, 5));
    }

    #[test]
    fn grid_size_is_capped() {
        let config = Config {
            grid_rows: 256,
            grid_cols: 256,
            ..Config::default()
        };
        config.validate().unwrap();
        let config = Config::from_ron_str("(grid_rows: 50000, grid_cols: 50000)");
        match config {
            Err(Error::BadConfig(_)) => {}
            other => panic!("huge grid accepted: {:?}", other),
        }
    }

    #[test]
    fn syntax_error_is_reported() {
        match Config::from_ron_str("(grid_rows: ") {
            Err(Error::RonDeserialize { .. }) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_bad_values() {
        let cases = vec![
            Config {
                grid_rows: 0,
                ..Config::default()
            },
            Config {
                grid_rows: 50_000,
                grid_cols: 50_000,
                ..Config::default()
            },
            Config {
                grid_rows: i32::MAX,
                grid_cols: 2,
                ..Config::default()
            },
            Config {
                move_range: 0,
                ..Config::default()
            },
            Config {
                log_capacity: 0,
                ..Config::default()
            },
            Config {
                tile_size: 0.0,
                ..Config::default()
            },
            Config {
                enemy: Spawn {
                    pos: Tile::new(10, 0),
                    hp: 5,
                    max_hp: 5,
                },
                ..Config::default()
            },
            Config {
                enemy: Spawn {
                    pos: Tile::new(8, 5),
                    hp: 5,
                    max_hp: 5,
                },
                ..Config::default()
            },
            Config {
                player: Spawn {
                    pos: Tile::new(8, 5),
                    hp: 21,
                    max_hp: 20,
                },
                ..Config::default()
            },
            Config {
                damage: DamageTable {
                    enemy_strike: Dice::new(4, 2),
                    ..DamageTable::default()
                },
                ..Config::default()
            },
        ];
        for config in cases {
            match config.validate() {
                Err(Error::BadConfig(_)) => {}
                other => panic!("{:?} accepted: {:?}", config, other),
            }
        }
    }
}
