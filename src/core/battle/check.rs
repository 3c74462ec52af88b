use log::trace;

use crate::core::{
    battle::{State, Turn},
    map::{self, Tile},
    movement::{self, Blocked, Path},
};

/// Why a click did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BattleEnded,
    NotPlayersTurn,
    ResolutionInProgress,
    PlayerIsDead,
    BadPos,
    NoPath,
    NothingToDo,
}

/// An accepted player order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// The step slice actually walked this turn.
    pub steps: Vec<Tile>,

    /// Was the enemy's tile clicked?
    pub targets_enemy: bool,
}

/// Validates a click on `target` and turns it into a plan.
pub fn check_move(state: &State, target: Tile) -> Result<Plan, Error> {
    trace!("check_move: {}", target);
    check_can_act(state)?;
    if !state.grid().is_inboard(target) {
        return Err(Error::BadPos);
    }
    let path = plan_path(state, target).ok_or(Error::NoPath)?;
    let steps = path.truncate(state.move_range());
    let player = state.units().player;
    let enemy = state.units().enemy;
    let targets_enemy = enemy.map_or(false, |enemy| enemy.pos == target);
    let attacks_in_place = targets_enemy
        && enemy.map_or(false, |enemy| map::is_adjacent(player.pos, enemy.pos));
    if steps.is_empty() && !attacks_in_place {
        return Err(Error::NothingToDo);
    }
    Ok(Plan {
        steps,
        targets_enemy,
    })
}

/// The step slice a click on `target` would walk, for the hover marker.
///
/// Empty whenever a click would not be accepted right now.
pub fn preview(state: &State, target: Tile) -> Vec<Tile> {
    if check_can_act(state).is_err() {
        return Vec::new();
    }
    plan_path(state, target)
        .map(|path| path.truncate(state.move_range()))
        .unwrap_or_default()
}

fn check_can_act(state: &State) -> Result<(), Error> {
    match state.turn() {
        Turn::Defeated => return Err(Error::BattleEnded),
        Turn::Enemy => return Err(Error::NotPlayersTurn),
        Turn::Player => {}
    }
    if state.is_resolving() {
        return Err(Error::ResolutionInProgress);
    }
    if !state.units().player.is_alive() {
        return Err(Error::PlayerIsDead);
    }
    Ok(())
}

fn plan_path(state: &State, target: Tile) -> Option<Path> {
    let grid = state.grid();
    let start = state.units().player.pos;
    match state.units().enemy {
        Some(enemy) => movement::compute_movement_path(grid, start, target, enemy.pos),
        None => movement::find_path(grid, start, target, &Blocked::new()),
    }
}
