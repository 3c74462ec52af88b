use std::time::Duration;

use log::{debug, info, trace};
use rand::RngCore;

use crate::{
    config::Dice,
    core::{
        battle::{check::Plan, event::Event, AttackMode, Hp, State, Turn, UnitId},
        map::Tile,
        movement,
        utils::roll_dice_inclusive,
    },
};

/// One resumable piece of a turn resolution.
///
/// A resolution is a chain of tasks: each executed task returns the tasks that
/// must run next, ahead of anything still queued. `Sleep` is the only task
/// that takes time; the driver waits it out and never hands it to `execute`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    Sleep(Duration),
    Step { id: UnitId, to: Tile },
    PlayerStrike { targets_enemy: bool },
    AfterPlayerStrike,
    EnemyTurn,
    EnemyAct,
    EnemyBite,
    CheckPlayerDefeat,
    Handoff,
}

/// A callback for the presentation layer, called after each applied event.
pub type Cb<'c> = &'c mut dyn FnMut(&State, &Event);

fn do_event(state: &mut State, cb: Cb, event: Event) {
    state.apply(&event);
    cb(state, &event);
}

fn log(state: &mut State, cb: Cb, text: String) {
    info!("{}", text);
    do_event(state, cb, Event::Log(text));
}

fn sleep(state: &State) -> Task {
    Task::Sleep(state.step_duration())
}

/// Engages the turn latch and lays out the player's animated walk.
pub fn begin_player_move(state: &mut State, cb: Cb, plan: Plan) -> Vec<Task> {
    debug!("begin_player_move: {:?}", plan);
    do_event(state, cb, Event::BeginResolution);
    let mut tasks = walk(state, UnitId::Player, &plan.steps);
    tasks.push(Task::PlayerStrike {
        targets_enemy: plan.targets_enemy,
    });
    tasks
}

fn walk(state: &State, id: UnitId, steps: &[Tile]) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(steps.len() * 2);
    for &to in steps {
        tasks.push(Task::Step { id, to });
        tasks.push(sleep(state));
    }
    tasks
}

pub fn execute(state: &mut State, rng: &mut dyn RngCore, task: Task, cb: Cb) -> Vec<Task> {
    trace!("execute: {:?}", task);
    assert!(state.is_resolving(), "{:?} outside of a resolution", task);
    match task {
        Task::Sleep(_) => Vec::new(),
        Task::Step { id, to } => execute_step(state, cb, id, to),
        Task::PlayerStrike { targets_enemy } => {
            execute_player_strike(state, rng, cb, targets_enemy)
        }
        Task::AfterPlayerStrike => execute_after_player_strike(state, cb),
        Task::EnemyTurn => execute_enemy_turn(state, cb),
        Task::EnemyAct => execute_enemy_act(state, rng, cb),
        Task::EnemyBite => execute_enemy_bite(state, rng, cb),
        Task::CheckPlayerDefeat => execute_check_player_defeat(state, cb),
        Task::Handoff => execute_handoff(state, cb),
    }
}

fn execute_step(state: &mut State, cb: Cb, id: UnitId, to: Tile) -> Vec<Task> {
    let from = state.units().get(id).pos;
    do_event(state, cb, Event::MoveTo { id, from, to });
    Vec::new()
}

fn attack(
    state: &mut State,
    rng: &mut dyn RngCore,
    cb: Cb,
    attacker_id: UnitId,
    mode: AttackMode,
    dice: Dice,
) -> Hp {
    let damage = Hp(roll_dice_inclusive(rng, dice.range()));
    let target_id = attacker_id.foe();
    let text = match (attacker_id, mode) {
        (UnitId::Player, _) => format!("Hero strikes the enemy for {} damage.", damage.0),
        (UnitId::Enemy, AttackMode::Strike) => {
            format!("Enemy strikes the hero for {} damage.", damage.0)
        }
        (UnitId::Enemy, AttackMode::Bite) => {
            format!("Enemy lunges and bites the hero for {} damage.", damage.0)
        }
    };
    log(state, cb, text);
    let event = Event::Attack {
        attacker_id,
        target_id,
        mode,
        damage,
    };
    do_event(state, cb, event);
    damage
}

fn execute_player_strike(
    state: &mut State,
    rng: &mut dyn RngCore,
    cb: Cb,
    targets_enemy: bool,
) -> Vec<Task> {
    if !(targets_enemy && state.are_engaged()) {
        return end_player_turn(state, cb);
    }
    let dice = state.damage().player_strike;
    attack(state, rng, cb, UnitId::Player, AttackMode::Strike, dice);
    vec![sleep(state), Task::AfterPlayerStrike]
}

fn execute_after_player_strike(state: &mut State, cb: Cb) -> Vec<Task> {
    let enemy_hp = state.units().get(UnitId::Enemy).hp;
    if enemy_hp > Hp(0) {
        return end_player_turn(state, cb);
    }
    do_event(state, cb, Event::Remove { id: UnitId::Enemy });
    log(state, cb, "The enemy is defeated!".into());
    // Beating the enemy does not cede control: the player acts again.
    do_event(state, cb, Event::EndResolution(Turn::Player));
    Vec::new()
}

fn end_player_turn(state: &mut State, cb: Cb) -> Vec<Task> {
    do_event(state, cb, Event::SetTurn(Turn::Enemy));
    vec![Task::EnemyTurn]
}

fn execute_enemy_turn(state: &mut State, cb: Cb) -> Vec<Task> {
    let player_alive = state.units().player.is_alive();
    if !player_alive || state.units().enemy.is_none() {
        let turn = if player_alive {
            Turn::Player
        } else {
            Turn::Defeated
        };
        do_event(state, cb, Event::EndResolution(turn));
        return Vec::new();
    }
    // Telegraph before the enemy acts.
    vec![sleep(state), Task::EnemyAct]
}

fn execute_enemy_act(state: &mut State, rng: &mut dyn RngCore, cb: Cb) -> Vec<Task> {
    if state.are_engaged() {
        let dice = state.damage().enemy_strike;
        attack(state, rng, cb, UnitId::Enemy, AttackMode::Strike, dice);
        return vec![sleep(state), Task::CheckPlayerDefeat];
    }
    let enemy_pos = state.units().get(UnitId::Enemy).pos;
    let player_pos = state.units().player.pos;
    let path = movement::compute_movement_path(state.grid(), enemy_pos, player_pos, player_pos);
    let steps = path
        .map(|path| path.truncate(state.move_range()))
        .unwrap_or_default();
    debug!("enemy approaches: {:?}", steps);
    let mut tasks = walk(state, UnitId::Enemy, &steps);
    tasks.push(Task::EnemyBite);
    tasks
}

fn execute_enemy_bite(state: &mut State, rng: &mut dyn RngCore, cb: Cb) -> Vec<Task> {
    if !state.are_engaged() {
        return vec![Task::Handoff];
    }
    let dice = state.damage().enemy_bite;
    attack(state, rng, cb, UnitId::Enemy, AttackMode::Bite, dice);
    vec![sleep(state), Task::CheckPlayerDefeat]
}

fn execute_check_player_defeat(state: &mut State, cb: Cb) -> Vec<Task> {
    if state.units().player.is_alive() {
        return vec![Task::Handoff];
    }
    log(state, cb, "The hero has fallen.".into());
    do_event(state, cb, Event::EndResolution(Turn::Defeated));
    Vec::new()
}

fn execute_handoff(state: &mut State, cb: Cb) -> Vec<Task> {
    do_event(state, cb, Event::EndResolution(Turn::Player));
    Vec::new()
}
