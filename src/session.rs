//! One match from the presentation layer's point of view.

use std::{collections::VecDeque, time::Duration};

use glam::Vec3;
use log::{debug, info, trace};
use rand::RngCore;
use serde::Serialize;

use crate::{
    config::Config,
    core::{
        battle::{
            check,
            event::Event,
            execute::{self, Task},
            BattleResult, CombatLog, State, Turn, Units,
        },
        map::Tile,
        utils,
    },
    geom, Result,
};

/// A read-only picture of everything the renderer needs.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub units: Units,
    pub turn: Turn,
    pub planned_path: Vec<Tile>,
    pub log: Vec<String>,
    pub is_resolving: bool,
}

/// Owns the combat state and sequences every timed turn resolution.
///
/// Input is accepted only on the player's turn while no resolution is in
/// flight. A resolution is a queue of tasks separated by sleeps; `tick` plays
/// it out in real time.
pub struct Session {
    config: Config,
    state: State,
    rng: Box<dyn RngCore>,
    tasks: VecDeque<Task>,
    planned_path: Vec<Tile>,
    events: Vec<Event>,
}

impl Session {
    /// Starts a match with the global `quad_rand` generator.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_rng(config, utils::zrng())
    }

    /// Starts a match rolling damage with `rng`.
    pub fn with_rng(config: Config, rng: Box<dyn RngCore>) -> Result<Self> {
        config.validate()?;
        let state = State::new(&config);
        info!(
            "Session: new {}x{} match, player at {}, enemy at {}",
            config.grid_rows, config.grid_cols, config.player.pos, config.enemy.pos
        );
        Ok(Self {
            config,
            state,
            rng,
            tasks: VecDeque::new(),
            planned_path: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Ends the match and hands back its final picture.
    pub fn teardown(self) -> Snapshot {
        let snapshot = self.snapshot();
        info!(
            "Session: teardown, turn={}, result={:?}, pending tasks={}",
            snapshot.turn,
            self.state.battle_result(),
            self.tasks.len()
        );
        snapshot
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn units(&self) -> &Units {
        self.state.units()
    }

    pub fn turn(&self) -> Turn {
        self.state.turn()
    }

    pub fn log(&self) -> &CombatLog {
        self.state.log()
    }

    pub fn planned_path(&self) -> &[Tile] {
        &self.planned_path
    }

    pub fn is_resolving(&self) -> bool {
        self.state.is_resolving()
    }

    pub fn battle_result(&self) -> Option<BattleResult> {
        self.state.battle_result()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            units: *self.state.units(),
            turn: self.state.turn(),
            planned_path: self.planned_path.clone(),
            log: self.state.log().to_vec(),
            is_resolving: self.state.is_resolving(),
        }
    }

    /// Events applied since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn tile_at(&self, point: Vec3) -> Option<Tile> {
        geom::board_from_point(self.config.grid(), self.config.tile_size, point)
    }

    pub fn tile_to_world(&self, tile: Tile) -> Vec3 {
        geom::tile_to_world(self.config.grid(), self.config.tile_size, tile)
    }

    pub fn on_tile_hover(&mut self, point: Vec3) {
        if let Some(tile) = self.tile_at(point) {
            self.hover_tile(tile);
        }
    }

    pub fn on_tile_click(&mut self, point: Vec3) {
        let tile = match self.tile_at(point) {
            Some(tile) => tile,
            None => return,
        };
        if let Err(err) = self.submit_player_move(tile) {
            debug!("Session: click on {} ignored: {:?}", tile, err);
        }
    }

    /// Recomputes the preview path toward `tile`.
    pub fn hover_tile(&mut self, tile: Tile) {
        self.planned_path = check::preview(&self.state, tile);
        trace!("Session: hover {}: {:?}", tile, self.planned_path);
    }

    /// Orders the player toward `tile`; walks, maybe strikes, then lets the
    /// enemy answer. The first step lands immediately, the rest comes with `tick`.
    pub fn submit_player_move(&mut self, tile: Tile) -> std::result::Result<(), check::Error> {
        let plan = check::check_move(&self.state, tile)?;
        info!("Session: player move to {}: {:?}", tile, plan);
        self.planned_path.clear();
        let Self { state, events, .. } = self;
        let tasks = execute::begin_player_move(
            state,
            &mut |state, event| record(events, state, event),
            plan,
        );
        self.tasks.extend(tasks);
        self.tick(Duration::from_secs(0));
        Ok(())
    }

    /// Advances the running resolution by `dtime`.
    pub fn tick(&mut self, dtime: Duration) {
        let mut budget = dtime;
        while let Some(task) = self.tasks.pop_front() {
            if let Task::Sleep(time) = task {
                if time > budget {
                    self.tasks.push_front(Task::Sleep(time - budget));
                    return;
                }
                budget -= time;
                continue;
            }
            self.run(task);
        }
        debug_assert!(!self.state.is_resolving(), "turn latch is stuck");
    }

    /// Plays the running resolution out to its end, skipping all waits.
    pub fn flush(&mut self) {
        while let Some(task) = self.tasks.pop_front() {
            if let Task::Sleep(_) = task {
                continue;
            }
            self.run(task);
        }
        debug_assert!(!self.state.is_resolving(), "turn latch is stuck");
    }

    /// Time left until the next scheduled task, if a resolution is running.
    pub fn time_to_next_task(&self) -> Option<Duration> {
        match self.tasks.front()? {
            Task::Sleep(time) => Some(*time),
            _ => Some(Duration::from_secs(0)),
        }
    }

    fn run(&mut self, task: Task) {
        let Self {
            state, rng, events, ..
        } = self;
        let next = execute::execute(state, rng.as_mut(), task, &mut |state, event| {
            record(events, state, event)
        });
        for task in next.into_iter().rev() {
            self.tasks.push_front(task);
        }
        if !self.state.is_resolving() {
            info!("Session: resolution over, turn={}", self.state.turn());
        }
    }
}

/// Queues an applied event for the presentation layer.
///
/// Every event but the final `EndResolution` lands while the latch is engaged,
/// and the player never leaves the board.
fn record(events: &mut Vec<Event>, state: &State, event: &Event) {
    match event {
        Event::EndResolution(_) => assert!(!state.is_resolving(), "latch not released"),
        _ => assert!(state.is_resolving(), "{:?} outside of a resolution", event),
    }
    let player = state.units().player;
    assert!(state.grid().is_inboard(player.pos));
    trace!("Session: event {:?}, turn={}", event, state.turn());
    events.push(event.clone());
}
