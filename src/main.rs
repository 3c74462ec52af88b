use std::{
    path::Path,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use log::info;
use skirmish::{
    core::{battle::Turn, map::Tile},
    Config, Session,
};

const CONFIG_PATH: &str = "assets/config.ron";
const FRAME: Duration = Duration::from_millis(16);
const MAX_TURNS: usize = 100;

fn load_config() -> skirmish::Result<Config> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Config::load(path)
    } else {
        info!("No {}, using the default config", CONFIG_PATH);
        Ok(Config::default())
    }
}

fn seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|time| time.as_secs())
        .unwrap_or(0)
}

fn print_board(session: &Session) {
    let grid = session.config().grid();
    let units = session.units();
    for row in 0..grid.rows {
        let line: String = (0..grid.cols)
            .map(|col| {
                let tile = Tile::new(row, col);
                if tile == units.player.pos {
                    '@'
                } else if units.enemy.map(|enemy| enemy.pos) == Some(tile) {
                    'E'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{}", line);
    }
    let enemy_hp = units.enemy.map_or(0, |enemy| enemy.hp.0);
    println!(
        "hero {}/{}  enemy {}",
        units.player.hp.0, units.player.max_hp.0, enemy_hp
    );
}

/// Plays a match headless: the hero always heads for the enemy.
fn main() -> skirmish::Result {
    env_logger::init();
    let config = load_config()?;
    quad_rand::srand(seed());
    let mut session = Session::new(config)?;
    for _ in 0..MAX_TURNS {
        if session.turn() != Turn::Player {
            break;
        }
        let enemy = match session.units().enemy {
            Some(enemy) => enemy,
            None => break,
        };
        let point = session.tile_to_world(enemy.pos);
        session.on_tile_hover(point);
        session.on_tile_click(point);
        if !session.is_resolving() {
            break;
        }
        while session.is_resolving() {
            session.tick(FRAME);
        }
        print_board(&session);
        if let Some(line) = session.log().last() {
            println!("{}", line);
        }
        println!();
    }
    let snapshot = session.teardown();
    println!("Turn: {}", snapshot.turn);
    for line in &snapshot.log {
        println!("  {}", line);
    }
    Ok(())
}
