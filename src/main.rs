//! Squirm headless demo
//!
//! Runs an autopiloted session to completion and logs what happens.
//! Useful for eyeballing balance and for soak-testing the simulation.
//!
//! Usage: `squirm [seed] [settings.json]`

use std::path::Path;

use glam::Vec2;

use squirm::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use squirm::{Leaderboard, Settings};

/// Hard stop so a dominant run still terminates
const MAX_TICKS: u64 = 50_000;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let config = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    log::info!(
        "starting session: seed {seed}, difficulty {}",
        config.difficulty.as_str()
    );
    let mut state = GameState::new(seed, config);

    loop {
        let input = autopilot(&state);
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::WormKilled { victim, killer } => match killer {
                    Some(killer) => log::info!("{victim} was taken down by {killer}"),
                    None => log::info!("{victim} died"),
                },
                GameEvent::MobEaten { by } => log::info!("{by} ate a mob"),
                GameEvent::GameOver { length, kills } => {
                    println!(
                        "game over after {} ticks: length {}, {kills} kills",
                        state.time_ticks,
                        length.floor(),
                    );
                }
                GameEvent::HudRefresh => {
                    if let Some(rank) = Leaderboard::player_rank(&state) {
                        log::debug!(
                            "tick {}: rank {rank}, length {}",
                            state.time_ticks,
                            state.player().map(|p| p.target_length.floor()).unwrap_or(0.0)
                        );
                    }
                }
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
        if state.time_ticks >= MAX_TICKS {
            println!(
                "survived the full {} ticks at length {}",
                MAX_TICKS,
                state.player().map(|p| p.target_length.floor()).unwrap_or(0.0)
            );
            break;
        }
    }

    println!("final standings:");
    for entry in Leaderboard::from_state(&state).entries {
        println!(
            "  {:>2}. {:<10} length {:>5}  kills {}{}",
            entry.rank,
            entry.name,
            entry.length,
            entry.kills,
            if entry.is_player { "  (you)" } else { "" }
        );
    }
}

/// Simple stand-in for a human: head for the nearest pellet, boost once
/// there is length to spare.
fn autopilot(state: &GameState) -> TickInput {
    let Some(player) = state.player() else {
        return TickInput::default();
    };

    let pointer = state
        .foods
        .iter()
        .min_by(|a, b| {
            player
                .pos
                .distance_squared(a.pos)
                .total_cmp(&player.pos.distance_squared(b.pos))
        })
        .map(|food| food.pos - player.pos)
        .filter(|v| v.length_squared() > 0.0)
        .or(Some(Vec2::new(1.0, 0.0)));

    TickInput {
        pointer,
        boost: player.target_length > 60.0,
        pause: false,
    }
}
