//! Per-tick simulation driver
//!
//! Advances one fixed step: worm decisions and movement, collision
//! checks, mob behavior, then population maintenance. Order matters and
//! mirrors the draw loop's expectations: worms first, mobs second,
//! replenishment last.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use rand::Rng;

use super::collision::{SEGMENT_STRIDE, find_fatal_collision, head_eats_food, mob_touches_worm};
use super::state::{Controller, Food, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::settings::Difficulty;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer/joystick vector relative to the viewport center; the
    /// player steers toward it wherever the camera sits
    pub pointer: Option<Vec2>,
    /// Boost held (mouse down / space / boost button)
    pub boost: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Nothing decays while paused or after the run ends
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    update_worms(state, input);
    state.worms.retain(|w| w.alive);

    if state.living_ai_count() < state.config.min_ai_worms {
        state.spawn_ai();
    }

    update_mobs(state);

    for food in &mut state.foods {
        food.pulse += FOOD_PULSE_RATE;
    }
    if state.foods.len() < state.config.food_count {
        state.spawn_food(None, 1);
    }
    if state.config.replenish_mobs && state.mobs.len() < state.config.mob_count {
        state.spawn_mob();
    }

    if state.rng.random::<f32>() < HUD_REFRESH_CHANCE {
        state.events.push(GameEvent::HudRefresh);
    }
}

/// Decision, movement, and collision for every living worm in turn
fn update_worms(state: &mut GameState, input: &TickInput) {
    for i in 0..state.worms.len() {
        if !state.worms[i].alive {
            continue;
        }

        match state.worms[i].controller {
            Controller::Player => steer_player(state, i, input),
            Controller::Ai(tier) => steer_ai(state, i, tier),
        }

        state.worms[i].advance();
        eat_food(state, i);

        if let Some(killer) = find_fatal_collision(&state.worms, i) {
            kill_worm(state, i, Some(killer));
        }
    }
}

/// Player steering: turn toward the pointer, boost on demand at the cost
/// of shedding length behind the tail.
fn steer_player(state: &mut GameState, i: usize, input: &TickInput) {
    let GameState {
        worms, foods, rng, ..
    } = state;
    let worm = &mut worms[i];

    if let Some(pointer) = input.pointer {
        if pointer.length_squared() > 0.0 {
            worm.target_heading = pointer.y.atan2(pointer.x);
        }
    }

    if input.boost && worm.target_length > MIN_WORM_LENGTH {
        worm.speed = BOOST_SPEED;
        if rng.random::<f32>() < BOOST_SHED_CHANCE {
            let value = worm.shed();
            let tail = worm.tail();
            foods.push(Food::new(rng, tail, value));
        }
    } else {
        worm.speed = worm.profile.base_speed;
    }
}

/// Heuristic steering for AI worms.
///
/// Priority order: avoid the walls, chase a nearby player if aggressive,
/// otherwise sample food and head for the best-scoring pellet. Speed is
/// reset to the tier base every tick; only the boost exceptions below
/// override it.
fn steer_ai(state: &mut GameState, i: usize, tier: Difficulty) {
    let player_pos = state
        .player()
        .filter(|p| p.alive)
        .map(|p| p.pos);
    let GameState {
        worms, foods, rng, ..
    } = state;
    let worm = &mut worms[i];

    worm.speed = worm.profile.base_speed;

    // Bounds avoidance overrides any target this tick
    let avoiding = if worm.pos.x < -WORLD_SIZE + WALL_MARGIN {
        worm.target_heading = 0.0;
        true
    } else if worm.pos.x > WORLD_SIZE - WALL_MARGIN {
        worm.target_heading = PI;
        true
    } else if worm.pos.y < -WORLD_SIZE + WALL_MARGIN {
        worm.target_heading = FRAC_PI_2;
        true
    } else if worm.pos.y > WORLD_SIZE - WALL_MARGIN {
        worm.target_heading = -FRAC_PI_2;
        true
    } else {
        false
    };

    if !avoiding {
        let chasing = match player_pos {
            Some(pos)
                if worm.profile.aggression > 0.0
                    && worm.pos.distance(pos)
                        < CHASE_RANGE_PER_AGGRESSION * worm.profile.aggression =>
            {
                worm.target_heading = (pos.y - worm.pos.y).atan2(pos.x - worm.pos.x);
                true
            }
            _ => false,
        };

        if !chasing {
            // Sample a handful of pellets and take the best-scoring one
            let mut best: Option<&Food> = None;
            let mut best_score = FOOD_SCORE_CUTOFF;
            if !foods.is_empty() {
                for _ in 0..tier.food_samples() {
                    let food = &foods[rng.random_range(0..foods.len())];
                    let score = tier.food_score(worm.pos.distance(food.pos), food.value);
                    if score < best_score {
                        best_score = score;
                        best = Some(food);
                    }
                }
            }

            match best {
                Some(food) => {
                    worm.target_heading =
                        (food.pos.y - worm.pos.y).atan2(food.pos.x - worm.pos.x);
                    // Top tier sprints for big drops once it can afford to
                    if tier == Difficulty::VeryHard
                        && food.value > 5
                        && worm.target_length > 30.0
                    {
                        worm.speed = BOOST_SPEED;
                    }
                }
                None => {
                    if rng.random::<f32>() < WANDER_CHANCE {
                        worm.target_heading += rng.random_range(-1.0..1.0);
                    }
                }
            }
        }
    }

    // Big top-tier worms boost on a whim
    if tier == Difficulty::VeryHard
        && worm.target_length > 50.0
        && rng.random::<f32>() < SPONTANEOUS_BOOST_CHANCE
    {
        worm.speed = BOOST_SPEED;
    }
}

/// Consume every pellet overlapping the worm's head. Iterates from the
/// end so removal never skips an element.
fn eat_food(state: &mut GameState, i: usize) {
    let GameState { worms, foods, .. } = state;
    let worm = &mut worms[i];

    for j in (0..foods.len()).rev() {
        if head_eats_food(worm.pos, worm.radius, &foods[j]) {
            worm.grow(foods[j].value as f32 * FOOD_GROWTH_FACTOR);
            foods.swap_remove(j);
        }
    }
}

/// Mark a worm dead, credit the killer, and scatter roughly half of its
/// body as food along the former path. A player death ends the run.
fn kill_worm(state: &mut GameState, i: usize, killer: Option<usize>) {
    state.worms[i].alive = false;

    let victim = state.worms[i].name.clone();
    let killer = killer.map(|k| {
        state.worms[k].kills += 1;
        state.worms[k].name.clone()
    });

    let drops: Vec<Vec2> = state.worms[i]
        .segments
        .iter()
        .copied()
        .step_by(SEGMENT_STRIDE)
        .collect();
    for pos in drops {
        state.spawn_food(Some(pos), DEATH_DROP_VALUE);
    }

    log::debug!("{victim} died{}", match &killer {
        Some(k) => format!(", killed by {k}"),
        None => String::new(),
    });
    state.events.push(GameEvent::WormKilled { victim, killer });

    if state.worms[i].is_player() {
        let length = state.worms[i].target_length;
        let kills = state.worms[i].kills;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { length, kills });
        log::info!("game over: length {}, kills {kills}", length.floor());
    }
}

/// Mob behavior: flee the player on sight, wander otherwise, reflect off
/// the walls, and get eaten by any worm head that touches.
fn update_mobs(state: &mut GameState) {
    let player_pos = state
        .player()
        .filter(|p| p.alive)
        .map(|p| p.pos);
    let GameState {
        worms,
        mobs,
        rng,
        events,
        ..
    } = state;

    for mob in mobs.iter_mut() {
        if !mob.alive {
            continue;
        }

        match player_pos {
            // Instant heading snap directly away from the player
            Some(pos) if mob.pos.distance(pos) < MOB_FLEE_RADIUS => {
                mob.heading = (pos.y - mob.pos.y).atan2(pos.x - mob.pos.x) + PI;
            }
            _ => {
                if rng.random::<f32>() < WANDER_CHANCE {
                    mob.heading += rng.random_range(-1.0..1.0);
                }
            }
        }

        mob.pos += Vec2::new(mob.heading.cos(), mob.heading.sin()) * mob.speed;
        mob.bounce_off_walls();

        for worm in worms.iter_mut() {
            if worm.alive && mob_touches_worm(mob.pos, worm) {
                worm.grow(MOB_LENGTH_BONUS);
                mob.alive = false;
                events.push(GameEvent::MobEaten {
                    by: worm.name.clone(),
                });
                break;
            }
        }
    }

    mobs.retain(|m| m.alive);
}
