//! Game state and core simulation types
//!
//! The simulation context is an explicit object: entities never hold a
//! back-reference to the world, the tick driver hands them what they need.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::{Difficulty, Settings, TierProfile};
use crate::shortest_angle_delta;

/// Name pool for AI worms
const AI_NAMES: [&str; 10] = [
    "Alpha", "Beta", "Gamma", "Delta", "Snakey", "Crawler", "NopeRope", "Snek", "Boss", "Eater",
];

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen: no state mutates while paused
    Paused,
    /// The player worm died; waiting for a respawn or a new session
    GameOver,
}

/// Events produced for the presentation layer, drained once per frame
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A worm ran into another worm's body
    WormKilled {
        victim: String,
        killer: Option<String>,
    },
    /// A mob was consumed by a worm's head
    MobEaten { by: String },
    /// Terminal signal for the current life, with the final score
    GameOver { length: f32, kills: u32 },
    /// Sampled hint (~5% of ticks) to redraw HUD and leaderboard
    HudRefresh,
}

/// A passive food pellet
#[derive(Debug, Clone)]
pub struct Food {
    pub pos: Vec2,
    pub radius: f32,
    pub value: u32,
    /// Color token: HSL hue in degrees
    pub hue: f32,
    /// Cosmetic pulse phase, advanced each tick for the renderer
    pub pulse: f32,
}

impl Food {
    /// Values above 5 mark a large drop and get a fixed larger radius
    pub fn new(rng: &mut Pcg32, pos: Vec2, value: u32) -> Self {
        Self {
            pos,
            radius: if value > 5 {
                8.0
            } else {
                rng.random_range(2.0..5.0)
            },
            value,
            hue: rng.random_range(0.0..360.0),
            pulse: rng.random_range(0.0..std::f32::consts::PI),
        }
    }
}

/// A roaming creature worth a one-time length bonus when touched
#[derive(Debug, Clone)]
pub struct Mob {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Mob {
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(-WORLD_SIZE..WORLD_SIZE),
                rng.random_range(-WORLD_SIZE..WORLD_SIZE),
            ),
            heading: rng.random_range(0.0..std::f32::consts::TAU),
            speed: MOB_SPEED,
            alive: true,
        }
    }

    /// Mirror the heading component-wise and reflect the position back
    /// inside whichever boundary was crossed.
    pub fn bounce_off_walls(&mut self) {
        use std::f32::consts::PI;
        if self.pos.x.abs() > WORLD_SIZE {
            self.heading = PI - self.heading;
            self.pos.x = self.pos.x.signum() * (2.0 * WORLD_SIZE) - self.pos.x;
        }
        if self.pos.y.abs() > WORLD_SIZE {
            self.heading = -self.heading;
            self.pos.y = self.pos.y.signum() * (2.0 * WORLD_SIZE) - self.pos.y;
        }
    }
}

/// Who drives a worm's steering each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// Pointer/boost input from the human player
    Player,
    /// Heuristic steering with this tier's parameters
    Ai(Difficulty),
}

/// The principal actor: a growing chain of body segments
#[derive(Debug, Clone)]
pub struct Worm {
    pub controller: Controller,
    pub name: String,
    /// Color token: HSL hue in degrees
    pub hue: f32,
    /// Head position
    pub pos: Vec2,
    pub heading: f32,
    pub target_heading: f32,
    pub speed: f32,
    /// Steering parameters, fixed for this worm's lifetime
    pub profile: TierProfile,
    /// Body samples, head-first
    pub segments: VecDeque<Vec2>,
    /// Real-valued length; the body keeps `floor(target_length)` segments
    pub target_length: f32,
    pub radius: f32,
    pub kills: u32,
    pub alive: bool,
}

impl Worm {
    pub fn new(controller: Controller, name: String, hue: f32, pos: Vec2, rng: &mut Pcg32) -> Self {
        let profile = match controller {
            Controller::Player => TierProfile::player(),
            Controller::Ai(tier) => tier.profile(),
        };
        let heading = rng.random_range(0.0..std::f32::consts::TAU);
        let mut segments = VecDeque::with_capacity(MIN_WORM_LENGTH as usize);
        for _ in 0..MIN_WORM_LENGTH as usize {
            segments.push_back(pos);
        }
        Self {
            controller,
            name,
            hue,
            pos,
            heading,
            target_heading: heading,
            speed: profile.base_speed,
            profile,
            segments,
            target_length: MIN_WORM_LENGTH,
            radius: BASE_WORM_RADIUS,
            kills: 0,
            alive: true,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.controller, Controller::Player)
    }

    /// Turn toward the target heading, step forward, clamp to the arena,
    /// and maintain the body chain.
    ///
    /// The heading correction is a fixed fraction of the shortest angular
    /// difference, so the per-tick change never exceeds `turn_rate × π`.
    pub fn advance(&mut self) {
        let delta = shortest_angle_delta(self.heading, self.target_heading);
        self.heading += delta * self.profile.turn_rate;

        self.pos += Vec2::new(self.heading.cos(), self.heading.sin()) * self.speed;
        self.pos = self
            .pos
            .clamp(Vec2::splat(-WORLD_SIZE), Vec2::splat(WORLD_SIZE));

        self.segments.push_front(self.pos);
        while self.segments.len() as f32 > self.target_length {
            self.segments.pop_back();
        }
        self.radius = BASE_WORM_RADIUS + (self.target_length / 20.0).floor();
    }

    /// Tail position; boost droppings spawn here
    pub fn tail(&self) -> Vec2 {
        self.segments.back().copied().unwrap_or(self.pos)
    }

    pub fn grow(&mut self, amount: f32) {
        self.target_length += amount;
    }

    /// Shed a chunk of length while boosting. Returns the value of the
    /// pellet to drop; the length never goes below the minimum.
    pub fn shed(&mut self) -> u32 {
        let value = ((self.target_length / 50.0).floor() as u32).max(1);
        self.target_length =
            (self.target_length - value as f32 * BOOST_SHED_SCALE).max(MIN_WORM_LENGTH);
        value
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: Settings,
    pub phase: GamePhase,
    pub time_ticks: u64,
    pub worms: Vec<Worm>,
    pub foods: Vec<Food>,
    pub mobs: Vec<Mob>,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session: fill food and mobs to target, spawn the AI
    /// floor, then the player.
    pub fn new(seed: u64, config: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        let mut state = Self {
            seed,
            rng,
            config,
            phase: GamePhase::Playing,
            time_ticks: 0,
            worms: Vec::new(),
            foods: Vec::new(),
            mobs: Vec::new(),
            events: Vec::new(),
        };

        for _ in 0..state.config.food_count {
            state.spawn_food(None, 1);
        }
        for _ in 0..state.config.min_ai_worms {
            state.spawn_ai();
        }
        for _ in 0..state.config.mob_count {
            state.spawn_mob();
        }
        state.respawn_player();

        state
    }

    /// Uniform random point in the square `[-bound, bound]²`
    fn random_point(&mut self, bound: f32) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-bound..bound),
            self.rng.random_range(-bound..bound),
        )
    }

    /// Spawn a pellet. `None` places it uniformly within the configured
    /// food spawn bound.
    pub fn spawn_food(&mut self, pos: Option<Vec2>, value: u32) {
        let pos = match pos {
            Some(p) => p,
            None => {
                let bound = self.config.food_spawn_bound;
                self.random_point(bound)
            }
        };
        let food = Food::new(&mut self.rng, pos, value);
        self.foods.push(food);
    }

    /// Spawn an AI worm with a pooled name, random hue, and the session's
    /// difficulty tier, at a uniformly random position.
    pub fn spawn_ai(&mut self) {
        let name = AI_NAMES[self.rng.random_range(0..AI_NAMES.len())].to_string();
        let hue = self.rng.random_range(0.0..360.0);
        let pos = self.random_point(WORLD_SIZE);
        let worm = Worm::new(
            Controller::Ai(self.config.difficulty),
            name,
            hue,
            pos,
            &mut self.rng,
        );
        self.worms.push(worm);
    }

    pub fn spawn_mob(&mut self) {
        let mob = Mob::new(&mut self.rng);
        self.mobs.push(mob);
    }

    /// Create a brand new player worm (fresh identity) near the arena
    /// center and resume play.
    pub fn respawn_player(&mut self) {
        let pos = self.random_point(WORLD_SIZE / 2.0);
        let worm = Worm::new(
            Controller::Player,
            self.config.player_name.clone(),
            self.config.player_hue,
            pos,
            &mut self.rng,
        );
        log::debug!("player spawned at ({:.0}, {:.0})", pos.x, pos.y);
        self.worms.push(worm);
        self.phase = GamePhase::Playing;
    }

    pub fn player(&self) -> Option<&Worm> {
        self.worms.iter().find(|w| w.is_player())
    }

    pub fn living_ai_count(&self) -> usize {
        self.worms
            .iter()
            .filter(|w| !w.is_player() && w.alive)
            .count()
    }

    /// Drain events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
