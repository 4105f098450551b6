//! Squirm - a slither-style arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, AI, collisions, game state)
//! - `leaderboard`: Derived ranking of living worms for the HUD
//! - `settings`: Session configuration and population policy

pub mod leaderboard;
pub mod settings;
pub mod sim;

pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use settings::{Difficulty, Settings};

/// Game tuning constants
pub mod consts {
    /// Half-side of the square arena; coordinates live in `[-WORLD_SIZE, WORLD_SIZE]`
    pub const WORLD_SIZE: f32 = 2000.0;

    /// Worm defaults
    pub const BASE_SPEED: f32 = 3.0;
    pub const BOOST_SPEED: f32 = 6.0;
    pub const TURN_SPEED: f32 = 0.08;
    /// Floor for a worm's target length; boosting can never shed below this
    pub const MIN_WORM_LENGTH: f32 = 20.0;
    /// Base visual radius; grows by 1 per 20 units of length
    pub const BASE_WORM_RADIUS: f32 = 10.0;
    /// Forgiveness subtracted from combined radii in body collision tests
    pub const COLLISION_SLACK: f32 = 2.0;

    /// Population targets
    pub const FOOD_COUNT: usize = 300;
    pub const MOB_COUNT: usize = 10;
    pub const MIN_AI_WORMS: usize = 10;

    /// Distance from a wall at which AI forces a heading straight away from it
    pub const WALL_MARGIN: f32 = 200.0;
    /// Player chase range is this times the tier's aggression
    pub const CHASE_RANGE_PER_AGGRESSION: f32 = 500.0;
    /// Sampled food targets scoring worse than this are ignored
    pub const FOOD_SCORE_CUTOFF: f32 = 1000.0;
    pub const WANDER_CHANCE: f32 = 0.05;
    pub const SPONTANEOUS_BOOST_CHANCE: f32 = 0.01;

    /// Fraction of a food item's value converted to worm length
    pub const FOOD_GROWTH_FACTOR: f32 = 0.5;
    /// Value of each food pellet scattered by a dying worm
    pub const DEATH_DROP_VALUE: u32 = 2;
    /// Per-tick chance of shedding length while boosting
    pub const BOOST_SHED_CHANCE: f32 = 0.2;
    /// Length lost per unit of shed pellet value
    pub const BOOST_SHED_SCALE: f32 = 0.5;

    /// Mob defaults
    pub const MOB_SPEED: f32 = 4.0;
    pub const MOB_FLEE_RADIUS: f32 = 300.0;
    /// Length awarded to a worm whose head touches a mob
    pub const MOB_LENGTH_BONUS: f32 = 10.0;
    /// Added to the worm's radius for the mob touch test
    pub const MOB_TOUCH_PAD: f32 = 10.0;

    /// Presentation hints
    pub const FOOD_PULSE_RATE: f32 = 0.1;
    /// Per-tick chance of emitting a HUD refresh event
    pub const HUD_REFRESH_CHANCE: f32 = 0.05;
}

/// Normalize an angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Shortest signed angular step from `from` to `to`
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Linear interpolation
#[inline]
pub fn lerp(start: f32, end: f32, amt: f32) -> f32 {
    (1.0 - amt) * start + amt * end
}
