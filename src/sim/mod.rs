//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the game state
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{SEGMENT_STRIDE, find_fatal_collision, head_eats_food, mob_touches_worm};
pub use state::{Controller, Food, GameEvent, GamePhase, GameState, Mob, Worm};
pub use tick::{TickInput, tick};
