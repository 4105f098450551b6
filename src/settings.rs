//! Session settings and population policy
//!
//! Chosen once at session start (name, color, difficulty) plus the two
//! policy knobs that are deliberately explicit configuration: mob
//! replenishment and the food spawn bound.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// AI difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    VeryHard,
}

/// Steering parameters fixed at worm creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub base_speed: f32,
    pub turn_rate: f32,
    /// Willingness to chase the player; chase range is `500 × aggression`
    pub aggression: f32,
}

impl TierProfile {
    /// Profile used by the player worm regardless of session difficulty
    pub fn player() -> Self {
        Self {
            base_speed: BASE_SPEED,
            turn_rate: TURN_SPEED,
            aggression: 0.0,
        }
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "veryhard" | "very hard" | "very_hard" => Some(Difficulty::VeryHard),
            _ => None,
        }
    }

    /// Steering parameters for an AI worm of this tier
    pub fn profile(&self) -> TierProfile {
        match self {
            Difficulty::Easy => TierProfile {
                base_speed: 2.5,
                turn_rate: 0.04,
                aggression: 0.0,
            },
            Difficulty::Normal => TierProfile {
                base_speed: 3.0,
                turn_rate: 0.08,
                aggression: 0.0,
            },
            Difficulty::Hard => TierProfile {
                base_speed: 3.5,
                turn_rate: 0.12,
                aggression: 0.5,
            },
            // Smart: focuses on food, attacks only when the player is close
            Difficulty::VeryHard => TierProfile {
                base_speed: 4.0,
                turn_rate: 0.2,
                aggression: 0.2,
            },
        }
    }

    /// How many food items an AI samples per tick when picking a target
    pub fn food_samples(&self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Normal => 10,
            Difficulty::Hard | Difficulty::VeryHard => 50,
        }
    }

    /// Target score for a sampled food item; lower is better.
    ///
    /// Higher tiers discount distance by food value, so high-value food is
    /// preferred even when farther away.
    pub fn food_score(&self, dist: f32, value: u32) -> f32 {
        match self {
            Difficulty::Easy | Difficulty::Normal => dist,
            Difficulty::Hard => dist / value as f32,
            Difficulty::VeryHard => dist / (2.0 * value as f32),
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Player cosmetics, chosen once at session start
    pub player_name: String,
    /// Color token: HSL hue in degrees
    pub player_hue: f32,
    /// Difficulty tier applied to AI worms spawned this session
    pub difficulty: Difficulty,

    // === Population targets ===
    pub food_count: usize,
    pub mob_count: usize,
    /// Living AI worms are topped up to this floor each tick
    pub min_ai_worms: usize,

    // === Policy knobs ===
    /// Top mobs back up to `mob_count` when below it. Off by default:
    /// the mob pool is a fixed, depleting resource.
    pub replenish_mobs: bool,
    /// Half-side of the square food spawn region. Defaults to the arena
    /// bound so food never spawns outside the playable area.
    pub food_spawn_bound: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Unknown".to_string(),
            player_hue: 120.0,
            difficulty: Difficulty::Normal,

            food_count: FOOD_COUNT,
            mob_count: MOB_COUNT,
            min_ai_worms: MIN_AI_WORMS,

            replenish_mobs: false,
            food_spawn_bound: WORLD_SIZE,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Bad settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON; failures are logged, not propagated
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings: {e}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("Very Hard"), Some(Difficulty::VeryHard));
        assert_eq!(Difficulty::from_str("veryhard"), Some(Difficulty::VeryHard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_food_score_prefers_value_at_higher_tiers() {
        // Same distance: value 4 food should score 4x better on Hard,
        // 8x better on Very Hard, and identically on Normal.
        let d = 400.0;
        assert_eq!(Difficulty::Normal.food_score(d, 4), d);
        assert_eq!(Difficulty::Hard.food_score(d, 4), d / 4.0);
        assert_eq!(Difficulty::VeryHard.food_score(d, 4), d / 8.0);
    }

    #[test]
    fn test_default_policy_knobs() {
        let settings = Settings::default();
        assert!(!settings.replenish_mobs);
        assert_eq!(settings.food_spawn_bound, WORLD_SIZE);
    }
}
