//! Live session leaderboard
//!
//! Derived view over the living worms, rebuilt whenever the HUD refreshes.
//! Ranks by length, breaking ties in favor of kills.

use serde::Serialize;

use crate::sim::{GameState, Worm};

/// Number of rows shown on the HUD
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// A single leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    /// 1-indexed
    pub rank: usize,
    pub name: String,
    pub length: u32,
    pub kills: u32,
    /// Highlight row for the human player
    pub is_player: bool,
}

impl LeaderboardEntry {
    fn from_worm(rank: usize, worm: &Worm) -> Self {
        Self {
            rank,
            name: worm.name.clone(),
            length: worm.target_length.floor() as u32,
            kills: worm.kills,
            is_player: worm.is_player(),
        }
    }
}

/// Ranking of the living worms, longest first
#[derive(Debug, Clone, Serialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Build the current ranking. Only the top rows are kept, but the
    /// player's rank is computed over the full field first.
    pub fn from_state(state: &GameState) -> Self {
        let mut living: Vec<&Worm> = state.worms.iter().filter(|w| w.alive).collect();
        living.sort_by(|a, b| {
            b.target_length
                .total_cmp(&a.target_length)
                .then(b.kills.cmp(&a.kills))
        });

        let entries = living
            .iter()
            .take(MAX_LEADERBOARD_ENTRIES)
            .enumerate()
            .map(|(i, w)| LeaderboardEntry::from_worm(i + 1, w))
            .collect();

        Self { entries }
    }

    /// The player's rank across the whole field, 1-indexed
    pub fn player_rank(state: &GameState) -> Option<usize> {
        let player = state.player().filter(|p| p.alive)?;
        let ahead = state
            .worms
            .iter()
            .filter(|w| w.alive && !w.is_player())
            .filter(|w| {
                w.target_length > player.target_length
                    || (w.target_length == player.target_length && w.kills > player.kills)
            })
            .count();
        Some(ahead + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn field() -> GameState {
        let mut state = GameState::new(3, Settings {
            food_count: 0,
            mob_count: 0,
            min_ai_worms: 12,
            ..Settings::default()
        });
        for (i, worm) in state.worms.iter_mut().enumerate() {
            worm.target_length = 20.0 + i as f32 * 10.0;
        }
        state
    }

    #[test]
    fn test_ranked_longest_first() {
        let state = field();
        let board = Leaderboard::from_state(&state);

        assert_eq!(board.entries.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.entries[0].rank, 1);
        for pair in board.entries.windows(2) {
            assert!(pair[0].length >= pair[1].length);
        }
    }

    #[test]
    fn test_dead_worms_excluded() {
        let mut state = field();
        let longest = state
            .worms
            .iter()
            .map(|w| w.target_length)
            .fold(f32::MIN, f32::max);
        state
            .worms
            .iter_mut()
            .find(|w| w.target_length == longest)
            .unwrap()
            .alive = false;

        let board = Leaderboard::from_state(&state);
        assert!(board.entries.iter().all(|e| (e.length as f32) < longest));
    }

    #[test]
    fn test_player_rank_spans_full_field() {
        let mut state = field();
        // 13 worms; the player is index 12 and currently the longest
        assert_eq!(Leaderboard::player_rank(&state), Some(1));

        state
            .worms
            .iter_mut()
            .find(|w| w.is_player())
            .unwrap()
            .target_length = 1.0;
        assert_eq!(Leaderboard::player_rank(&state), Some(13));
    }

    #[test]
    fn test_kills_break_ties() {
        let mut state = field();
        for worm in state.worms.iter_mut() {
            worm.target_length = 50.0;
            worm.kills = 0;
        }
        state.worms[3].kills = 5;
        let top_name = state.worms[3].name.clone();

        let board = Leaderboard::from_state(&state);
        assert_eq!(board.entries[0].name, top_name);
        assert_eq!(board.entries[0].kills, 5);
    }
}
