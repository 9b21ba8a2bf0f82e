//! Game configuration.
//!
//! Adapters describe the table (participant count, optional names, seed) and
//! may tune the end-of-game limits. `validate` runs before any game state is
//! built, so a bad configuration never produces a half-made game.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::{GameError, Result};
use super::player::PlayerId;

/// Configuration for a new game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of participants (at least 2).
    pub player_count: usize,

    /// Participant names in seat order.
    /// `None` names them "Player 1".."Player N".
    pub player_names: Option<Vec<String>>,

    /// Seed for the dice and for picking the starting seat.
    pub seed: u64,

    /// Seat that takes the first turn. `None` draws it from the seed.
    pub first_player: Option<PlayerId>,

    /// A sheet with this many failed attempts ends the game.
    pub max_failed_attempts: u32,

    /// The game ends once this many colors or fewer are still open.
    pub min_open_colors: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            player_names: None,
            seed: 42,
            first_player: None,
            max_failed_attempts: 4,
            min_open_colors: 2,
        }
    }
}

impl GameConfig {
    /// Create a config for `player_count` unnamed participants.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Create a config whose participant count is taken from the names.
    pub fn with_players<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            player_count: names.len(),
            player_names: Some(names),
            ..Self::default()
        }
    }

    /// Set participant names.
    pub fn with_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.player_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the starting seat.
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }

    /// Set the failed-attempt limit.
    pub fn with_max_failed_attempts(mut self, limit: u32) -> Self {
        self.max_failed_attempts = limit;
        self
    }

    /// Set how few open colors end the game.
    pub fn with_min_open_colors(mut self, count: usize) -> Self {
        self.min_open_colors = count;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.player_count < 2 {
            return Err(GameError::InvalidConfiguration(format!(
                "at least 2 participants are required, got {}",
                self.player_count
            )));
        }
        if self.player_count > PlayerId::MAX_PLAYERS {
            return Err(GameError::InvalidConfiguration(format!(
                "at most {} participants are supported, got {}",
                PlayerId::MAX_PLAYERS,
                self.player_count
            )));
        }
        if let Some(names) = &self.player_names {
            if names.len() != self.player_count {
                return Err(GameError::InvalidConfiguration(format!(
                    "{} names given for {} participants",
                    names.len(),
                    self.player_count
                )));
            }
        }
        if let Some(first) = self.first_player {
            if first.index() >= self.player_count {
                return Err(GameError::InvalidConfiguration(format!(
                    "first player {} is not seated at a {}-participant table",
                    first, self.player_count
                )));
            }
        }
        if self.min_open_colors >= Color::COUNT {
            return Err(GameError::InvalidConfiguration(format!(
                "min_open_colors must be below {}, got {}",
                Color::COUNT,
                self.min_open_colors
            )));
        }
        if self.max_failed_attempts == 0 {
            return Err(GameError::InvalidConfiguration(
                "max_failed_attempts must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Names in seat order, filling in defaults when none were given.
    pub fn resolved_names(&self) -> Vec<String> {
        match &self.player_names {
            Some(names) => names.clone(),
            None => PlayerId::all(self.player_count)
                .map(|p| p.to_string())
                .collect(),
        }
    }
}
