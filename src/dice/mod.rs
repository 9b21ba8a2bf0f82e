//! Dice and roll outcomes.
//!
//! Each turn rolls two shared ("white") dice and one die per enabled color.
//! The shared dice give one achievable value, their sum, usable on any row.
//! Each colored die pairs with each shared die to give two values usable on
//! its own row only.

mod roll;

pub use roll::RollOutcome;

use tracing::debug;

use crate::core::{ColorMap, GameRng, GameRngState};

/// Faces per die.
pub const DIE_SIDES: u8 = 6;

/// The dice of one game, driven by a seeded RNG.
#[derive(Clone, Debug)]
pub struct Dice {
    rng: GameRng,
}

impl Dice {
    /// Create dice with a seeded RNG.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Roll the shared dice and the die of every enabled color.
    pub fn roll(&mut self, enabled: &ColorMap<bool>) -> RollOutcome {
        let shared = [self.rng.roll_die(DIE_SIDES), self.rng.roll_die(DIE_SIDES)];
        let mut colored = ColorMap::with_value(None);
        for (color, &on) in enabled.iter() {
            if on {
                colored[color] = Some(self.rng.roll_die(DIE_SIDES));
            }
        }
        let outcome = RollOutcome::from_parts(shared, colored);
        debug!(shared = ?outcome.shared(), sum = outcome.shared_sum(), "rolled dice");
        outcome
    }

    /// Dice continuing from a checkpoint.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::new(GameRng::from_state(state))
    }

    /// Draw a seat index in `0..player_count`.
    pub fn pick_seat(&mut self, player_count: usize) -> usize {
        self.rng.gen_range_usize(0..player_count)
    }

    /// RNG checkpoint, for replaying the rest of a game.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}
