//! # qwixx-engine
//!
//! Rule engine for a roll-and-write dice game in the style of Qwixx.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: legality, scoring and the end condition are functions
//!    of sheets and rolls. No I/O anywhere in the crate.
//!
//! 2. **N-Player First**: every participant gets a `Sheet` in a `PlayerMap`;
//!    nothing assumes two players.
//!
//! 3. **Adapters at the edge**: prompts, bots and scripted tests implement
//!    `Decider`. The `Game` state machine can also be stepped by hand.
//!
//! 4. **Reproducible**: all randomness comes from a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: colors, players, actions, errors, RNG, configuration
//! - `sheet`: rows and score sheets
//! - `dice`: rolling and roll outcomes
//! - `rules`: legality, turn application, end of game, the `Game` itself
//!
//! ## Example
//!
//! ```
//! use qwixx_engine::{Game, GameConfig, TurnAction};
//!
//! let mut game = Game::new(GameConfig::with_players(["Ada", "Bo"]).with_seed(3)).unwrap();
//! game.roll().unwrap();
//! game.apply_active(TurnAction::FailedAttempt).unwrap();
//!
//! let passive = game.pending_passive().unwrap();
//! assert_ne!(passive, game.current_player());
//! ```

pub mod core;
pub mod dice;
pub mod rules;
pub mod sheet;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, ClosedColors, Color, ColorMap, Direction, GameConfig, GameError, GameRng,
    GameRngState, Mark, PassiveChoice, PlayerId, PlayerMap, RecordedAction, Result, TurnAction,
};

pub use crate::dice::{Dice, RollOutcome};

pub use crate::rules::{
    legal_combinations, Decider, Game, GameCheckpoint, GameResult, LegalCombinations, Standing,
    TurnPhase, TurnReport, TurnView,
};

pub use crate::sheet::{Row, Sheet};
