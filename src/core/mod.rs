//! Core types: colors, participants, actions, errors, RNG, configuration.
//!
//! Everything here is independent of the rules themselves; the sheet, dice
//! and rules modules build on these.

pub mod action;
pub mod color;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{ActionRecord, ClosedColors, Mark, PassiveChoice, RecordedAction, TurnAction};
pub use color::{Color, ColorMap, Direction};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
