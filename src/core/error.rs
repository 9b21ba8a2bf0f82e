//! Error taxonomy for the rule engine.
//!
//! Only `InvalidConfiguration` is fatal, and only to construction. Every other
//! variant is returned before any state is touched, so the caller can re-prompt
//! and try again.

use thiserror::Error;

use super::color::Color;
use super::player::PlayerId;

/// Errors returned by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{value} cannot be marked in the {color} row")]
    IllegalMark { color: Color, value: u8 },

    #[error("the colored {colored} must come after the shared {shared} in the {color} row")]
    IllegalCombinedOrder { color: Color, shared: u8, colored: u8 },

    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    #[error("expected phase {expected}, but the game is in phase {actual}")]
    WrongPhase {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{0} is not the participant being asked")]
    NotPassive(PlayerId),

    #[error("{0} is not seated at this table")]
    UnknownPlayer(PlayerId),

    #[error("the game is over")]
    GameOver,
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, GameError>;
