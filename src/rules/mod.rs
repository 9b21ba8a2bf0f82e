//! Game rules.
//!
//! - `legality`: which values a sheet may mark with a roll
//! - `turn`: applying active and passive decisions to one sheet
//! - `engine`: end-of-game predicate and ranking
//! - `game`: the turn state machine tying sheets and dice together
//! - `driver`: the `Decider` seam adapters implement
//!
//! Everything below `game` is a pure function over sheets and rolls.

pub mod driver;
pub mod engine;
pub mod game;
pub mod legality;
pub mod turn;

pub use driver::{Decider, TurnReport, TurnView};
pub use engine::{is_game_over, open_colors, rank, GameResult, Standing};
pub use game::{Game, GameCheckpoint, TurnPhase};
pub use legality::{legal_combinations, LegalCombinations};
pub use turn::{apply_action, apply_passive, force_close};
