//! Score sheets: rows and their marking rules, sheets and scoring.

pub mod player_sheet;
pub mod row;

pub use player_sheet::Sheet;
pub use row::{Row, ROW_LENGTH};
