//! A participant's score sheet.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap};

use super::row::Row;

/// Four rows, a failed-attempt counter and the participant's name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sheet {
    name: String,
    rows: ColorMap<Row>,
    failed_attempts: u32,
}

impl Sheet {
    /// Points lost per failed attempt.
    pub const FAILED_ATTEMPT_PENALTY: i32 = 5;

    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: ColorMap::new(Row::new),
            failed_attempts: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn row(&self, color: Color) -> &Row {
        &self.rows[color]
    }

    /// All rows in sheet order.
    #[must_use]
    pub fn rows(&self) -> &ColorMap<Row> {
        &self.rows
    }

    #[must_use]
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Mark `value` in the `color` row. Returns whether the mark was made.
    pub fn mark(&mut self, color: Color, value: u8) -> bool {
        self.rows[color].mark(value)
    }

    /// Record a failed attempt. The game, not the sheet, enforces the limit.
    pub fn add_failed_attempt(&mut self) {
        self.failed_attempts += 1;
    }

    /// Lock a row that another participant closed.
    pub fn force_close(&mut self, color: Color) {
        self.rows[color].force_close();
    }

    /// Sum of the row scores minus the failed-attempt penalties.
    #[must_use]
    pub fn total_score(&self) -> i32 {
        let rows: i32 = self.rows.values().map(Row::score).sum();
        rows - Self::FAILED_ATTEMPT_PENALTY * self.failed_attempts as i32
    }
}

impl std::fmt::Display for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}'s Score Sheet", self.name)?;
        writeln!(f, "{}", rule)?;
        for row in self.rows.values() {
            writeln!(f, "{}", row)?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(f, "Failed attempts: {}", self.failed_attempts)?;
        write!(f, "Total score: {}", self.total_score())
    }
}
