//! One colored track of a score sheet.
//!
//! A row has 11 positions from its near end to its far end. Position `p`
//! holds `2 + p` on ascending rows and `12 - p` on descending rows, so the
//! far end (position 10) is 12 or 2. Crosses must move strictly toward the
//! far end, and the far end itself, the closing value, needs
//! [`Row::CLOSE_MIN_MARKS`] crosses first. Marking it closes the row.
//!
//! ```
//! use qwixx_engine::core::Color;
//! use qwixx_engine::sheet::Row;
//!
//! let mut row = Row::new(Color::Green);
//! assert!(row.mark(10));
//! assert!(!row.is_legal(11)); // behind the last cross
//! assert!(row.is_legal(9));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Color, Direction};

/// Number of positions on a row.
pub const ROW_LENGTH: usize = 11;

const MIN_VALUE: u8 = 2;
const MAX_VALUE: u8 = 12;

/// A single color's track.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    color: Color,
    closed: bool,
    /// Crosses by position, near end first.
    marks: [bool; ROW_LENGTH],
    /// Position of the farthest cross.
    last: Option<usize>,
}

impl Row {
    /// Crosses needed before the closing value may be marked.
    pub const CLOSE_MIN_MARKS: usize = 5;

    /// Create an empty, open row.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            closed: false,
            marks: [false; ROW_LENGTH],
            last: None,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Value at the far end of this row.
    #[must_use]
    pub fn closing_value(&self) -> u8 {
        Self::value_at(self.color, ROW_LENGTH - 1)
    }

    /// Number of crosses on the row.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }

    /// The farthest marked value, if any.
    #[must_use]
    pub fn last_marked(&self) -> Option<u8> {
        self.last.map(|pos| Self::value_at(self.color, pos))
    }

    /// Whether `value` has a cross.
    #[must_use]
    pub fn is_marked(&self, value: u8) -> bool {
        Self::position_of(self.color, value).is_some_and(|pos| self.marks[pos])
    }

    /// Cells in track order as (value, marked).
    pub fn cells(&self) -> impl Iterator<Item = (u8, bool)> + '_ {
        self.marks
            .iter()
            .enumerate()
            .map(move |(pos, &marked)| (Self::value_at(self.color, pos), marked))
    }

    /// Whether `value` could be marked now. Never mutates.
    #[must_use]
    pub fn is_legal(&self, value: u8) -> bool {
        if self.closed {
            return false;
        }
        let Some(pos) = Self::position_of(self.color, value) else {
            return false;
        };
        if self.marks[pos] {
            return false;
        }
        if pos == ROW_LENGTH - 1 && self.mark_count() < Self::CLOSE_MIN_MARKS {
            return false;
        }
        match self.last {
            Some(last) => pos > last,
            None => true,
        }
    }

    /// Mark `value` if legal. Marking the closing value closes the row.
    ///
    /// Returns false, leaving the row untouched, when the mark is illegal.
    pub fn mark(&mut self, value: u8) -> bool {
        if !self.is_legal(value) {
            return false;
        }
        let Some(pos) = Self::position_of(self.color, value) else {
            return false;
        };
        self.marks[pos] = true;
        self.last = Some(pos);
        if pos == ROW_LENGTH - 1 {
            self.closed = true;
        }
        true
    }

    /// Close the row without marking it (another participant locked the color).
    pub fn force_close(&mut self) {
        self.closed = true;
    }

    /// Row score: triangular number of the crosses, plus one for a closed
    /// row with at least [`Row::CLOSE_MIN_MARKS`] crosses.
    #[must_use]
    pub fn score(&self) -> i32 {
        let k = self.mark_count() as i32;
        let bonus = i32::from(self.closed && k >= Self::CLOSE_MIN_MARKS as i32);
        k * (k + 1) / 2 + bonus
    }

    /// Whether `later` lies strictly farther along a `color` row than `earlier`.
    #[must_use]
    pub fn is_farther(color: Color, earlier: u8, later: u8) -> bool {
        match color.direction() {
            Direction::Ascending => later > earlier,
            Direction::Descending => later < earlier,
        }
    }

    fn position_of(color: Color, value: u8) -> Option<usize> {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return None;
        }
        Some(match color.direction() {
            Direction::Ascending => (value - MIN_VALUE) as usize,
            Direction::Descending => (MAX_VALUE - value) as usize,
        })
    }

    fn value_at(color: Color, pos: usize) -> u8 {
        match color.direction() {
            Direction::Ascending => MIN_VALUE + pos as u8,
            Direction::Descending => MAX_VALUE - pos as u8,
        }
    }
}

impl std::fmt::Display for Row {
    /// Renders the track with crosses in parentheses, e.g. ` 2 (3) 4 ...`,
    /// followed by a lock marker and the row score.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<7}", self.color)?;
        for (value, marked) in self.cells() {
            if marked {
                write!(f, "({:>2})", value)?;
            } else {
                write!(f, " {:>2} ", value)?;
            }
        }
        let lock = if self.closed { "closed" } else { "open" };
        write!(f, " [{}] score {}", lock, self.score())
    }
}
