//! Turn actions and the action history.
//!
//! The active participant picks one `TurnAction` per turn; every other
//! participant answers with a `PassiveChoice`. Both are recorded in the
//! game's history as `ActionRecord`s.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::player::PlayerId;

/// A single cross: `value` in the `color` row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    pub color: Color,
    pub value: u8,
}

impl Mark {
    #[must_use]
    pub const fn new(color: Color, value: u8) -> Self {
        Self { color, value }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}

/// What the active participant does with a roll.
///
/// ## Example
///
/// ```
/// use qwixx_engine::core::{Color, Mark, TurnAction};
///
/// // Shared sum 7 in Red, then Red's own 9.
/// let action = TurnAction::Combined {
///     shared: Mark::new(Color::Red, 7),
///     colored: Mark::new(Color::Red, 9),
/// };
/// assert!(action.marks().count() == 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    /// Mark the shared sum in one row.
    Shared(Mark),
    /// Mark a colored sum in its own row.
    Colored(Mark),
    /// Mark the shared sum, then a colored sum.
    Combined { shared: Mark, colored: Mark },
    /// Mark nothing and take a failed attempt.
    FailedAttempt,
}

impl TurnAction {
    /// Marks in the order they are applied.
    pub fn marks(&self) -> impl Iterator<Item = Mark> {
        let marks: SmallVec<[Mark; 2]> = match *self {
            TurnAction::Shared(mark) | TurnAction::Colored(mark) => SmallVec::from_slice(&[mark]),
            TurnAction::Combined { shared, colored } => SmallVec::from_slice(&[shared, colored]),
            TurnAction::FailedAttempt => SmallVec::new(),
        };
        marks.into_iter()
    }
}

/// A passive participant's answer to the shared sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassiveChoice {
    /// Leave the sheet as it is.
    Decline,
    /// Mark the shared sum in one row.
    Mark(Mark),
}

/// Colors closed by a single action. At most two (combined action).
pub type ClosedColors = SmallVec<[Color; 2]>;

/// What a participant did, as stored in history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordedAction {
    Active(TurnAction),
    Passive(PassiveChoice),
}

/// A recorded action with metadata for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The participant who acted.
    pub player: PlayerId,

    /// The action taken.
    pub action: RecordedAction,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn (active participant is 0).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: RecordedAction, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_order() {
        let action = TurnAction::Combined {
            shared: Mark::new(Color::Green, 9),
            colored: Mark::new(Color::Blue, 4),
        };
        let marks: Vec<_> = action.marks().collect();
        assert_eq!(marks, vec![Mark::new(Color::Green, 9), Mark::new(Color::Blue, 4)]);

        assert_eq!(TurnAction::FailedAttempt.marks().count(), 0);
        assert_eq!(TurnAction::Colored(Mark::new(Color::Red, 3)).marks().count(), 1);
    }

    #[test]
    fn test_mark_display() {
        assert_eq!(Mark::new(Color::Yellow, 11).to_string(), "Yellow 11");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            RecordedAction::Passive(PassiveChoice::Mark(Mark::new(Color::Red, 7))),
            2,
            1,
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
