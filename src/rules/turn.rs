//! Applying actions to a sheet.
//!
//! Every check runs against the sheet as it was before the action, and marks
//! are applied to a scratch copy that only replaces the sheet once every mark
//! has gone through. A rejected action therefore never leaves a half-marked
//! sheet behind.

use tracing::{debug, trace};

use crate::core::{ClosedColors, Color, GameError, Mark, PassiveChoice, Result, TurnAction};
use crate::dice::RollOutcome;
use crate::sheet::{Row, Sheet};

use super::legality::{legal_combinations, LegalCombinations};

/// Apply the active participant's action.
///
/// Returns the colors this action closed.
///
/// ```
/// use qwixx_engine::core::{Color, ColorMap, GameError, Mark, TurnAction};
/// use qwixx_engine::dice::RollOutcome;
/// use qwixx_engine::rules::apply_action;
/// use qwixx_engine::sheet::Sheet;
///
/// let roll = RollOutcome::from_faces([4, 5], ColorMap::new(|_| Some(6))).unwrap();
/// let mut sheet = Sheet::new("Ada");
///
/// // Green runs downward: 11 cannot follow the shared 9 in the same row.
/// let action = TurnAction::Combined {
///     shared: Mark::new(Color::Green, 9),
///     colored: Mark::new(Color::Green, 11),
/// };
/// assert!(matches!(
///     apply_action(&mut sheet, &roll, &action),
///     Err(GameError::IllegalCombinedOrder { .. })
/// ));
/// assert_eq!(sheet.row(Color::Green).mark_count(), 0);
/// ```
pub fn apply_action(
    sheet: &mut Sheet,
    roll: &RollOutcome,
    action: &TurnAction,
) -> Result<ClosedColors> {
    let legal = legal_combinations(roll, sheet);

    match *action {
        TurnAction::Shared(mark) => check_shared(&legal, mark)?,
        TurnAction::Colored(mark) => check_colored(&legal, mark)?,
        TurnAction::Combined { shared, colored } => {
            check_shared(&legal, shared)?;
            check_colored(&legal, colored)?;
            check_order(shared, colored)?;
        }
        TurnAction::FailedAttempt => {
            sheet.add_failed_attempt();
            debug!(
                player = sheet.name(),
                failed_attempts = sheet.failed_attempts(),
                "failed attempt"
            );
            return Ok(ClosedColors::new());
        }
    }

    let closed = commit_marks(sheet, action.marks())?;
    debug!(player = sheet.name(), ?action, ?closed, "applied action");
    Ok(closed)
}

/// Apply a passive participant's answer to the shared sum.
///
/// Returns the colors the mark closed.
pub fn apply_passive(
    sheet: &mut Sheet,
    roll: &RollOutcome,
    choice: &PassiveChoice,
) -> Result<ClosedColors> {
    match *choice {
        PassiveChoice::Decline => Ok(ClosedColors::new()),
        PassiveChoice::Mark(mark) => {
            let legal = legal_combinations(roll, sheet);
            check_shared(&legal, mark)?;
            let closed = commit_marks(sheet, std::iter::once(mark))?;
            debug!(player = sheet.name(), %mark, ?closed, "passive mark");
            Ok(closed)
        }
    }
}

/// Lock `colors` on a sheet whose owner did not close them.
pub fn force_close(sheet: &mut Sheet, colors: &[Color]) {
    for &color in colors {
        if !sheet.row(color).is_closed() {
            trace!(player = sheet.name(), %color, "forced closure");
            sheet.force_close(color);
        }
    }
}

fn check_shared(legal: &LegalCombinations, mark: Mark) -> Result<()> {
    if legal.allows_shared(mark.color, mark.value) {
        Ok(())
    } else {
        Err(illegal(mark))
    }
}

fn check_colored(legal: &LegalCombinations, mark: Mark) -> Result<()> {
    if legal.allows_colored(mark.color, mark.value) {
        Ok(())
    } else {
        Err(illegal(mark))
    }
}

/// The shared mark takes the nearer position, so a colored mark in the same
/// row must land strictly past it.
fn check_order(shared: Mark, colored: Mark) -> Result<()> {
    if shared.color == colored.color
        && !Row::is_farther(shared.color, shared.value, colored.value)
    {
        return Err(GameError::IllegalCombinedOrder {
            color: shared.color,
            shared: shared.value,
            colored: colored.value,
        });
    }
    Ok(())
}

fn commit_marks(sheet: &mut Sheet, marks: impl Iterator<Item = Mark>) -> Result<ClosedColors> {
    let mut next = sheet.clone();
    let mut closed = ClosedColors::new();

    for mark in marks {
        let was_closed = next.row(mark.color).is_closed();
        if !next.mark(mark.color, mark.value) {
            return Err(illegal(mark));
        }
        if !was_closed && next.row(mark.color).is_closed() {
            closed.push(mark.color);
        }
    }

    *sheet = next;
    Ok(closed)
}

fn illegal(mark: Mark) -> GameError {
    GameError::IllegalMark {
        color: mark.color,
        value: mark.value,
    }
}
