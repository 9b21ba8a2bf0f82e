//! Driving a game through an adapter.
//!
//! Console front-ends, bots and scripted tests implement [`Decider`]; the
//! game asks it for every decision and applies the answers. A rejected
//! decision is returned as the error, and the next call resumes the same
//! turn with the same roll.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ActionRecord, PassiveChoice, PlayerId, Result, TurnAction};
use crate::dice::RollOutcome;
use crate::sheet::Sheet;

use super::engine::GameResult;
use super::game::{Game, TurnPhase};
use super::legality::LegalCombinations;

/// What a participant sees when asked for a decision.
#[derive(Clone, Debug)]
pub struct TurnView<'a> {
    pub player: PlayerId,
    pub sheet: &'a Sheet,
    pub roll: &'a RollOutcome,
    /// Already narrowed to the shared sum for passive participants.
    pub legal: LegalCombinations,
}

/// Source of decisions for every participant.
pub trait Decider {
    /// Pick the active participant's action.
    fn choose_action(&mut self, view: &TurnView<'_>) -> TurnAction;

    /// Pick a passive participant's answer to the shared sum.
    fn choose_passive(&mut self, view: &TurnView<'_>) -> PassiveChoice;
}

/// Summary of one played turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub active: PlayerId,
    pub roll: RollOutcome,
    /// Actions of this turn, in the order they were applied.
    pub actions: Vec<ActionRecord>,
    pub game_over: bool,
}

impl Game {
    /// Play the current turn to its end, rolling first if needed.
    pub fn play_turn(&mut self, decider: &mut impl Decider) -> Result<TurnReport> {
        let turn = self.turn_number();
        let active = self.current_player();

        let roll = match self.phase() {
            TurnPhase::AwaitingRoll | TurnPhase::Finished => self.roll()?,
            TurnPhase::Active { roll } | TurnPhase::Passive { roll, .. } => *roll,
        };

        if matches!(self.phase(), TurnPhase::Active { .. }) {
            let action = {
                let view = self.view(active, &roll)?;
                decider.choose_action(&view)
            };
            debug!(%active, ?action, "active decision");
            self.apply_active(action)?;
        }

        while let Some(player) = self.pending_passive() {
            let choice = {
                let view = self.view(player, &roll)?;
                decider.choose_passive(&view)
            };
            debug!(%player, ?choice, "passive decision");
            self.apply_passive(player, choice)?;
        }

        let actions = self
            .history()
            .iter()
            .filter(|record| record.turn == turn)
            .cloned()
            .collect();

        Ok(TurnReport {
            turn,
            active,
            roll,
            actions,
            game_over: self.is_game_over(),
        })
    }

    /// Play until the game ends or `max_turns` turns have been played.
    ///
    /// Returns the result if the game finished.
    pub fn play(
        &mut self,
        decider: &mut impl Decider,
        max_turns: u32,
    ) -> Result<Option<GameResult>> {
        for _ in 0..max_turns {
            if self.result().is_some() {
                break;
            }
            self.play_turn(decider)?;
        }
        Ok(self.result())
    }

    fn view<'a>(&'a self, player: PlayerId, roll: &'a RollOutcome) -> Result<TurnView<'a>> {
        Ok(TurnView {
            player,
            sheet: self.sheet(player),
            roll,
            legal: self.legal_combinations(player)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, ColorMap, GameConfig, GameError, Mark, RecordedAction};

    /// Marks the first shared option it sees, declines otherwise.
    struct Greedy;

    impl Decider for Greedy {
        fn choose_action(&mut self, view: &TurnView<'_>) -> TurnAction {
            match view.legal.shared_colors().next() {
                Some(color) => TurnAction::Shared(Mark::new(color, view.roll.shared_sum())),
                None => TurnAction::FailedAttempt,
            }
        }

        fn choose_passive(&mut self, view: &TurnView<'_>) -> PassiveChoice {
            match view.legal.shared_colors().next() {
                Some(color) => PassiveChoice::Mark(Mark::new(color, view.roll.shared_sum())),
                None => PassiveChoice::Decline,
            }
        }
    }

    /// Always tries the same active action.
    struct Stubborn(TurnAction);

    impl Decider for Stubborn {
        fn choose_action(&mut self, _: &TurnView<'_>) -> TurnAction {
            self.0
        }

        fn choose_passive(&mut self, _: &TurnView<'_>) -> PassiveChoice {
            PassiveChoice::Decline
        }
    }

    fn game(players: usize) -> Game {
        let config = GameConfig::new(players)
            .with_first_player(PlayerId::new(0))
            .with_seed(7);
        Game::new(config).unwrap()
    }

    #[test]
    fn test_play_turn_records_every_seat() {
        let mut g = game(3);
        let report = g.play_turn(&mut Greedy).unwrap();

        assert_eq!(report.turn, 1);
        assert_eq!(report.active, PlayerId::new(0));
        assert_eq!(report.actions.len(), 3);
        assert!(matches!(report.actions[0].action, RecordedAction::Active(_)));
        let order: Vec<_> = report.actions.iter().map(|r| r.player.index()).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(g.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_rejected_decision_keeps_roll() {
        let mut g = game(2);
        let roll = RollOutcome::from_faces([6, 6], ColorMap::with_value(Some(6))).unwrap();
        g.roll_with(roll).unwrap();

        // 12 closes Red, which needs five earlier marks.
        let mut bad = Stubborn(TurnAction::Shared(Mark::new(Color::Red, 12)));
        assert!(matches!(g.play_turn(&mut bad), Err(GameError::IllegalMark { .. })));
        assert_eq!(g.current_roll(), Some(&roll));

        let mut good = Stubborn(TurnAction::Shared(Mark::new(Color::Green, 12)));
        let report = g.play_turn(&mut good).unwrap();
        assert_eq!(report.roll, roll);
        assert!(g.sheet(PlayerId::new(0)).row(Color::Green).is_marked(12));
    }

    #[test]
    fn test_play_to_completion() {
        let mut g = game(2);
        let result = g.play(&mut Greedy, 500).unwrap();

        assert!(result.is_some());
        assert!(g.is_game_over());
        assert_eq!(g.phase(), &TurnPhase::Finished);
        let ranking = g.ranking();
        assert!(result.unwrap().is_winner(ranking[0].player));
    }

    #[test]
    fn test_play_respects_turn_limit() {
        let mut g = game(2);
        assert_eq!(g.play(&mut Greedy, 0).unwrap(), None);
        assert_eq!(g.turn_number(), 1);
    }
}
