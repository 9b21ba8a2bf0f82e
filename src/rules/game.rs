//! The game: sheets, dice and the turn state machine.
//!
//! ## Turn protocol
//!
//! ```text
//! AwaitingRoll --roll--> Active --apply_active--> Passive
//!      ^                                              |
//!      +------- apply_passive, each other seat -------+
//!
//! Active or Passive --game over--> Finished
//! ```
//!
//! The active participant may use the shared sum and a colored sum; each
//! other participant, in seat order after the active one, may then use the
//! shared sum only. Rows the active participant closed are locked on each
//! passive sheet once that participant has answered. Rows closed by passive
//! participants are locked everywhere when the passive round ends.
//!
//! Every operation called out of phase returns an error and leaves the game
//! untouched, so adapters can simply re-prompt.

use std::collections::VecDeque;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    ActionRecord, ClosedColors, Color, ColorMap, GameConfig, GameError, GameRng, GameRngState,
    PassiveChoice, PlayerId, PlayerMap, RecordedAction, Result, TurnAction,
};
use crate::dice::{Dice, RollOutcome};
use crate::sheet::Sheet;

use super::engine::{self, GameResult, Standing};
use super::legality::{legal_combinations, LegalCombinations};
use super::turn;

/// Where the current turn stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The active participant has not rolled yet.
    AwaitingRoll,
    /// The active participant must choose an action.
    Active { roll: RollOutcome },
    /// Other participants answer the shared sum, front of `pending` first.
    Passive {
        roll: RollOutcome,
        closed_by_active: ClosedColors,
        closed_by_passive: ClosedColors,
        pending: VecDeque<PlayerId>,
    },
    /// The game is over; sheets are final.
    Finished,
}

impl TurnPhase {
    /// Short name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingRoll => "awaiting roll",
            TurnPhase::Active { .. } => "active",
            TurnPhase::Passive { .. } => "passive",
            TurnPhase::Finished => "finished",
        }
    }
}

/// Everything needed to resume a game, dice included.
///
/// Restoring a checkpoint and continuing with the same decisions replays the
/// rest of the game exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCheckpoint {
    pub config: GameConfig,
    pub sheets: PlayerMap<Sheet>,
    pub enabled: ColorMap<bool>,
    pub rng: GameRngState,
    pub current: PlayerId,
    pub phase: TurnPhase,
    pub turn: u32,
    pub history: Vector<ActionRecord>,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    sheets: PlayerMap<Sheet>,
    /// Colors whose die is still rolled. Cleared when the color closes.
    enabled: ColorMap<bool>,
    dice: Dice,
    current: PlayerId,
    phase: TurnPhase,
    /// Turn number (starts at 1).
    turn: u32,
    history: Vector<ActionRecord>,
}

impl Game {
    /// Create a game. Fails before building any state if the configuration
    /// is invalid.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let names = config.resolved_names();
        let sheets = PlayerMap::from_vec(names.into_iter().map(Sheet::new).collect());
        let mut dice = Dice::new(GameRng::new(config.seed));
        let current = match config.first_player {
            Some(player) => player,
            None => PlayerId::new(dice.pick_seat(config.player_count) as u8),
        };

        info!(
            players = config.player_count,
            seed = config.seed,
            first = %current,
            "new game"
        );

        Ok(Self {
            config,
            sheets,
            enabled: ColorMap::with_value(true),
            dice,
            current,
            phase: TurnPhase::AwaitingRoll,
            turn: 1,
            history: Vector::new(),
        })
    }

    /// Resume a game from a checkpoint.
    ///
    /// The checkpoint's configuration is validated again, and its sheets and
    /// seats must fit the table it describes.
    pub fn restore(checkpoint: GameCheckpoint) -> Result<Self> {
        let GameCheckpoint {
            config,
            sheets,
            enabled,
            rng,
            current,
            phase,
            turn,
            history,
        } = checkpoint;
        config.validate()?;

        if sheets.player_count() != config.player_count {
            return Err(GameError::InvalidConfiguration(format!(
                "checkpoint for {} participants holds {} sheets",
                config.player_count,
                sheets.player_count()
            )));
        }
        let seated = |player: PlayerId| player.index() < config.player_count;
        let pending_seated = match &phase {
            TurnPhase::Passive { pending, .. } => pending.iter().all(|&p| seated(p)),
            _ => true,
        };
        if !seated(current) || !pending_seated {
            return Err(GameError::UnknownPlayer(current));
        }

        debug!(turn, player = %current, phase = phase.name(), "restored game");
        Ok(Self {
            config,
            sheets,
            enabled,
            dice: Dice::from_state(&rng),
            current,
            phase,
            turn,
            history,
        })
    }

    /// Capture the whole game, including the dice position.
    #[must_use]
    pub fn checkpoint(&self) -> GameCheckpoint {
        GameCheckpoint {
            config: self.config.clone(),
            sheets: self.sheets.clone(),
            enabled: self.enabled,
            rng: self.dice.rng_state(),
            current: self.current,
            phase: self.phase.clone(),
            turn: self.turn,
            history: self.history.clone(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.sheets.player_count()
    }

    #[must_use]
    pub fn sheets(&self) -> &PlayerMap<Sheet> {
        &self.sheets
    }

    /// A participant's sheet.
    ///
    /// # Panics
    ///
    /// If `player` is not seated at this table.
    #[must_use]
    pub fn sheet(&self, player: PlayerId) -> &Sheet {
        &self.sheets[player]
    }

    /// Colors whose die is still in play.
    #[must_use]
    pub fn enabled_colors(&self) -> &ColorMap<bool> {
        &self.enabled
    }

    /// Colors not yet closed on any sheet.
    pub fn open_colors(&self) -> impl Iterator<Item = Color> + '_ {
        engine::open_colors(&self.sheets, &self.enabled)
    }

    /// The active participant of the current turn.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Every action taken so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// The roll of the current turn, once it has been made.
    #[must_use]
    pub fn current_roll(&self) -> Option<&RollOutcome> {
        match &self.phase {
            TurnPhase::Active { roll } | TurnPhase::Passive { roll, .. } => Some(roll),
            TurnPhase::AwaitingRoll | TurnPhase::Finished => None,
        }
    }

    /// The participant whose passive answer is awaited.
    #[must_use]
    pub fn pending_passive(&self) -> Option<PlayerId> {
        match &self.phase {
            TurnPhase::Passive { pending, .. } => pending.front().copied(),
            _ => None,
        }
    }

    /// Dice RNG checkpoint.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.dice.rng_state()
    }

    /// What `player` may mark with the current roll.
    ///
    /// The active participant sees shared and colored options while the
    /// turn is in its active phase; everyone else sees the shared sum only.
    pub fn legal_combinations(&self, player: PlayerId) -> Result<LegalCombinations> {
        if player.index() >= self.player_count() {
            return Err(GameError::UnknownPlayer(player));
        }
        let roll = self
            .current_roll()
            .ok_or_else(|| self.wrong_phase("active or passive"))?;
        let legal = legal_combinations(roll, &self.sheets[player]);
        let is_active_turn =
            matches!(self.phase, TurnPhase::Active { .. }) && player == self.current;
        Ok(if is_active_turn { legal } else { legal.shared_only() })
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        engine::is_game_over(&self.sheets, &self.enabled, &self.config)
    }

    /// Participants by score, best first; ties keep seat order.
    #[must_use]
    pub fn ranking(&self) -> Vec<Standing> {
        engine::rank(&self.sheets)
    }

    /// Every participant sharing the top score. Ties keep seat order.
    #[must_use]
    pub fn winners(&self) -> Vec<Standing> {
        let ranking = self.ranking();
        let top = ranking.first().map(|s| s.score);
        ranking.into_iter().take_while(|s| Some(s.score) == top).collect()
    }

    /// Winner(s), once the game is finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            TurnPhase::Finished => GameResult::from_ranking(&self.ranking()),
            _ => None,
        }
    }

    // === Commands ===

    /// Roll the dice for the active participant.
    pub fn roll(&mut self) -> Result<RollOutcome> {
        self.expect_awaiting_roll()?;
        let roll = self.dice.roll(&self.enabled);
        self.phase = TurnPhase::Active { roll };
        Ok(roll)
    }

    /// Use an externally rolled outcome instead of the built-in dice.
    ///
    /// Dice of colors that are out of the game are ignored.
    pub fn roll_with(&mut self, outcome: RollOutcome) -> Result<RollOutcome> {
        self.expect_awaiting_roll()?;
        let colored = ColorMap::new(|color| {
            outcome
                .colored_die(color)
                .filter(|_| self.enabled[color])
        });
        let roll = RollOutcome::from_faces(outcome.shared(), colored)?;
        self.phase = TurnPhase::Active { roll };
        Ok(roll)
    }

    /// Apply the active participant's action.
    ///
    /// Returns the colors it closed. If the game is not over afterwards, the
    /// passive round starts.
    pub fn apply_active(&mut self, action: TurnAction) -> Result<ClosedColors> {
        let roll = match &self.phase {
            TurnPhase::Active { roll } => *roll,
            _ => return Err(self.wrong_phase("active")),
        };

        let closed = turn::apply_action(&mut self.sheets[self.current], &roll, &action)?;
        self.record(self.current, RecordedAction::Active(action), 0);
        self.disable(&closed);

        if self.is_game_over() {
            self.finish();
        } else {
            self.phase = TurnPhase::Passive {
                roll,
                closed_by_active: closed.clone(),
                closed_by_passive: ClosedColors::new(),
                pending: self.current.others(self.player_count()).collect(),
            };
        }
        Ok(closed)
    }

    /// Apply the answer of the passive participant being asked.
    ///
    /// Returns the colors the participant's own mark closed.
    pub fn apply_passive(
        &mut self,
        player: PlayerId,
        choice: PassiveChoice,
    ) -> Result<ClosedColors> {
        let TurnPhase::Passive {
            roll,
            closed_by_active,
            closed_by_passive,
            pending,
        } = &mut self.phase
        else {
            return Err(self.wrong_phase("passive"));
        };
        if pending.front() != Some(&player) {
            return Err(GameError::NotPassive(player));
        }

        let sheet = &mut self.sheets[player];
        let closed = turn::apply_passive(sheet, roll, &choice)?;
        turn::force_close(sheet, closed_by_active);
        for &color in &closed {
            if !closed_by_passive.contains(&color) {
                closed_by_passive.push(color);
            }
        }
        pending.pop_front();
        let round_done = pending.is_empty();

        let sequence = (self.player_count() - self.remaining_passive()) as u32 - 1;
        self.record(player, RecordedAction::Passive(choice), sequence);
        if round_done {
            self.end_passive_round();
        }
        Ok(closed)
    }

    // === Internals ===

    fn remaining_passive(&self) -> usize {
        match &self.phase {
            TurnPhase::Passive { pending, .. } => pending.len(),
            _ => 0,
        }
    }

    fn end_passive_round(&mut self) {
        let closed = match &self.phase {
            TurnPhase::Passive { closed_by_passive, .. } => closed_by_passive.clone(),
            _ => return,
        };

        for sheet in self.sheets.iter_mut().map(|(_, s)| s) {
            turn::force_close(sheet, &closed);
        }
        self.disable(&closed);

        if self.is_game_over() {
            self.finish();
        } else {
            self.current = self.current.next(self.player_count());
            self.turn += 1;
            self.phase = TurnPhase::AwaitingRoll;
            debug!(turn = self.turn, player = %self.current, "next turn");
        }
    }

    fn disable(&mut self, colors: &[Color]) {
        for &color in colors {
            if self.enabled[color] {
                info!(%color, "color closed");
                self.enabled[color] = false;
            }
        }
    }

    fn finish(&mut self) {
        self.phase = TurnPhase::Finished;
        let ranking = self.ranking();
        info!(
            turns = self.turn,
            winner = ranking.first().map(|s| s.name.as_str()).unwrap_or_default(),
            score = ranking.first().map(|s| s.score).unwrap_or_default(),
            "game over"
        );
    }

    fn record(&mut self, player: PlayerId, action: RecordedAction, sequence: u32) {
        self.history
            .push_back(ActionRecord::new(player, action, self.turn, sequence));
    }

    fn expect_awaiting_roll(&self) -> Result<()> {
        match self.phase {
            TurnPhase::AwaitingRoll => Ok(()),
            TurnPhase::Finished => Err(GameError::GameOver),
            _ => Err(self.wrong_phase("awaiting roll")),
        }
    }

    fn wrong_phase(&self, expected: &'static str) -> GameError {
        match self.phase {
            TurnPhase::Finished => GameError::GameOver,
            _ => GameError::WrongPhase {
                expected,
                actual: self.phase.name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mark;

    fn game(players: usize) -> Game {
        Game::new(GameConfig::new(players).with_first_player(PlayerId::new(0))).unwrap()
    }

    fn faces(shared: [u8; 2], dice: [u8; 4]) -> RollOutcome {
        RollOutcome::from_faces(shared, ColorMap::new(|c| Some(dice[c.index()]))).unwrap()
    }

    #[test]
    fn test_game_creation() {
        let g = game(3);
        assert_eq!(g.player_count(), 3);
        assert_eq!(g.current_player(), PlayerId::new(0));
        assert_eq!(g.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(g.turn_number(), 1);
        assert_eq!(g.sheet(PlayerId::new(2)).name(), "Player 3");
        assert!(!g.is_game_over());
        assert!(g.result().is_none());
        // Everyone is tied on zero before the first roll.
        assert_eq!(g.winners().len(), 3);
    }

    #[test]
    fn test_invalid_configuration() {
        let config = GameConfig::new(2).with_names(["Ada"]);
        assert!(matches!(Game::new(config), Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_random_first_player_is_seeded() {
        let a = Game::new(GameConfig::new(4).with_seed(11)).unwrap();
        let b = Game::new(GameConfig::new(4).with_seed(11)).unwrap();
        assert_eq!(a.current_player(), b.current_player());
        assert!(a.current_player().index() < 4);
    }

    #[test]
    fn test_phase_errors() {
        let mut g = game(2);
        assert!(matches!(
            g.apply_active(TurnAction::FailedAttempt),
            Err(GameError::WrongPhase { expected: "active", .. })
        ));
        assert!(g.legal_combinations(PlayerId::new(0)).is_err());

        g.roll().unwrap();
        assert!(matches!(g.roll(), Err(GameError::WrongPhase { .. })));
        assert!(g.apply_passive(PlayerId::new(1), PassiveChoice::Decline).is_err());
    }

    #[test]
    fn test_full_turn() {
        let mut g = game(3);
        g.roll_with(faces([3, 4], [1, 2, 5, 6])).unwrap();

        let legal = g.legal_combinations(PlayerId::new(0)).unwrap();
        assert!(legal.allows_colored(Color::Blue, 10));

        g.apply_active(TurnAction::Combined {
            shared: Mark::new(Color::Red, 7),
            colored: Mark::new(Color::Blue, 10),
        })
        .unwrap();

        assert_eq!(g.pending_passive(), Some(PlayerId::new(1)));
        let passive_legal = g.legal_combinations(PlayerId::new(1)).unwrap();
        assert!(passive_legal.allows_shared(Color::Yellow, 7));
        assert!(passive_legal.colored.values().all(|v| v.is_empty()));

        // Out of order
        assert_eq!(
            g.apply_passive(PlayerId::new(2), PassiveChoice::Decline),
            Err(GameError::NotPassive(PlayerId::new(2)))
        );

        g.apply_passive(PlayerId::new(1), PassiveChoice::Mark(Mark::new(Color::Yellow, 7)))
            .unwrap();
        g.apply_passive(PlayerId::new(2), PassiveChoice::Decline).unwrap();

        assert_eq!(g.phase(), &TurnPhase::AwaitingRoll);
        assert_eq!(g.current_player(), PlayerId::new(1));
        assert_eq!(g.turn_number(), 2);
        assert!(g.sheet(PlayerId::new(1)).row(Color::Yellow).is_marked(7));
        assert_eq!(g.sheet(PlayerId::new(2)).total_score(), 0);

        let sequences: Vec<_> = g
            .history()
            .iter()
            .map(|r| (r.player.index(), r.sequence))
            .collect();
        assert_eq!(sequences, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_illegal_active_action_keeps_phase() {
        let mut g = game(2);
        g.roll_with(faces([3, 4], [1, 1, 1, 1])).unwrap();
        let before = g.sheet(PlayerId::new(0)).clone();

        assert!(g.apply_active(TurnAction::Shared(Mark::new(Color::Red, 8))).is_err());
        assert_eq!(g.sheet(PlayerId::new(0)), &before);
        assert!(matches!(g.phase(), TurnPhase::Active { .. }));
        assert!(g.history().is_empty());

        g.apply_active(TurnAction::Shared(Mark::new(Color::Red, 7))).unwrap();
        assert!(matches!(g.phase(), TurnPhase::Passive { .. }));
    }

    #[test]
    fn test_roll_with_ignores_disabled_dice() {
        let mut g = game(2);
        g.enabled[Color::Green] = false;
        let roll = g.roll_with(faces([1, 2], [3, 3, 3, 3])).unwrap();
        assert!(roll.colored_die(Color::Green).is_none());
        assert_eq!(roll.colored_die(Color::Red), Some(3));
    }

    #[test]
    fn test_failed_attempt_limit_skips_passive_round() {
        let mut g = Game::new(
            GameConfig::new(2)
                .with_first_player(PlayerId::new(0))
                .with_max_failed_attempts(1),
        )
        .unwrap();
        g.roll().unwrap();
        g.apply_active(TurnAction::FailedAttempt).unwrap();

        assert_eq!(g.phase(), &TurnPhase::Finished);
        assert!(g.is_game_over());
        assert_eq!(g.result(), Some(GameResult::Winner(PlayerId::new(1))));
        let winners = g.winners();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].name, "Player 2");
        assert_eq!(g.roll(), Err(GameError::GameOver));
    }

    #[test]
    fn test_no_game_starts_already_over() {
        let config = GameConfig::new(2).with_min_open_colors(Color::COUNT);
        assert!(matches!(
            Game::new(config),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_legal_combinations_unknown_seat() {
        let mut g = game(2);
        g.roll_with(faces([3, 4], [1, 1, 1, 1])).unwrap();
        assert_eq!(
            g.legal_combinations(PlayerId::new(2)),
            Err(GameError::UnknownPlayer(PlayerId::new(2)))
        );
        assert_eq!(
            g.legal_combinations(PlayerId::new(200)),
            Err(GameError::UnknownPlayer(PlayerId::new(200)))
        );
        assert!(matches!(g.phase(), TurnPhase::Active { .. }));
    }

    #[test]
    fn test_checkpoint_mid_passive_round() {
        let mut g = game(3);
        g.roll_with(faces([3, 4], [1, 1, 1, 1])).unwrap();
        g.apply_active(TurnAction::Shared(Mark::new(Color::Red, 7)))
            .unwrap();

        let json = serde_json::to_string(&g.checkpoint()).unwrap();
        let checkpoint: GameCheckpoint = serde_json::from_str(&json).unwrap();
        let mut restored = Game::restore(checkpoint).unwrap();

        assert_eq!(restored.phase(), g.phase());
        assert_eq!(restored.pending_passive(), Some(PlayerId::new(1)));
        assert_eq!(restored.history(), g.history());
        assert_eq!(restored.rng_state(), g.rng_state());

        for copy in [&mut g, &mut restored] {
            copy.apply_passive(PlayerId::new(1), PassiveChoice::Decline)
                .unwrap();
            copy.apply_passive(PlayerId::new(2), PassiveChoice::Decline)
                .unwrap();
        }
        assert_eq!(restored.roll().unwrap(), g.roll().unwrap());
    }

    #[test]
    fn test_restore_rejects_mismatched_table() {
        let g = game(3);

        let mut checkpoint = g.checkpoint();
        checkpoint.config.player_count = 2;
        checkpoint.config.first_player = None;
        assert!(matches!(
            Game::restore(checkpoint),
            Err(GameError::InvalidConfiguration(_))
        ));

        let mut checkpoint = g.checkpoint();
        checkpoint.current = PlayerId::new(5);
        assert_eq!(
            Game::restore(checkpoint).map(|_| ()),
            Err(GameError::UnknownPlayer(PlayerId::new(5)))
        );
    }
}
