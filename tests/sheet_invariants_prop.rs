//! Property tests for rows, sheets and whole games.
//!
//! Invariants covered:
//! - marked values stay strictly monotonic in the row's direction
//! - the closing value needs five earlier marks and closes the row
//! - `is_legal` never changes the row
//! - a row's score never decreases as marks are added
//! - forced closure blocks every later mark
//! - a random game always ends, and ends for a reason

use proptest::prelude::*;
use qwixx_engine::core::{Color, Direction, GameConfig, Mark, PassiveChoice, TurnAction};
use qwixx_engine::rules::{Decider, Game, TurnView};
use qwixx_engine::sheet::{Row, Sheet};

fn any_color() -> impl Strategy<Value = Color> {
    prop::sample::select(Color::ALL.to_vec())
}

fn marked_values(row: &Row) -> Vec<u8> {
    row.cells().filter(|&(_, marked)| marked).map(|(value, _)| value).collect()
}

/// Follows a script of choice indices, wrapping around the legal options.
struct Scripted {
    picks: Vec<usize>,
    next: usize,
}

impl Scripted {
    fn pick(&mut self, options: usize) -> usize {
        let pick = self.picks[self.next % self.picks.len()] % options;
        self.next += 1;
        pick
    }
}

impl Decider for Scripted {
    fn choose_action(&mut self, view: &TurnView<'_>) -> TurnAction {
        let sum = view.roll.shared_sum();
        let mut options = vec![TurnAction::FailedAttempt];
        options.extend(view.legal.shared_colors().map(|c| TurnAction::Shared(Mark::new(c, sum))));
        for (color, values) in view.legal.colored.iter() {
            options.extend(values.iter().map(|&v| TurnAction::Colored(Mark::new(color, v))));
        }
        let pick = self.pick(options.len());
        options[pick]
    }

    fn choose_passive(&mut self, view: &TurnView<'_>) -> PassiveChoice {
        let sum = view.roll.shared_sum();
        let mut options = vec![PassiveChoice::Decline];
        options.extend(view.legal.shared_colors().map(|c| PassiveChoice::Mark(Mark::new(c, sum))));
        let pick = self.pick(options.len());
        options[pick]
    }
}

proptest! {
    #[test]
    fn marks_stay_monotonic(
        color in any_color(),
        values in prop::collection::vec(2u8..=12, 0..40),
    ) {
        let mut row = Row::new(color);
        for value in values {
            row.mark(value);
        }

        // cells() walks from the near end, so marked values must already be in row order.
        let marked = marked_values(&row);
        for pair in marked.windows(2) {
            prop_assert!(Row::is_farther(color, pair[0], pair[1]));
        }
        prop_assert_eq!(marked.len(), row.mark_count());
        match color.direction() {
            Direction::Ascending => prop_assert!(marked.windows(2).all(|w| w[0] < w[1])),
            Direction::Descending => prop_assert!(marked.windows(2).all(|w| w[0] > w[1])),
        }
    }

    #[test]
    fn closing_value_needs_five_marks(
        color in any_color(),
        values in prop::collection::vec(2u8..=12, 0..40),
    ) {
        let mut row = Row::new(color);
        for value in values {
            let before = row.mark_count();
            let was_closed = row.is_closed();
            let accepted = row.mark(value);

            if value == row.closing_value() && accepted {
                prop_assert!(before >= Row::CLOSE_MIN_MARKS);
                prop_assert!(row.is_closed());
            }
            if was_closed {
                prop_assert!(!accepted);
            }
            if row.is_closed() && !was_closed {
                prop_assert_eq!(value, row.closing_value());
            }
        }
    }

    #[test]
    fn is_legal_is_pure(
        color in any_color(),
        setup in prop::collection::vec(2u8..=12, 0..20),
        value in 0u8..=20,
    ) {
        let mut row = Row::new(color);
        for marked in setup {
            row.mark(marked);
        }
        let before = row.clone();
        let legal = row.is_legal(value);
        prop_assert_eq!(&row, &before);
        prop_assert_eq!(row.is_legal(value), legal);

        // A legal value is exactly one the row accepts.
        let mut copy = row.clone();
        prop_assert_eq!(copy.mark(value), legal);
    }

    #[test]
    fn score_never_decreases(
        color in any_color(),
        values in prop::collection::vec(2u8..=12, 0..40),
    ) {
        let mut row = Row::new(color);
        let mut last = row.score();
        for value in values {
            row.mark(value);
            let score = row.score();
            prop_assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn forced_closure_blocks_marks(
        color in any_color(),
        setup in prop::collection::vec(2u8..=12, 0..20),
        value in 2u8..=12,
    ) {
        let mut sheet = Sheet::new("Ada");
        for marked in setup {
            sheet.mark(color, marked);
        }
        let score = sheet.total_score();
        sheet.force_close(color);

        prop_assert!(!sheet.row(color).is_legal(value));
        prop_assert!(!sheet.mark(color, value));
        prop_assert!(sheet.total_score() >= score);
    }

    #[test]
    fn random_games_end(
        seed in any::<u64>(),
        players in 2usize..=5,
        picks in prop::collection::vec(any::<usize>(), 1..64),
    ) {
        let mut game = Game::new(GameConfig::new(players).with_seed(seed)).unwrap();
        let mut decider = Scripted { picks, next: 0 };
        let result = game.play(&mut decider, 2_000).unwrap();
        prop_assert!(result.is_some());

        let config = game.config().clone();
        let failures = game
            .sheets()
            .values()
            .any(|s| s.failed_attempts() >= config.max_failed_attempts);
        let closed = Color::ALL.len() - game.open_colors().count();
        prop_assert!(failures || closed >= Color::ALL.len() - config.min_open_colors);
    }
}
