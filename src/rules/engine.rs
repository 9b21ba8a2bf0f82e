//! End-of-game predicate, ranking and results.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, GameConfig, PlayerId, PlayerMap};
use crate::sheet::Sheet;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Several participants share the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a participant won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }

    /// Build the result from a ranking (best first).
    ///
    /// Returns `None` for an empty ranking.
    #[must_use]
    pub fn from_ranking(ranking: &[Standing]) -> Option<Self> {
        let top = ranking.first()?.score;
        let mut winners: Vec<PlayerId> = ranking
            .iter()
            .take_while(|s| s.score == top)
            .map(|s| s.player)
            .collect();
        Some(if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Winners(winners)
        })
    }
}

/// One line of the final ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub score: i32,
}

/// Colors still in play: enabled and not closed on any sheet.
pub fn open_colors<'a>(
    sheets: &'a PlayerMap<Sheet>,
    enabled: &'a ColorMap<bool>,
) -> impl Iterator<Item = Color> + 'a {
    Color::ALL.into_iter().filter(move |&color| {
        enabled[color] && !sheets.values().any(|sheet| sheet.row(color).is_closed())
    })
}

/// Whether the game has ended.
///
/// The game ends when any sheet reaches the failed-attempt limit, or when
/// closures leave `min_open_colors` or fewer colors open.
#[must_use]
pub fn is_game_over(
    sheets: &PlayerMap<Sheet>,
    enabled: &ColorMap<bool>,
    config: &GameConfig,
) -> bool {
    let too_many_failures = sheets
        .values()
        .any(|sheet| sheet.failed_attempts() >= config.max_failed_attempts);

    too_many_failures || open_colors(sheets, enabled).count() <= config.min_open_colors
}

/// Rank participants by total score, best first. Ties keep seat order.
#[must_use]
pub fn rank(sheets: &PlayerMap<Sheet>) -> Vec<Standing> {
    let mut standings: Vec<Standing> = sheets
        .iter()
        .map(|(player, sheet)| Standing {
            player,
            name: sheet.name().to_string(),
            score: sheet.total_score(),
        })
        .collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}
