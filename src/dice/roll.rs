//! A single roll and the sums it makes available.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, GameError, Result};

use super::DIE_SIDES;

/// Faces of one roll. Recomputed every turn.
///
/// ```
/// use qwixx_engine::core::{Color, ColorMap};
/// use qwixx_engine::dice::RollOutcome;
///
/// let roll = RollOutcome::from_faces([3, 5], ColorMap::new(|_| Some(2))).unwrap();
/// assert_eq!(roll.shared_sum(), 8);
/// assert_eq!(roll.colored_sums(Color::Red), Some([5, 7]));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RollFaces")]
pub struct RollOutcome {
    shared: [u8; 2],
    /// `None` for colors whose die is out of the game.
    colored: ColorMap<Option<u8>>,
}

/// Unchecked wire form; deserialized rolls go through `from_faces`.
#[derive(Deserialize)]
struct RollFaces {
    shared: [u8; 2],
    colored: ColorMap<Option<u8>>,
}

impl TryFrom<RollFaces> for RollOutcome {
    type Error = GameError;

    fn try_from(faces: RollFaces) -> Result<Self> {
        Self::from_faces(faces.shared, faces.colored)
    }
}

impl RollOutcome {
    /// Build a roll from known faces, e.g. physical dice entered by hand.
    pub fn from_faces(shared: [u8; 2], colored: ColorMap<Option<u8>>) -> Result<Self> {
        let faces = shared.iter().chain(colored.values().flatten());
        if let Some(bad) = faces.copied().find(|f| !(1..=DIE_SIDES).contains(f)) {
            return Err(GameError::InvalidConfiguration(format!(
                "die face {} is outside 1..={}",
                bad, DIE_SIDES
            )));
        }
        Ok(Self::from_parts(shared, colored))
    }

    pub(crate) fn from_parts(shared: [u8; 2], colored: ColorMap<Option<u8>>) -> Self {
        Self { shared, colored }
    }

    /// The two shared dice.
    #[must_use]
    pub fn shared(&self) -> [u8; 2] {
        self.shared
    }

    /// Sum of the shared dice.
    #[must_use]
    pub fn shared_sum(&self) -> u8 {
        self.shared[0] + self.shared[1]
    }

    /// The colored die, if that color was rolled.
    #[must_use]
    pub fn colored_die(&self, color: Color) -> Option<u8> {
        self.colored[color]
    }

    /// Colored die plus each shared die, sorted ascending.
    #[must_use]
    pub fn colored_sums(&self, color: Color) -> Option<[u8; 2]> {
        self.colored[color].map(|die| {
            let a = die + self.shared[0];
            let b = die + self.shared[1];
            [a.min(b), a.max(b)]
        })
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shared {}+{}", self.shared[0], self.shared[1])?;
        for (color, die) in self.colored.iter() {
            if let Some(die) = die {
                write!(f, ", {} {}", color, die)?;
            }
        }
        Ok(())
    }
}
