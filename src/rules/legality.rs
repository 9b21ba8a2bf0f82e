//! Legal combinations for one participant and one roll.
//!
//! Pure queries: nothing here mutates a sheet, so adapters can call them as
//! often as they like while re-prompting.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Color, ColorMap};
use crate::dice::RollOutcome;
use crate::sheet::Sheet;

/// Values a participant may mark with the current roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalCombinations {
    /// Rows that accept the shared sum. Only one may be chosen.
    pub shared: ColorMap<Option<u8>>,

    /// Distinct colored sums each row accepts, ascending.
    pub colored: ColorMap<SmallVec<[u8; 2]>>,
}

impl LegalCombinations {
    /// Whether the shared sum may go in `color`.
    #[must_use]
    pub fn allows_shared(&self, color: Color, value: u8) -> bool {
        self.shared[color] == Some(value)
    }

    /// Whether the colored sum `value` may go in `color`.
    #[must_use]
    pub fn allows_colored(&self, color: Color, value: u8) -> bool {
        self.colored[color].contains(&value)
    }

    /// Rows that accept the shared sum.
    pub fn shared_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.shared.iter().filter(|(_, v)| v.is_some()).map(|(c, _)| c)
    }

    /// True when neither the shared sum nor any colored sum can be marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.values().all(Option::is_none) && self.colored.values().all(SmallVec::is_empty)
    }

    /// Only the shared part, as offered to passive participants.
    #[must_use]
    pub fn shared_only(&self) -> Self {
        Self {
            shared: self.shared,
            colored: ColorMap::with_default(),
        }
    }
}

/// Compute which values `sheet` may mark with `roll`.
///
/// ```
/// use qwixx_engine::core::{Color, ColorMap};
/// use qwixx_engine::dice::RollOutcome;
/// use qwixx_engine::rules::legal_combinations;
/// use qwixx_engine::sheet::Sheet;
///
/// let roll = RollOutcome::from_faces([1, 1], ColorMap::new(|_| Some(1))).unwrap();
/// let legal = legal_combinations(&roll, &Sheet::new("Ada"));
///
/// // 2 opens every row, but only ascending rows start at 2.
/// assert!(legal.allows_shared(Color::Red, 2));
/// assert!(!legal.allows_shared(Color::Blue, 2));
/// ```
#[must_use]
pub fn legal_combinations(roll: &RollOutcome, sheet: &Sheet) -> LegalCombinations {
    let shared_sum = roll.shared_sum();
    let shared = ColorMap::new(|color| sheet.row(color).is_legal(shared_sum).then_some(shared_sum));

    let colored = ColorMap::new(|color| {
        let mut values: SmallVec<[u8; 2]> = SmallVec::new();
        if let Some(sums) = roll.colored_sums(color) {
            for value in sums {
                if sheet.row(color).is_legal(value) && !values.contains(&value) {
                    values.push(value);
                }
            }
        }
        values
    });

    LegalCombinations { shared, colored }
}

impl std::fmt::Display for LegalCombinations {
    /// Renders a `Color | Roll(s)` table listing only rows with options.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<10}| {:<8}| Colored", "Color", "Shared")?;
        writeln!(f, "{}+{}+{}", "-".repeat(10), "-".repeat(9), "-".repeat(10))?;
        for color in Color::ALL {
            let shared = self.shared[color];
            let colored = &self.colored[color];
            if shared.is_none() && colored.is_empty() {
                continue;
            }
            let shared = shared.map(|v| v.to_string()).unwrap_or_default();
            let colored: Vec<String> = colored.iter().map(u8::to_string).collect();
            writeln!(f, "{:<10}| {:<8}| {}", color, shared, colored.join(" "))?;
        }
        Ok(())
    }
}
