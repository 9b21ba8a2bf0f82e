//! Row colors and per-color storage.
//!
//! ## Color
//!
//! The four tracks of a score sheet. Red and Yellow run 2 → 12,
//! Green and Blue run 12 → 2. The direction is a property of the variant,
//! so legality checks never compare color names.
//!
//! ## ColorMap
//!
//! Fixed-size per-color storage backed by an array, indexed by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use super::error::GameError;

/// Direction a row is filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// 2, 3, ..., 12
    Ascending,
    /// 12, 11, ..., 2
    Descending,
}

/// One of the four row colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    /// All colors in sheet order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Number of colors on a sheet.
    pub const COUNT: usize = 4;

    /// Index into per-color arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction this color's row is filled in.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Color::Red | Color::Yellow => Direction::Ascending,
            Color::Green | Color::Blue => Direction::Descending,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    /// Parse a color name, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use qwixx_engine::core::Color;
    ///
    /// assert_eq!("green".parse::<Color>().unwrap(), Color::Green);
    /// assert!("purple".parse::<Color>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| GameError::UnknownColor(trimmed.to_string()))
    }
}

/// Per-color data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use qwixx_engine::core::{Color, ColorMap};
///
/// let mut open: ColorMap<bool> = ColorMap::with_value(true);
/// open[Color::Blue] = false;
///
/// assert!(open[Color::Red]);
/// assert_eq!(open.iter().filter(|(_, &v)| v).count(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; Color::COUNT],
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (Color, &T) pairs in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over the values in sheet order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.data[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.data[color.index()]
    }
}
