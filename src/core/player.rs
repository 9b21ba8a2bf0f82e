//! Participant identification and per-participant data storage.
//!
//! ## PlayerId
//!
//! Seat index of a participant, 0-based. Displayed 1-based ("Player 1")
//! to match the default participant names.
//!
//! ## PlayerMap
//!
//! Per-participant storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat of a participant. Supports up to 255 participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Largest supported participant count.
    pub const MAX_PLAYERS: usize = u8::MAX as usize;

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a game with `player_count` participants.
    ///
    /// ```
    /// use qwixx_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// Every other seat, in table order starting right after this one.
    ///
    /// ```
    /// use qwixx_engine::core::PlayerId;
    ///
    /// let others: Vec<_> = PlayerId::new(1).others(4).collect();
    /// assert_eq!(others, vec![PlayerId::new(2), PlayerId::new(3), PlayerId::new(0)]);
    /// ```
    pub fn others(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        let start = self.index();
        (1..player_count).map(move |offset| PlayerId(((start + offset) % player_count) as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Per-participant data storage with O(1) access.
///
/// Built from an already validated participant list, so it is never empty.
///
/// ## Example
///
/// ```
/// use qwixx_engine::core::{PlayerId, PlayerMap};
///
/// let mut penalties: PlayerMap<u32> = PlayerMap::new(3, |_| 0);
/// penalties[PlayerId::new(2)] += 1;
///
/// assert_eq!(penalties[PlayerId::new(2)], 1);
/// assert_eq!(penalties.player_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        debug_assert!(player_count <= PlayerId::MAX_PLAYERS);
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Wrap values already in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        debug_assert!(data.len() <= PlayerId::MAX_PLAYERS);
        Self { data }
    }

    /// Get the number of participants.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a participant's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a participant's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
