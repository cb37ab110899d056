//! Pay lines and win evaluation

use serde::{Deserialize, Serialize};

use crate::icon::Icon;
use crate::window::Window;

/// A (reel, row) address into the visible window
///
/// Serialized as a `[reel, row]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coordinate {
    /// Reel (column) index
    pub reel: usize,
    /// Row index, 0 = top
    pub row: usize,
}

impl Coordinate {
    pub fn new(reel: usize, row: usize) -> Self {
        Self { reel, row }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((reel, row): (usize, usize)) -> Self {
        Self { reel, row }
    }
}

impl From<Coordinate> for (usize, usize) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.reel, coordinate.row)
    }
}

/// A pay line definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLine {
    /// Pay line index (0-based)
    pub index: usize,
    /// Addressed window positions
    coordinates: Vec<Coordinate>,
}

impl PayLine {
    /// Create a pay line from explicit coordinates
    pub fn new(index: usize, coordinates: Vec<Coordinate>) -> Self {
        Self { index, coordinates }
    }

    /// Create a straight line (same row across all reels)
    pub fn straight(index: usize, row: usize, reel_count: usize) -> Self {
        Self {
            index,
            coordinates: (0..reel_count).map(|reel| Coordinate::new(reel, row)).collect(),
        }
    }

    /// Addressed coordinates in order
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Wins iff every addressed icon is a jackpot
    pub fn is_winner(&self, window: &Window) -> bool {
        self.coordinates
            .iter()
            .all(|&coordinate| Icon::matches_jackpot(window.icon_at(coordinate).as_ref()))
    }

    /// Number of addressed icons that are not jackpots
    pub fn missing_jackpots(&self, window: &Window) -> usize {
        self.coordinates
            .iter()
            .filter(|&&coordinate| !Icon::matches_jackpot(window.icon_at(coordinate).as_ref()))
            .count()
    }

    /// One icon short of a win
    pub fn is_near_miss(&self, window: &Window) -> bool {
        self.missing_jackpots(window) == 1
    }
}

/// Indices of winning pay lines
pub fn winning_lines(pay_lines: &[PayLine], window: &Window) -> Vec<usize> {
    pay_lines
        .iter()
        .filter(|line| line.is_winner(window))
        .map(|line| line.index)
        .collect()
}
