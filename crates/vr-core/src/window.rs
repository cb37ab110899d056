//! Visible window of reel stops

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::icon::Icon;
use crate::payline::Coordinate;
use crate::reel::ActualReel;

/// Icons in view, indexed `[row][reel]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    rows: Vec<Vec<Icon>>,
}

impl Window {
    /// Create a window from explicit rows
    pub fn from_rows(rows: Vec<Vec<Icon>>) -> Self {
        Self { rows }
    }

    /// Derive the window from per-reel centerline indices
    ///
    /// The top row sits `(rows - 1) / 2` stops above the centerline; each
    /// following row is the next stop, wrapping around the strip.
    pub fn from_centerlines(reels: &[ActualReel], centerlines: &[usize], row_count: usize) -> Self {
        let above_center = ((row_count.saturating_sub(1)) / 2) as isize;
        let tops: Vec<usize> = reels
            .iter()
            .zip(centerlines)
            .map(|(reel, &center)| reel.wrap(center as isize - above_center))
            .collect();

        let rows = (0..row_count)
            .map(|row| {
                reels
                    .iter()
                    .zip(&tops)
                    .map(|(reel, &top)| reel.icon_at(top + row))
                    .collect()
            })
            .collect();

        Self { rows }
    }

    /// Icon at a coordinate, if inside the window
    pub fn icon_at(&self, coordinate: Coordinate) -> Option<Icon> {
        self.rows
            .get(coordinate.row)
            .and_then(|row| row.get(coordinate.reel))
            .copied()
    }

    /// Rows of icons
    pub fn rows(&self) -> &[Vec<Icon>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of reels (columns)
    pub fn reel_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for icon in row {
                write!(f, "\t{}", icon)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
