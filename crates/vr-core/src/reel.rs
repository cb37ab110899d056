//! Actual and virtual reel strips
//!
//! An [`ActualReel`] holds the physical icons. A [`VirtualReel`] is the hidden
//! weighting table: a list of actual-reel indices where each index appears as
//! many times as it should be selected. Spins draw uniformly from the virtual
//! reel, so the odds of any stop are fixed by its multiplicity.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{MachineError, MachineResult};
use crate::icon::Icon;

/// Physical reel strip (circular, 0-based)
///
/// Serialized as a plain icon list; an empty list is rejected on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Icon>", into = "Vec<Icon>")]
pub struct ActualReel {
    stops: Vec<Icon>,
}

impl ActualReel {
    /// Build a shuffled reel with `jackpot_count` jackpots among `total_stops`
    pub fn random<R: Rng + ?Sized>(
        total_stops: usize,
        jackpot_count: usize,
        rng: &mut R,
    ) -> MachineResult<Self> {
        if jackpot_count > total_stops {
            return Err(MachineError::config(format!(
                "{} jackpot icons do not fit on a {}-stop reel",
                jackpot_count, total_stops
            )));
        }
        if total_stops == 0 {
            return Err(MachineError::config("reel must have at least one stop"));
        }

        let mut stops = Vec::with_capacity(total_stops);
        stops.resize(jackpot_count, Icon::Jackpot);
        stops.resize(total_stops, Icon::Blank);
        stops.shuffle(rng);

        Ok(Self { stops })
    }

    /// Build a reel from a fixed icon strip
    pub fn from_icons(icons: Vec<Icon>) -> MachineResult<Self> {
        if icons.is_empty() {
            return Err(MachineError::config("reel must have at least one stop"));
        }
        Ok(Self { stops: icons })
    }

    /// Build a reel from a glyph pattern such as `"JBBJB"`
    pub fn from_pattern(pattern: &str) -> MachineResult<Self> {
        let icons = pattern
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                Icon::from_glyph(c).ok_or_else(|| {
                    MachineError::config(format!("unknown reel glyph '{}' in \"{}\"", c, pattern))
                })
            })
            .collect::<MachineResult<Vec<_>>>()?;
        Self::from_icons(icons)
    }

    /// Number of stops
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// All icons in stop order
    pub fn icons(&self) -> &[Icon] {
        &self.stops
    }

    /// Icon at an exact index
    pub fn get(&self, index: usize) -> Option<&Icon> {
        self.stops.get(index)
    }

    /// Icon at a position (wraps around)
    pub fn icon_at(&self, position: usize) -> Icon {
        self.stops[position % self.stops.len()]
    }

    /// Normalize a signed offset onto the strip
    pub fn wrap(&self, position: isize) -> usize {
        position.rem_euclid(self.stops.len() as isize) as usize
    }

    /// Circularly previous stop
    pub fn previous_index(&self, index: usize) -> usize {
        self.wrap(index as isize - 1)
    }

    /// Circularly next stop
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.stops.len()
    }

    /// Number of jackpot stops
    pub fn jackpot_count(&self) -> usize {
        self.stops.iter().filter(|icon| icon.is_jackpot()).count()
    }

    /// Indices holding a jackpot, ascending
    pub fn jackpot_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.stops
            .iter()
            .enumerate()
            .filter(|(_, icon)| icon.is_jackpot())
            .map(|(index, _)| index)
    }

    /// Check if either circular neighbour of `index` is a jackpot
    pub fn is_adjacent_to_jackpot(&self, index: usize) -> bool {
        Icon::matches_jackpot(self.get(self.previous_index(index)))
            || Icon::matches_jackpot(self.get(self.next_index(index)))
    }
}

impl TryFrom<Vec<Icon>> for ActualReel {
    type Error = MachineError;

    fn try_from(icons: Vec<Icon>) -> MachineResult<Self> {
        Self::from_icons(icons)
    }
}

impl From<ActualReel> for Vec<Icon> {
    fn from(reel: ActualReel) -> Self {
        reel.stops
    }
}

/// Weighted lookup table of actual-reel indices
///
/// Only [`VirtualReel::build`] creates one, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualReel {
    map: Vec<usize>,
}

impl VirtualReel {
    /// Occurrences given to a blank that borders a jackpot
    pub const ADJACENT_BLANK_WEIGHT: usize = 2;

    /// Build the virtual map for `actual` with exactly `virtual_stops` entries
    ///
    /// # Algorithm
    /// 1. Every jackpot index once, ascending
    /// 2. Every blank bordering a jackpot up to twice, never past capacity
    /// 3. Filler pool: non-adjacent blanks, else adjacent blanks, else error
    /// 4. Cycle the filler pool until the map is full
    pub fn build(actual: &ActualReel, virtual_stops: usize) -> MachineResult<Self> {
        if virtual_stops == 0 {
            return Err(MachineError::config("virtual reel must have at least one stop"));
        }
        let jackpots = actual.jackpot_count();
        if jackpots > virtual_stops {
            return Err(MachineError::config(format!(
                "{} jackpot stops do not fit on a {}-stop virtual reel",
                jackpots, virtual_stops
            )));
        }

        let mut map = Vec::with_capacity(virtual_stops);
        map.extend(actual.jackpot_indices());

        let mut adjacent = Vec::new();
        let mut non_adjacent = Vec::new();
        for (index, icon) in actual.icons().iter().enumerate() {
            if icon.is_jackpot() {
                continue;
            }
            if actual.is_adjacent_to_jackpot(index) {
                for _ in 0..Self::ADJACENT_BLANK_WEIGHT {
                    if map.len() < virtual_stops {
                        map.push(index);
                    }
                }
                adjacent.push(index);
            } else {
                non_adjacent.push(index);
            }
        }

        let filler = if non_adjacent.is_empty() {
            &adjacent
        } else {
            &non_adjacent
        };
        if filler.is_empty() {
            return Err(MachineError::config(
                "reel has no blank stops to fill the virtual reel",
            ));
        }

        let missing = virtual_stops - map.len();
        map.extend(filler.iter().cycle().take(missing).copied());

        log::trace!(
            "Virtual reel: {} jackpots, {} adjacent blanks, {} filler slots",
            jackpots,
            adjacent.len(),
            missing
        );

        Ok(Self { map })
    }

    /// Number of virtual stops
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Actual-reel indices in table order
    pub fn entries(&self) -> &[usize] {
        &self.map
    }

    /// Actual-reel index at a virtual stop
    pub fn get(&self, virtual_index: usize) -> Option<usize> {
        self.map.get(virtual_index).copied()
    }

    /// Draw one entry uniformly; the result is an actual-reel index
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.map[rng.random_range(0..self.map.len())]
    }

    /// Multiplicity of an actual-reel index
    pub fn weight_of(&self, actual_index: usize) -> usize {
        self.map.iter().filter(|&&entry| entry == actual_index).count()
    }

    /// Exact probability that a uniform draw lands a jackpot on the centerline
    pub fn jackpot_probability(&self, actual: &ActualReel) -> f64 {
        if self.map.is_empty() {
            return 0.0;
        }
        let hits = self
            .map
            .iter()
            .filter(|&&entry| Icon::matches_jackpot(actual.get(entry)))
            .count();
        hits as f64 / self.map.len() as f64
    }
}
