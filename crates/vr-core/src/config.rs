//! Machine configuration

use serde::{Deserialize, Serialize};

use crate::error::{MachineError, MachineResult};
use crate::payline::{Coordinate, PayLine};

/// Classic cabinet: reels
pub const DEFAULT_NUMBER_OF_REELS: usize = 3;
/// Classic cabinet: visible rows
pub const DEFAULT_NUMBER_OF_ROWS: usize = 3;
/// Classic cabinet: jackpot icons per reel
pub const DEFAULT_ICONS_PER_REEL: usize = 13;
/// Classic cabinet: physical stops per reel
pub const DEFAULT_REEL_STOPS_ACTUAL: usize = 22;
/// Classic cabinet: virtual stops per reel
pub const DEFAULT_REEL_STOPS_VIRTUAL: usize = 64;

/// How a spin picks new centerlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinMode {
    /// Uniform draw from each virtual reel
    #[default]
    Random,
    /// Advance every reel by one stop (audit/debug)
    Step,
}

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Number of reels (columns)
    pub number_of_reels: usize,
    /// Number of visible rows per reel
    pub number_of_rows: usize,
    /// Jackpot icons on every actual reel
    pub number_of_icons_per_reel: usize,
    /// Physical stops per reel
    pub reel_stops_actual: usize,
    /// Entries per virtual reel
    pub reel_stops_virtual: usize,
    /// Pay line coordinate lists, `[reel, row]` pairs
    pub pay_lines: Vec<Vec<Coordinate>>,
    /// Spin resolution mode
    #[serde(default)]
    pub spin_mode: SpinMode,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl MachineConfig {
    /// Classic 3×3 cabinet: 13 jackpots on 22 stops, 64 virtual stops, 3 row lines
    pub fn classic() -> Self {
        Self {
            number_of_reels: DEFAULT_NUMBER_OF_REELS,
            number_of_rows: DEFAULT_NUMBER_OF_ROWS,
            number_of_icons_per_reel: DEFAULT_ICONS_PER_REEL,
            reel_stops_actual: DEFAULT_REEL_STOPS_ACTUAL,
            reel_stops_virtual: DEFAULT_REEL_STOPS_VIRTUAL,
            pay_lines: Self::row_pay_lines(DEFAULT_NUMBER_OF_REELS, DEFAULT_NUMBER_OF_ROWS),
            spin_mode: SpinMode::Random,
        }
    }

    /// One straight pay line per row
    pub fn row_pay_lines(reels: usize, rows: usize) -> Vec<Vec<Coordinate>> {
        (0..rows)
            .map(|row| (0..reels).map(|reel| Coordinate::new(reel, row)).collect())
            .collect()
    }

    /// Builder: set spin mode
    pub fn with_spin_mode(mut self, mode: SpinMode) -> Self {
        self.spin_mode = mode;
        self
    }

    /// Builder: set grid size and reset pay lines to one per row
    pub fn with_grid(mut self, reels: usize, rows: usize) -> Self {
        self.number_of_reels = reels;
        self.number_of_rows = rows;
        self.pay_lines = Self::row_pay_lines(reels, rows);
        self
    }

    /// Builder: set reel composition
    pub fn with_reel_stops(mut self, jackpots: usize, actual: usize, virtual_stops: usize) -> Self {
        self.number_of_icons_per_reel = jackpots;
        self.reel_stops_actual = actual;
        self.reel_stops_virtual = virtual_stops;
        self
    }

    /// Builder: set pay lines
    pub fn with_pay_lines(mut self, pay_lines: Vec<Vec<Coordinate>>) -> Self {
        self.pay_lines = pay_lines;
        self
    }

    /// Validate the configuration before any reel is built
    pub fn validate(&self) -> MachineResult<()> {
        if self.number_of_reels == 0 {
            return Err(MachineError::config("machine needs at least one reel"));
        }
        if self.number_of_rows == 0 {
            return Err(MachineError::config("window needs at least one row"));
        }
        if self.reel_stops_actual == 0 {
            return Err(MachineError::config("reel needs at least one stop"));
        }
        if self.number_of_icons_per_reel > self.reel_stops_actual {
            return Err(MachineError::config(format!(
                "{} jackpot icons exceed {} reel stops",
                self.number_of_icons_per_reel, self.reel_stops_actual
            )));
        }
        if self.number_of_icons_per_reel == self.reel_stops_actual {
            return Err(MachineError::config(
                "reel has no blank stops to fill the virtual reel",
            ));
        }
        if self.reel_stops_virtual < self.number_of_icons_per_reel || self.reel_stops_virtual == 0 {
            return Err(MachineError::config(format!(
                "{} virtual stops cannot hold {} jackpot icons",
                self.reel_stops_virtual, self.number_of_icons_per_reel
            )));
        }
        if self.number_of_rows > self.reel_stops_actual {
            return Err(MachineError::config(format!(
                "window of {} rows is taller than a {}-stop reel",
                self.number_of_rows, self.reel_stops_actual
            )));
        }

        if self.pay_lines.is_empty() {
            return Err(MachineError::config("machine needs at least one pay line"));
        }
        for (index, line) in self.pay_lines.iter().enumerate() {
            if line.is_empty() {
                return Err(MachineError::config(format!("pay line {} is empty", index)));
            }
            if let Some(outside) = line
                .iter()
                .find(|c| c.reel >= self.number_of_reels || c.row >= self.number_of_rows)
            {
                return Err(MachineError::config(format!(
                    "pay line {} addresses reel {} row {} outside the {}×{} window",
                    index, outside.reel, outside.row, self.number_of_reels, self.number_of_rows
                )));
            }
        }

        Ok(())
    }

    /// Build the pay lines described by this config
    pub fn build_pay_lines(&self) -> Vec<PayLine> {
        self.pay_lines
            .iter()
            .enumerate()
            .map(|(index, coordinates)| PayLine::new(index, coordinates.clone()))
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> MachineResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MachineError::config(format!("Invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> MachineResult<Self> {
        let config: Self = serde_yml::from_str(yaml)
            .map_err(|e| MachineError::config(format!("Invalid YAML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> MachineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MachineError::config(format!("Cannot serialize config: {}", e)))
    }
}
