//! Simulation configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vr_core::MachineConfig;

use crate::SimResult;

/// Spins handled by one worker chunk
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;

/// Batch simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Machine under test
    pub machine: MachineConfig,

    /// Total spins to run
    pub spins: u64,

    /// Seed (None = random, reported back)
    pub seed: Option<u64>,

    /// Worker threads (0 = rayon default)
    pub threads: usize,

    /// Credits staked per spin (0 = one per pay line)
    pub bet_per_spin: u64,

    /// Spins per chunk
    pub chunk_size: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            machine: MachineConfig::classic(),
            spins: 100_000,
            seed: None,
            threads: 0,
            bet_per_spin: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SimulationConfig {
    pub fn new(machine: MachineConfig) -> Self {
        Self {
            machine,
            ..Default::default()
        }
    }

    pub fn with_spins(mut self, spins: u64) -> Self {
        self.spins = spins;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_bet_per_spin(mut self, bet: u64) -> Self {
        self.bet_per_spin = bet;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Stake actually placed each spin
    pub fn effective_bet(&self) -> u64 {
        if self.bet_per_spin == 0 {
            self.machine.pay_lines.len() as u64
        } else {
            self.bet_per_spin
        }
    }
}

/// Load a machine config, YAML for `.yaml`/`.yml` files, JSON otherwise
pub fn load_machine_config(path: impl AsRef<Path>) -> SimResult<MachineConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let config = if is_yaml {
        MachineConfig::from_yaml(&text)?
    } else {
        MachineConfig::from_json(&text)?
    };
    log::debug!("Loaded machine config from {}", path.display());
    Ok(config)
}
