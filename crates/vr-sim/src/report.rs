//! Simulation report

use std::fmt;

use serde::{Deserialize, Serialize};
use vr_core::SessionStats;

/// Jackpot-on-centerline rate for one reel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelReport {
    pub reel: usize,
    /// `icons / virtual stops`
    pub exact_jackpot_rate: f64,
    pub measured_jackpot_rate: f64,
}

impl ReelReport {
    pub fn deviation(&self) -> f64 {
        (self.measured_jackpot_rate - self.exact_jackpot_rate).abs()
    }
}

/// Aggregated result of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Seed the run used (replays the same report)
    pub seed: u64,
    pub bet_per_spin: u64,
    pub stats: SessionStats,
    pub hit_rate: f64,
    pub near_miss_rate: f64,
    /// Credits paid / credits bet
    pub return_ratio: f64,
    pub reels: Vec<ReelReport>,
    /// Progressive credits still held when the run ended
    pub residual_balance: u64,
    pub duration_ms: u64,
}

impl SimulationReport {
    pub fn new(
        seed: u64,
        bet_per_spin: u64,
        stats: SessionStats,
        reels: Vec<ReelReport>,
        residual_balance: u64,
        duration_ms: u64,
    ) -> Self {
        Self {
            seed,
            bet_per_spin,
            hit_rate: stats.hit_rate(),
            near_miss_rate: stats.near_miss_rate(),
            return_ratio: stats.return_ratio(),
            stats,
            reels,
            residual_balance,
            duration_ms,
        }
    }

    /// Largest measured-vs-exact gap across reels
    pub fn max_deviation(&self) -> f64 {
        self.reels.iter().map(ReelReport::deviation).fold(0.0, f64::max)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = "Virtual Reel Simulation";
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Seed:        {}", self.seed)?;
        writeln!(f, "Spins:       {}", self.stats.total_spins)?;
        writeln!(f, "Bet/spin:    {}", self.bet_per_spin)?;
        writeln!(f, "Hit rate:    {:.4}%", self.hit_rate * 100.0)?;
        writeln!(f, "Near misses: {:.4}%", self.near_miss_rate * 100.0)?;
        writeln!(f, "Return:      {:.4}%", self.return_ratio * 100.0)?;
        writeln!(
            f,
            "Credits:     {} bet, {} paid, {} still in the pool",
            self.stats.total_bet, self.stats.total_paid, self.residual_balance
        )?;
        writeln!(f)?;
        writeln!(f, "Reel  Exact      Measured   Deviation")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for reel in &self.reels {
            writeln!(
                f,
                "{:<5} {:<10.6} {:<10.6} {:.6}",
                reel.reel,
                reel.exact_jackpot_rate,
                reel.measured_jackpot_rate,
                reel.deviation()
            )?;
        }
        write!(f, "\nDuration: {} ms", self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SimulationReport {
        let stats = SessionStats {
            total_spins: 100,
            winning_spins: 10,
            winning_lines: 12,
            near_misses: 20,
            total_bet: 300,
            total_paid: 150,
        };
        let reels = vec![
            ReelReport { reel: 0, exact_jackpot_rate: 0.2, measured_jackpot_rate: 0.25 },
            ReelReport { reel: 1, exact_jackpot_rate: 0.2, measured_jackpot_rate: 0.18 },
        ];
        SimulationReport::new(1, 3, stats, reels, 150, 5)
    }

    #[test]
    fn test_rates_from_stats() {
        let report = report();
        assert!((report.hit_rate - 0.1).abs() < 1e-12);
        assert!((report.near_miss_rate - 0.2).abs() < 1e-12);
        assert!((report.return_ratio - 0.5).abs() < 1e-12);
        assert!((report.max_deviation() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_json_fields() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 1);
        assert_eq!(value["stats"]["total_paid"], 150);
        assert_eq!(value["reels"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_text_lists_each_reel() {
        let text = report().to_string();
        assert!(text.contains("Seed:        1"));
        assert_eq!(text.lines().filter(|l| l.starts_with("0 ") || l.starts_with("1 ")).count(), 2);
    }
}
