//! Per-machine play statistics

use serde::{Deserialize, Serialize};

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub winning_spins: u64,
    pub winning_lines: u64,
    pub near_misses: u64,
    pub total_bet: u64,
    pub total_paid: u64,
}

impl SessionStats {
    /// Record a resolved spin
    pub fn record_spin(&mut self, winning_lines: usize, near_miss: bool) {
        self.total_spins += 1;
        if winning_lines > 0 {
            self.winning_spins += 1;
            self.winning_lines += winning_lines as u64;
        }
        if near_miss {
            self.near_misses += 1;
        }
    }

    pub fn record_bet(&mut self, amount: u64) {
        self.total_bet = self.total_bet.saturating_add(amount);
    }

    pub fn record_payout(&mut self, amount: u64) {
        self.total_paid = self.total_paid.saturating_add(amount);
    }

    /// Fold another session's counters into this one
    pub fn merge(&mut self, other: &SessionStats) {
        self.total_spins += other.total_spins;
        self.winning_spins += other.winning_spins;
        self.winning_lines += other.winning_lines;
        self.near_misses += other.near_misses;
        self.total_bet = self.total_bet.saturating_add(other.total_bet);
        self.total_paid = self.total_paid.saturating_add(other.total_paid);
    }

    /// Fraction of spins with at least one winning line
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            self.winning_spins as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }

    /// Fraction of spins flagged as near misses
    pub fn near_miss_rate(&self) -> f64 {
        if self.total_spins > 0 {
            self.near_misses as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }

    /// Paid out / bet in
    pub fn return_ratio(&self) -> f64 {
        if self.total_bet > 0 {
            self.total_paid as f64 / self.total_bet as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rates() {
        let stats = SessionStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.return_ratio(), 0.0);
    }

    #[test]
    fn test_record_and_merge() {
        let mut a = SessionStats::default();
        a.record_spin(2, false);
        a.record_spin(0, true);
        a.record_bet(6);
        a.record_payout(3);

        let mut b = SessionStats::default();
        b.record_spin(0, false);
        b.record_bet(3);

        a.merge(&b);
        assert_eq!(a.total_spins, 3);
        assert_eq!(a.winning_spins, 1);
        assert_eq!(a.winning_lines, 2);
        assert_eq!(a.near_misses, 1);
        assert_eq!(a.total_bet, 9);
        assert!((a.return_ratio() - 1.0 / 3.0).abs() < 1e-12);
    }
}
