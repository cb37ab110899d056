//! Batch simulation tests

use std::io::Write;

use approx::assert_abs_diff_eq;
use vr_core::MachineConfig;
use vr_sim::{BatchSimulator, SimError, SimulationConfig, load_machine_config};

fn seeded(spins: u64, seed: u64) -> SimulationConfig {
    SimulationConfig::default().with_spins(spins).with_seed(seed)
}

#[test]
fn test_same_seed_same_report_for_any_thread_count() {
    let single = BatchSimulator::new(seeded(40_000, 99).with_threads(1)).run().unwrap();
    let multi = BatchSimulator::new(seeded(40_000, 99).with_threads(4)).run().unwrap();

    assert_eq!(single.seed, 99);
    assert_eq!(single.stats, multi.stats);
    assert_eq!(single.residual_balance, multi.residual_balance);
    for (a, b) in single.reels.iter().zip(&multi.reels) {
        assert_eq!(a.measured_jackpot_rate, b.measured_jackpot_rate);
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = BatchSimulator::new(seeded(20_000, 1)).run().unwrap();
    let b = BatchSimulator::new(seeded(20_000, 2)).run().unwrap();
    assert_ne!(a.stats, b.stats);
}

#[test]
fn test_measured_jackpot_rate_matches_exact() {
    let report = BatchSimulator::new(seeded(200_000, 7)).run().unwrap();
    assert_eq!(report.reels.len(), 3);
    for reel in &report.reels {
        assert_abs_diff_eq!(reel.exact_jackpot_rate, 13.0 / 64.0, epsilon = 1e-12);
        assert_abs_diff_eq!(reel.measured_jackpot_rate, reel.exact_jackpot_rate, epsilon = 0.01);
    }
}

#[test]
fn test_report_rates_are_sane() {
    let report = BatchSimulator::new(seeded(50_000, 12)).run().unwrap();
    assert_eq!(report.stats.total_spins, 50_000);
    assert_eq!(report.stats.total_bet, 150_000);
    assert!(report.hit_rate > 0.0 && report.hit_rate < 1.0);
    assert!(report.near_miss_rate > 0.0);
    assert!(report.hit_rate + report.near_miss_rate <= 1.0);
    assert!(report.return_ratio <= 1.0);
    assert_eq!(
        report.stats.total_bet,
        report.stats.total_paid + report.residual_balance
    );
}

#[test]
fn test_unseeded_run_reports_its_seed() {
    let report = BatchSimulator::new(SimulationConfig::default().with_spins(1_000))
        .run()
        .unwrap();
    let replay = BatchSimulator::new(seeded(1_000, report.seed)).run().unwrap();
    assert_eq!(report.stats, replay.stats);
}

#[test]
fn test_loads_json_and_yaml_configs() {
    let machine = MachineConfig::classic().with_reel_stops(5, 10, 20);

    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    json.write_all(machine.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(load_machine_config(json.path()).unwrap(), machine);

    let yaml_text = "\
number_of_reels: 3
number_of_rows: 3
number_of_icons_per_reel: 5
reel_stops_actual: 10
reel_stops_virtual: 20
pay_lines:
  - [[0, 1], [1, 1], [2, 1]]
spin_mode: step
";
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    yaml.write_all(yaml_text.as_bytes()).unwrap();
    let loaded = load_machine_config(yaml.path()).unwrap();
    assert_eq!(loaded.reel_stops_virtual, 20);
    assert_eq!(loaded.pay_lines.len(), 1);

    let report = BatchSimulator::new(SimulationConfig::new(loaded).with_spins(100).with_seed(5))
        .run()
        .unwrap();
    assert_eq!(report.bet_per_spin, 1);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = load_machine_config("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
