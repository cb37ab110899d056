//! Reel mapping and spin benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use vr_core::{ActualReel, Machine, MachineConfig, VirtualReel};

fn bench_virtual_reel_build(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let reel = ActualReel::random(22, 13, &mut rng).unwrap();

    c.bench_function("virtual_reel_build_22_64", |b| {
        b.iter(|| VirtualReel::build(black_box(&reel), 64).unwrap())
    });
}

fn bench_spin(c: &mut Criterion) {
    let mut machine =
        Machine::new(MachineConfig::classic(), ChaCha8Rng::seed_from_u64(2)).unwrap();

    c.bench_function("spin_classic_3x3", |b| b.iter(|| black_box(machine.spin())));
}

fn bench_play_cycle(c: &mut Criterion) {
    let mut machine =
        Machine::new(MachineConfig::classic(), ChaCha8Rng::seed_from_u64(3)).unwrap();

    c.bench_function("bet_spin_payout_classic", |b| {
        b.iter(|| {
            machine.place_bet(3).unwrap();
            let wins = machine.spin();
            black_box(machine.payout(wins, 3).unwrap())
        })
    });
}

criterion_group!(benches, bench_virtual_reel_build, bench_spin, bench_play_cycle);
criterion_main!(benches);
