// ─────────────────────────────────────────────────────────────────────
// FusionSim — Pair Loop Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fusion_core::simulation::SimulationManager;
use fusion_math::pairs::{pair_count, PairRange};
use fusion_types::config::{ReactionKind, SimulationConfig};
use std::hint::black_box;

fn make_config(particles: usize, threads: usize) -> SimulationConfig {
    SimulationConfig {
        reaction: ReactionKind::Dd,
        particle_count: particles,
        dt_s: 1.0e-10,
        t_max_s: 1.0e-9,
        threads: Some(threads),
        seed: Some(7),
        ..SimulationConfig::default()
    }
}

fn bench_pair_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_enumeration");
    for &n in &[500usize, 2000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let sum: usize = PairRange::all(n).map(|(i, j)| i ^ j).sum();
                black_box(sum);
            })
        });
    }
    group.finish();
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_step");
    // one step is a full O(n²) sweep; keep wall time reasonable
    group.sample_size(20);

    for &n in &[200usize, 1000] {
        for &threads in &[1usize, 4] {
            let config = make_config(n, threads);
            group.bench_with_input(
                BenchmarkId::new(format!("{threads}_threads"), pair_count(n)),
                &config,
                |b, cfg| {
                    b.iter_batched(
                        || SimulationManager::new(cfg.clone()).expect("valid config"),
                        |mut sim| {
                            sim.step();
                            black_box(sim.reaction_count());
                        },
                        criterion::BatchSize::LargeInput,
                    )
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_pair_enumeration, bench_simulation_step);
criterion_main!(benches);
