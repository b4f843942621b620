//! Step cost of each engine on the reference scenario
//!
//! Run with: cargo bench -p particle-simulation

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use particle_physics::{World, PARTICLES_PER_GROUP};
use particle_simulation::{
    build_engine, default_system, EngineKind, SimulationParams, DEFAULT_GROUP_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_engines(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let system = default_system(
        World::new(500.0, 500.0),
        DEFAULT_GROUP_COUNT,
        PARTICLES_PER_GROUP,
        &mut rng,
    );
    let params = SimulationParams::default();

    let mut group = c.benchmark_group("engine_update");
    group.sample_size(20);
    for kind in EngineKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            let mut engine = build_engine(kind);
            let mut system = system.clone();
            b.iter(|| engine.update(&mut system, &params, 0.1));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
