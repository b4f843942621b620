//! Engine construction and the reference scenario

use particle_physics::{AttractionMatrix, World};
use rand::Rng;

use crate::brute_force::{ParallelEngine, SequentialEngine};
use crate::chunked::ChunkedEngine;
use crate::engine::{EngineKind, PhysicsEngine};
use crate::groups::ParticleGroupsManager;
use crate::system::ParticleSystem;

/// Number of groups in the reference scenario
pub const DEFAULT_GROUP_COUNT: usize = 4;

/// Directed attraction coefficients of the reference scenario, `(from, to, value)`.
pub const DEFAULT_ATTRACTIONS: [(usize, usize, f32); 9] = [
    (0, 0, 1.0),
    (1, 0, 1.6),
    (0, 1, -0.5),
    (2, 1, -0.5),
    (3, 1, -0.25),
    (2, 0, 0.5),
    (2, 2, 1.0),
    (1, 3, 0.5),
    (3, 2, 1.0),
];

pub fn build_engine(kind: EngineKind) -> Box<dyn PhysicsEngine> {
    log::info!("Using {} physics engine", kind);
    match kind {
        EngineKind::Sequential => Box::new(SequentialEngine::new()),
        EngineKind::Parallel => Box::new(ParallelEngine::new()),
        EngineKind::Chunked => Box::new(ChunkedEngine::new(false)),
        EngineKind::ChunkedCached => Box::new(ChunkedEngine::new(true)),
    }
}

/// Overwrite `matrix` with the reference coefficients.
///
/// Entries naming a group beyond the matrix size are skipped.
pub fn apply_default_attractions(matrix: &mut AttractionMatrix) {
    matrix.clear();
    for (from, to, value) in DEFAULT_ATTRACTIONS {
        if matrix.set(from, to, value).is_err() {
            log::debug!("Skipping attraction {}->{}: group not present", from, to);
        }
    }
}

/// Up to `group_count` groups of `particles_per_group` with the reference matrix.
pub fn default_system<R: Rng + ?Sized>(
    world: World,
    group_count: usize,
    particles_per_group: usize,
    rng: &mut R,
) -> ParticleSystem {
    let mut groups = ParticleGroupsManager::new(group_count.max(1));
    for _ in 0..group_count {
        groups.add_group(particles_per_group, &world, rng);
    }

    let mut system = ParticleSystem::new(world, groups);
    apply_default_attractions(&mut system.matrix);

    log::info!(
        "Spawned {} particles in {} groups on a {}x{} world",
        system.particle_count(),
        system.groups.groups().len(),
        world.width,
        world.height
    );
    system
}
