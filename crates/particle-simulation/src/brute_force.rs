//! All-pairs engines

use glam::Vec2;

use crate::engine::{integrate, EngineKind, ForceField, PhysicsEngine};
use crate::parallel::{fill_parallel, worker_count};
use crate::params::SimulationParams;
use crate::system::ParticleSystem;

/// O(n²) on the calling thread.
#[derive(Default)]
pub struct SequentialEngine {
    forces: Vec<Vec2>,
}

impl SequentialEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhysicsEngine for SequentialEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Sequential
    }

    fn update(&mut self, system: &mut ParticleSystem, params: &SimulationParams, dt: f32) {
        let field = ForceField::new(system, params);
        let particles = system.groups.particles();

        self.forces.clear();
        self.forces.extend(particles.iter().map(|particle| {
            particles
                .iter()
                .fold(Vec2::ZERO, |acc, other| acc + field.pair(particle, other))
        }));

        let world = system.world;
        integrate(
            system.groups.particles_mut(),
            &self.forces,
            params,
            &world,
            dt,
        );
    }
}

/// O(n²) split across worker threads.
pub struct ParallelEngine {
    forces: Vec<Vec2>,
    workers: usize,
}

impl ParallelEngine {
    pub fn new() -> Self {
        Self::with_workers(worker_count())
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            forces: Vec::new(),
            workers: workers.max(1),
        }
    }
}

impl Default for ParallelEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsEngine for ParallelEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Parallel
    }

    fn update(&mut self, system: &mut ParticleSystem, params: &SimulationParams, dt: f32) {
        let field = ForceField::new(system, params);
        let particles = system.groups.particles();

        self.forces.resize(particles.len(), Vec2::ZERO);
        fill_parallel(&mut self.forces, self.workers, |i| {
            let particle = &particles[i];
            particles
                .iter()
                .fold(Vec2::ZERO, |acc, other| acc + field.pair(particle, other))
        });

        let world = system.world;
        integrate(
            system.groups.particles_mut(),
            &self.forces,
            params,
            &world,
            dt,
        );
    }
}
