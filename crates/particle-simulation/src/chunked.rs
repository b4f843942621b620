//! Grid-accelerated engines

use glam::Vec2;

use crate::engine::{integrate, EngineKind, ForceField, PhysicsEngine};
use crate::grid::ChunkGrid;
use crate::parallel::{fill_parallel, worker_count};
use crate::params::SimulationParams;
use crate::system::ParticleSystem;

/// Only visits particles in the surrounding 3x3 grid cells.
pub struct ChunkedEngine {
    grid: Option<ChunkGrid>,
    cached: bool,
    forces: Vec<Vec2>,
    workers: usize,
}

impl ChunkedEngine {
    /// `cached` precomputes each cell's neighbour list when the grid is built.
    pub fn new(cached: bool) -> Self {
        Self::with_workers(cached, worker_count())
    }

    pub fn with_workers(cached: bool, workers: usize) -> Self {
        Self {
            grid: None,
            cached,
            forces: Vec::new(),
            workers: workers.max(1),
        }
    }
}

impl PhysicsEngine for ChunkedEngine {
    fn kind(&self) -> EngineKind {
        if self.cached {
            EngineKind::ChunkedCached
        } else {
            EngineKind::Chunked
        }
    }

    fn update(&mut self, system: &mut ParticleSystem, params: &SimulationParams, dt: f32) {
        let r_max = params.rules().r_max;
        let stale = !self
            .grid
            .as_ref()
            .is_some_and(|grid| grid.matches(&system.world, r_max));
        if stale {
            self.grid = Some(ChunkGrid::new(system.world, r_max, self.cached));
        }

        let Some(grid) = self.grid.as_mut() else {
            return;
        };
        grid.rebuild(system.groups.particles());
        let grid: &ChunkGrid = grid;
        let field = ForceField::new(system, params);
        let particles = system.groups.particles();

        self.forces.resize(particles.len(), Vec2::ZERO);
        fill_parallel(&mut self.forces, self.workers, |i| {
            let particle = &particles[i];
            let mut force = Vec2::ZERO;
            grid.for_each_candidate(grid.cell_of_particle(i), |j| {
                force += field.pair(particle, &particles[j]);
            });
            force
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
