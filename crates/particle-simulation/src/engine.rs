//! Engine abstraction and the integration step shared by all engines

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use particle_physics::{AttractionMatrix, AttractionRules, Particle, World};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::params::SimulationParams;
use crate::system::ParticleSystem;

/// Available neighbour search / threading strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Every pair, one thread
    Sequential,
    /// Every pair, all cores
    Parallel,
    /// Spatial grid, neighbour cells computed per query
    Chunked,
    /// Spatial grid, neighbour cells precomputed per cell
    #[default]
    ChunkedCached,
}

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Sequential,
        EngineKind::Parallel,
        EngineKind::Chunked,
        EngineKind::ChunkedCached,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Sequential => "sequential",
            EngineKind::Parallel => "parallel",
            EngineKind::Chunked => "chunked",
            EngineKind::ChunkedCached => "chunked-cached",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimulationError::UnknownEngine(s.to_string()))
    }
}

/// Advances a [`ParticleSystem`] in time.
pub trait PhysicsEngine: Send {
    fn kind(&self) -> EngineKind;

    /// One step of `dt` simulation seconds.
    fn update(&mut self, system: &mut ParticleSystem, params: &SimulationParams, dt: f32);
}

/// Read-only view of everything needed to evaluate forces for one step.
#[derive(Clone, Copy)]
pub(crate) struct ForceField<'a> {
    pub world: World,
    pub matrix: &'a AttractionMatrix,
    pub rules: AttractionRules,
    pub multiplier: f32,
}

impl<'a> ForceField<'a> {
    pub fn new(system: &'a ParticleSystem, params: &SimulationParams) -> Self {
        Self {
            world: system.world,
            matrix: &system.matrix,
            rules: params.rules(),
            multiplier: params.force_multiplier,
        }
    }

    /// Force on `particle` from `other`.
    #[inline]
    pub fn pair(&self, particle: &Particle, other: &Particle) -> Vec2 {
        let delta = self.world.displacement(particle.position, other.position);
        let attraction = self
            .matrix
            .force(particle.group, other.group, self.multiplier);
        self.rules.attract(delta, attraction)
    }
}

/// Apply forces to velocities, then move every particle.
pub(crate) fn integrate(
    particles: &mut [Particle],
    forces: &[Vec2],
    params: &SimulationParams,
    world: &World,
    dt: f32,
) {
    let friction = params.friction(dt);
    let r_max = params.rules().r_max;
    for (particle, force) in particles.iter_mut().zip(forces) {
        particle.apply_force(*force, friction, r_max, dt);
        particle.advance(dt, world);
    }
}
