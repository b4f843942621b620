//! The complete simulated state

use particle_physics::{AttractionMatrix, Particle, World};

use crate::groups::ParticleGroupsManager;

/// World, particles and the rules between their groups.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pub world: World,
    pub groups: ParticleGroupsManager,
    pub matrix: AttractionMatrix,
}

impl ParticleSystem {
    /// Builds a system whose matrix matches the groups already spawned.
    pub fn new(world: World, groups: ParticleGroupsManager) -> Self {
        let matrix = AttractionMatrix::new(groups.groups().len());
        Self {
            world,
            groups,
            matrix,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        self.groups.particles()
    }

    pub fn particle_count(&self) -> usize {
        self.groups.len()
    }
}
