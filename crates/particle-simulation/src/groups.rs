//! Particle groups and their members

use particle_physics::{Particle, ParticleGroup, World, MAX_GROUPS};
use rand::Rng;

/// Owns every particle, stored contiguously and tagged with its group.
#[derive(Debug, Clone)]
pub struct ParticleGroupsManager {
    groups: Vec<ParticleGroup>,
    particles: Vec<Particle>,
    max_groups: usize,
}

impl ParticleGroupsManager {
    pub fn new(max_groups: usize) -> Self {
        Self {
            groups: Vec::with_capacity(max_groups),
            particles: Vec::new(),
            max_groups,
        }
    }

    /// Spawn a new group of `count` randomly placed particles.
    ///
    /// Returns the new group's id, or `None` once `max_groups` is reached.
    pub fn add_group<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        world: &World,
        rng: &mut R,
    ) -> Option<usize> {
        if self.groups.len() >= self.max_groups {
            log::warn!(
                "Ignoring new group: limit of {} groups reached",
                self.max_groups
            );
            return None;
        }

        let id = self.groups.len();
        self.groups
            .push(ParticleGroup::new(id, self.max_groups, count));
        self.particles.reserve(count);
        self.particles
            .extend((0..count).map(|_| Particle::random(id, world, rng)));

        log::debug!("Added group {} with {} particles", id, count);
        Some(id)
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn particles_of(&self, group: usize) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter().filter(move |p| p.group == group)
    }

    pub fn max_groups(&self) -> usize {
        self.max_groups
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Scatter all particles again and stop them.
    pub fn respawn<R: Rng + ?Sized>(&mut self, world: &World, rng: &mut R) {
        for p in &mut self.particles {
            *p = Particle::random(p.group, world, rng);
        }
    }
}

impl Default for ParticleGroupsManager {
    fn default() -> Self {
        Self::new(MAX_GROUPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_add_group_assigns_sequential_ids() {
        let world = World::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = ParticleGroupsManager::default();

        assert_eq!(manager.add_group(10, &world, &mut rng), Some(0));
        assert_eq!(manager.add_group(5, &world, &mut rng), Some(1));
        assert_eq!(manager.len(), 15);
        assert_eq!(manager.particles_of(1).count(), 5);
        assert_eq!(manager.groups()[1].count, 5);
    }

    #[test]
    fn test_group_limit() {
        let world = World::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = ParticleGroupsManager::new(2);

        manager.add_group(1, &world, &mut rng);
        manager.add_group(1, &world, &mut rng);
        assert_eq!(manager.add_group(1, &world, &mut rng), None);
        assert_eq!(manager.groups().len(), 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_group_colors_follow_max_groups() {
        let world = World::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = ParticleGroupsManager::default();
        for _ in 0..4 {
            manager.add_group(1, &world, &mut rng);
        }
        let colors: Vec<_> = manager.groups().iter().map(|g| g.color).collect();
        assert_eq!(colors[0], particle_physics::Color::new(1.0, 0.0, 0.0));
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_respawn_resets_velocity() {
        let world = World::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut manager = ParticleGroupsManager::default();
        manager.add_group(20, &world, &mut rng);
        for p in manager.particles_mut() {
            p.velocity = Vec2::ONE;
        }
        manager.respawn(&world, &mut rng);
        assert!(manager.particles().iter().all(|p| p.velocity == Vec2::ZERO));
        assert!(manager.particles().iter().all(|p| p.group == 0));
    }
}
