//! Particles and the groups they belong to

use glam::Vec2;
use rand::Rng;

use crate::color::Color;
use crate::world::World;

/// Point particle. `group` indexes the attraction matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub group: usize,
}

impl Particle {
    pub fn new(position: Vec2, group: usize) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            group,
        }
    }

    /// At rest, uniformly placed somewhere in `world`.
    pub fn random<R: Rng + ?Sized>(group: usize, world: &World, rng: &mut R) -> Self {
        let position = Vec2::new(
            rng.random::<f32>() * world.width,
            rng.random::<f32>() * world.height,
        );
        Self::new(position, group)
    }

    /// Blend accumulated force into velocity.
    ///
    /// `friction` is the fraction of velocity kept over this step.
    pub fn apply_force(&mut self, force: Vec2, friction: f32, r_max: f32, dt: f32) {
        self.velocity = self.velocity * friction + force * r_max * dt;
    }

    /// Advance by the current velocity, wrapping around the world edges.
    pub fn advance(&mut self, dt: f32, world: &World) {
        self.position = world.wrap(self.position + self.velocity * dt);
    }
}

/// A particle species
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleGroup {
    pub id: usize,
    pub color: Color,
    pub count: usize,
}

impl ParticleGroup {
    pub fn new(id: usize, max_groups: usize, count: usize) -> Self {
        Self {
            id,
            color: Color::from_id(id, max_groups),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_particle_inside_world() {
        let world = World::new(300.0, 200.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = Particle::random(2, &world, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x < 300.0);
            assert!(p.position.y >= 0.0 && p.position.y < 200.0);
            assert_eq!(p.velocity, Vec2::ZERO);
            assert_eq!(p.group, 2);
        }
    }

    #[test]
    fn test_apply_force_with_friction() {
        let mut p = Particle::new(Vec2::ZERO, 0);
        p.velocity = Vec2::new(4.0, 0.0);
        p.apply_force(Vec2::new(0.0, 1.0), 0.5, 10.0, 0.1);
        assert_eq!(p.velocity, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_advance_wraps() {
        let world = World::new(100.0, 100.0);
        let mut p = Particle::new(Vec2::new(95.0, 2.0), 0);
        p.velocity = Vec2::new(10.0, -10.0);
        p.advance(1.0, &world);
        assert_eq!(p.position, Vec2::new(5.0, 92.0));
    }
}
