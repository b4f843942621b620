//! Default values for the particle-life model
//!
//! Distances are in world units, which map 1:1 to window pixels.

/// Side length of the default (square) world
pub const DEFAULT_WORLD_SIZE: f32 = 500.0;

/// Maximum number of particle groups (also the hue divisor for group colors)
pub const MAX_GROUPS: usize = 4;

/// Particles spawned per group in the reference scenario
pub const PARTICLES_PER_GROUP: usize = 500;

/// Default interaction radius
pub const DEFAULT_R_MAX: u32 = 100;

/// Default inner repulsion zone, as a fraction of `r_max`
pub const DEFAULT_BETA: f32 = 0.3;

/// Time scale applied on top of the frame delta
pub const DEFAULT_DELTA_T: f32 = 0.2;

/// Time for velocity to halve due to friction
pub const DEFAULT_FRICTION_HALF_TIME: f32 = 0.25;

/// Global scale on the attraction matrix
pub const DEFAULT_FORCE_MULTIPLIER: f32 = 0.1;

/// Rendered particle radius in pixels
pub const PARTICLE_RADIUS: f32 = 2.0;

/// Color for the wrapped copies drawn around the world, as displayed (sRGB)
pub const GHOST_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
