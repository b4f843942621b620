//! # Particle Life Simulation
//!
//! CPU engines that step a [`ParticleSystem`] forward: all-pairs (single and
//! multi-threaded) and grid-accelerated variants.

pub mod brute_force;
pub mod chunked;
pub mod engine;
pub mod error;
pub mod factory;
pub mod grid;
pub mod groups;
pub mod parallel;
pub mod params;
pub mod system;

pub use brute_force::*;
pub use chunked::*;
pub use engine::{EngineKind, PhysicsEngine};
pub use error::*;
pub use factory::*;
pub use grid::*;
pub use groups::*;
pub use params::*;
pub use system::*;
