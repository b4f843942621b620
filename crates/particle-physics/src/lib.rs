//! # Particle Life Physics
//!
//! Core model for particle life: a toroidal world, coloured particle groups,
//! an asymmetric attraction matrix and the pairwise force kernel.

pub mod color;
pub mod constants;
pub mod error;
pub mod forces;
pub mod matrix;
pub mod particle;
pub mod world;

pub use color::*;
pub use constants::*;
pub use error::*;
pub use forces::*;
pub use matrix::*;
pub use particle::*;
pub use world::*;
