//! # Particle Renderer
//!
//! Draws the particle-life world as instanced discs, tiled so the toroidal
//! wrap is visible around the edges.

pub mod camera;
pub mod instance;
pub mod renderer;

pub use camera::*;
pub use instance::*;
pub use renderer::*;
