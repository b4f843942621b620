//! # Particle Life
//!
//! Windowed particle-life simulation: coloured groups of particles that
//! attract and repel each other on a wrapping world.

pub mod config;
pub mod error;
pub mod graphics;
pub mod gui;
pub mod launcher;
pub mod simulation;

pub use config::{AppConfig, ConfigError, WindowConfig};
pub use error::LaunchError;
pub use launcher::{launch, ApplicationListener, Frame};
pub use simulation::Simulation;
