use particle_physics::PhysicsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("unknown engine '{0}', expected one of: sequential, parallel, chunked, chunked-cached")]
    UnknownEngine(String),

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
