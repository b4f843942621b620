use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhysicsError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("group {group} is out of range for a {size}x{size} attraction matrix")]
    GroupOutOfRange { group: usize, size: usize },
}
