//! Simulation errors

use ix_core::InteractorError;
use ix_manipulation::{ConfigError, ManipulationError};

/// Errors from loading scripts or running a session
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid script: {0}")]
    Script(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Manipulation(#[from] ManipulationError),
    #[error(transparent)]
    Interactor(#[from] InteractorError),
}
