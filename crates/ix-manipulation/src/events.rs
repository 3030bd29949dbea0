//! Manipulation event payloads

use ix_core::{InteractableId, InteractorInputType, TransformSnapshot};
use serde::{Deserialize, Serialize};

/// Number of interactors driving a manipulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManipulationState {
    Idle,
    /// One interactor: translate and rotate
    Single,
    /// Two interactors: translate, rotate and scale
    Dual,
    /// More interactors than the solver supports; updates are skipped
    Unsupported,
}

impl ManipulationState {
    /// State for a given interactor count
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ManipulationState::Idle,
            1 => ManipulationState::Single,
            2 => ManipulationState::Dual,
            _ => ManipulationState::Unsupported,
        }
    }

    /// True for the states that drive the transform
    pub fn is_active(self) -> bool {
        matches!(self, ManipulationState::Single | ManipulationState::Dual)
    }
}

/// Payload of translation, rotation, scale and manipulation events
#[derive(Debug, Clone, PartialEq)]
pub struct TransformEventArg {
    pub interactable: InteractableId,
    /// Interactor types of the configuration the event belongs to
    pub interactors: InteractorInputType,
    pub state: ManipulationState,
    /// World transform when the configuration started
    pub start_transform: TransformSnapshot,
    /// World transform now
    pub current_transform: TransformSnapshot,
}

/// Which scale bound was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleLimit {
    Minimum,
    Maximum,
}

/// Payload of the scale-limit event
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleLimitEventArg {
    pub interactable: InteractableId,
    pub limit: ScaleLimit,
    /// Scale the solver asked for
    pub requested: glam::Vec3,
    /// Scale applied after clamping
    pub clamped: glam::Vec3,
}
