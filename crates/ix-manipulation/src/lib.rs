//! Object manipulation for the interaction toolkit
//!
//! This crate turns interactable trigger events into transform changes:
//! - Config: feature toggles, axis locks, scale bounds (RON loadable)
//! - Solver: look rotation, axis constraint, scale clamp, depth stretch
//! - Manipulation: one- and two-handed sessions with lifecycle events

pub mod config;
pub mod constants;
pub mod events;
pub mod manipulation;
pub mod solver;

pub use config::{ConfigError, ManipulationConfig, RotationAxis};
pub use events::{ManipulationState, ScaleLimit, ScaleLimitEventArg, TransformEventArg};
pub use manipulation::{InteractableManipulation, ManipulationError, SharedManipulation};
