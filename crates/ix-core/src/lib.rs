//! Interaction toolkit core
//!
//! This crate contains the building blocks shared by interaction behaviors:
//! - Interactor: per-frame hand / controller / pointer snapshots
//! - Interactable: hover/trigger/drag state machine with bitmask arbitration
//! - Event: typed publish/subscribe channels
//! - Dispatch: target and bubble-up propagation through a hierarchy
//! - Transform: scene-graph seam and snapshots
//! - Filter: one-euro smoothing for vectors and rotations

pub mod constants;
pub mod dispatch;
pub mod event;
pub mod filter;
mod flags;
pub mod interactable;
pub mod interactor;
pub mod registry;
pub mod scene;
pub mod transform;

pub use constants::*;
pub use dispatch::*;
pub use event::*;
pub use filter::*;
pub use interactable::*;
pub use interactor::*;
pub use registry::*;
pub use scene::*;
pub use transform::*;
