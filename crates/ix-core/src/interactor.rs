//! Interactor snapshots and the input source they come from
//!
//! An interactor is a hand, controller or pointer. The tracking provider
//! refreshes one snapshot per interactor every frame; interaction components
//! only ever read them.

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_RAYCAST_DISTANCE;
use crate::flags::flag_set;

flag_set! {
    /// Input source bitmask. A single interactor carries exactly one bit;
    /// interactables accumulate several.
    pub struct InteractorInputType: u32 {
        const NONE = 0;
        const LEFT_HAND = 1 << 0;
        const RIGHT_HAND = 1 << 1;
        const MOUSE = 1 << 2;
        const MOBILE = 1 << 3;
        const BOTH_HANDS = (1 << 0) | (1 << 1);
        const ALL = (1 << 0) | (1 << 1) | (1 << 2) | (1 << 3);
    }
}

flag_set! {
    /// Targeting mode bitmask
    pub struct TargetingMode: u32 {
        const NONE = 0;
        /// Physical proximity / touch
        const DIRECT = 1 << 0;
        /// Ray cast from a distance
        const INDIRECT = 1 << 1;
        /// Finger poke
        const POKE = 1 << 2;
        const ALL = (1 << 0) | (1 << 1) | (1 << 2);
    }
}

/// What kind of trigger an interactor is currently holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractorTriggerType {
    #[default]
    None,
    Pinch,
    Poke,
    Select,
}

impl InteractorTriggerType {
    /// True for any trigger other than `None`
    pub fn is_active(self) -> bool {
        self != Self::None
    }
}

/// Per-frame interactor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactor {
    pub input_type: InteractorInputType,
    pub active_targeting_mode: TargetingMode,
    /// Ray origin / fingertip position, `None` when not tracked
    pub start_point: Option<Vec3>,
    /// Ray direction (unit length)
    pub direction: Option<Vec3>,
    pub orientation: Option<Quat>,
    /// Distance along the ray to the current target
    pub distance_to_target: Option<f32>,
    pub max_raycast_distance: f32,
    pub current_trigger: InteractorTriggerType,
    pub current_drag_vector: Option<Vec3>,
    pub previous_drag_vector: Option<Vec3>,
    /// Touchpad delta for mobile input this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touchpad_drag: Option<Vec2>,
}

impl Interactor {
    /// Create an untracked interactor of the given type
    pub fn new(input_type: InteractorInputType) -> Self {
        Self {
            input_type,
            active_targeting_mode: TargetingMode::NONE,
            start_point: None,
            direction: None,
            orientation: None,
            distance_to_target: None,
            max_raycast_distance: DEFAULT_MAX_RAYCAST_DISTANCE,
            current_trigger: InteractorTriggerType::None,
            current_drag_vector: None,
            previous_drag_vector: None,
            touchpad_drag: None,
        }
    }

    /// Create a direct (near-field) interactor posed at `point`
    pub fn direct(input_type: InteractorInputType, point: Vec3, orientation: Quat) -> Self {
        Self {
            active_targeting_mode: TargetingMode::DIRECT,
            start_point: Some(point),
            direction: Some(orientation * Vec3::NEG_Z),
            orientation: Some(orientation),
            ..Self::new(input_type)
        }
    }

    /// Create an indirect (ray) interactor
    pub fn indirect(
        input_type: InteractorInputType,
        origin: Vec3,
        direction: Vec3,
        distance_to_target: f32,
    ) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            active_targeting_mode: TargetingMode::INDIRECT,
            start_point: Some(origin),
            direction: Some(direction),
            orientation: Some(Quat::from_rotation_arc(Vec3::NEG_Z, direction)),
            distance_to_target: Some(distance_to_target),
            ..Self::new(input_type)
        }
    }

    /// Set the trigger state
    pub fn with_trigger(mut self, trigger: InteractorTriggerType) -> Self {
        self.current_trigger = trigger;
        self
    }

    /// True when the interactor is holding a trigger
    pub fn is_triggering(&self) -> bool {
        self.current_trigger.is_active()
    }

    /// Point where the ray meets the target, if both are known
    pub fn ray_hit_point(&self) -> Option<Vec3> {
        Some(self.start_point? + self.direction? * self.distance_to_target?)
    }

    /// Advance the drag vectors by one frame: the current vector becomes the
    /// previous one.
    pub fn push_drag_vector(&mut self, drag: Option<Vec3>) {
        self.previous_drag_vector = self.current_drag_vector;
        self.current_drag_vector = drag;
    }
}

/// Source of interactor snapshots, implemented by the tracking provider.
pub trait InteractorSource {
    /// All current interactors whose input type is in `mask`, lowest bit first.
    fn interactors_by_type(&self, mask: InteractorInputType) -> Vec<Interactor>;

    /// A single interactor by its exact input type
    fn interactor(&self, input_type: InteractorInputType) -> Option<Interactor> {
        self.interactors_by_type(input_type)
            .into_iter()
            .find(|i| i.input_type == input_type)
    }
}

/// Shared interactor source handle
pub type SharedInteractorSource = Arc<Mutex<dyn InteractorSource + Send>>;

/// Interactor errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum InteractorError {
    #[error("Interactor must carry exactly one input type bit: {0:?}")]
    NotSingleType(InteractorInputType),
}

/// In-memory interactor source keyed by input type.
///
/// Hosts write the latest snapshots each frame; components read them through
/// [`InteractorSource`].
#[derive(Debug, Clone, Default)]
pub struct InteractorPool {
    interactors: BTreeMap<u32, Interactor>,
}

impl InteractorPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the snapshot for the interactor's input type
    pub fn set(&mut self, interactor: Interactor) -> Result<(), InteractorError> {
        if !interactor.input_type.is_single() {
            return Err(InteractorError::NotSingleType(interactor.input_type));
        }
        self.interactors
            .insert(interactor.input_type.bits(), interactor);
        Ok(())
    }

    /// Remove an interactor (tracking lost)
    pub fn remove(&mut self, input_type: InteractorInputType) -> Option<Interactor> {
        self.interactors.remove(&input_type.bits())
    }

    /// Get a snapshot
    pub fn get(&self, input_type: InteractorInputType) -> Option<&Interactor> {
        self.interactors.get(&input_type.bits())
    }

    /// Get a mutable snapshot
    pub fn get_mut(&mut self, input_type: InteractorInputType) -> Option<&mut Interactor> {
        self.interactors.get_mut(&input_type.bits())
    }

    /// Number of interactors in the pool
    pub fn len(&self) -> usize {
        self.interactors.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.interactors.is_empty()
    }

    /// All interactors, lowest bit first
    pub fn iter(&self) -> impl Iterator<Item = &Interactor> {
        self.interactors.values()
    }
}

impl InteractorSource for InteractorPool {
    fn interactors_by_type(&self, mask: InteractorInputType) -> Vec<Interactor> {
        self.interactors
            .values()
            .filter(|i| mask.intersects(i.input_type))
            .cloned()
            .collect()
    }
}
