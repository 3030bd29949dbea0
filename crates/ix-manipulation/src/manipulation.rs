//! Interactable manipulation
//!
//! [`InteractableManipulation`] listens to an interactable's trigger events
//! and moves, rotates and scales the owning object's transform.
//!
//! # Sessions
//!
//! The set of triggering interactors decides the mode:
//!
//! ```text
//! Idle (0) ──▶ Single (1) ──▶ Dual (2)
//!    ▲            │  ▲           │
//!    └────────────┘  └───────────┘
//! ```
//!
//! Whenever the set changes, the outgoing configuration receives its full
//! End event set, start values are recaptured, and the incoming configuration
//! receives its full Start event set. A session start never moves the object:
//! offsets are computed so the first solved frame reproduces the start pose.
//!
//! # Solving
//!
//! - Single, direct: the object is rigidly attached to the interactor pose.
//! - Single, indirect: the object rides the ray at its grab distance, with
//!   optional depth stretch.
//! - Dual: the midpoint and the line between both interactors define
//!   position and rotation; their distance drives uniform scale.

use std::sync::Arc;

use glam::{Quat, Vec3};
use ix_core::{
    Event, Interactable, InteractableId, Interactor, InteractorEvent, InteractorInputType,
    OneEuroFilterQuat, OneEuroFilterVec3, PropagationPhase, SceneObject, SharedInteractorSource,
    SharedTransform, SubscriptionId, TargetingMode, TransformSnapshot,
};
use parking_lot::Mutex;

use crate::config::{ConfigError, ManipulationConfig};
use crate::constants::{MIN_RAY_DISTANCE, MOBILE_DRAG_MULTIPLIER, STRETCH_SMOOTH_SPEED};
use crate::events::{ManipulationState, ScaleLimitEventArg, TransformEventArg};
use crate::solver::{
    approach, clamp_uniform_scale, constrain_rotation, dual_interactor_scale, look_rotation,
    project_to_rotation_plane, stretch_factor,
};

/// Shared manipulation handle
pub type SharedManipulation = Arc<Mutex<InteractableManipulation>>;

/// Manipulation errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ManipulationError {
    #[error("InteractableManipulation requires an Interactable on '{0}'")]
    MissingInteractable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, Default)]
struct FrameClock {
    index: u64,
    /// Seconds since attach
    time: f64,
    delta: f32,
    /// Clock time of the last filter reset
    filter_epoch: f64,
}

impl FrameClock {
    /// Filter sample time, relative to the last filter reset so it keeps
    /// frame resolution regardless of uptime
    fn filter_time(&self) -> f32 {
        (self.time - self.filter_epoch) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Update,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerChannel {
    InteractorStart,
    Update,
    InteractorEnd,
    Canceled,
}

fn is_indirect(interactor: &Interactor) -> bool {
    interactor
        .active_targeting_mode
        .intersects(TargetingMode::INDIRECT)
}

/// Translate/rotate/scale behavior driven by an interactable
pub struct InteractableManipulation {
    interactable: InteractableId,
    name: String,
    transform: SharedTransform,
    source: SharedInteractorSource,
    config: ManipulationConfig,
    enabled: bool,
    subscriptions: Vec<(TriggerChannel, SubscriptionId)>,

    interactors: Vec<Interactor>,
    session_indirect: Vec<bool>,
    needs_start_values: bool,
    clock: FrameClock,
    last_solved_frame: Option<u64>,

    original_world_transform: TransformSnapshot,
    original_local_transform: TransformSnapshot,
    start_transform: TransformSnapshot,

    offset_position: Vec3,
    offset_rotation: Quat,
    hit_point_to_transform: Vec3,
    start_ray_distance: f32,
    stretch_origin: Vec3,
    stretch_axis: Vec3,
    stretch: f32,
    mobile_stretch: f32,
    initial_interactor_distance: f32,
    initial_object_scale: Vec3,
    dual_up: Vec3,
    previous_flat_direction: Vec3,

    translate_filter: OneEuroFilterVec3,
    rotation_filter: OneEuroFilterQuat,
    scale_filter: OneEuroFilterVec3,

    pub on_manipulation_start: Event<TransformEventArg>,
    pub on_manipulation_update: Event<TransformEventArg>,
    pub on_manipulation_end: Event<TransformEventArg>,
    pub on_translation_start: Event<TransformEventArg>,
    pub on_translation_update: Event<TransformEventArg>,
    pub on_translation_end: Event<TransformEventArg>,
    pub on_rotation_start: Event<TransformEventArg>,
    pub on_rotation_update: Event<TransformEventArg>,
    pub on_rotation_end: Event<TransformEventArg>,
    /// Scale events fire for two-handed sessions only
    pub on_scale_start: Event<TransformEventArg>,
    pub on_scale_update: Event<TransformEventArg>,
    pub on_scale_end: Event<TransformEventArg>,
    pub on_scale_limit_reached: Event<ScaleLimitEventArg>,
}

impl std::fmt::Debug for InteractableManipulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractableManipulation")
            .field("interactable", &self.interactable)
            .field("name", &self.name)
            .field("state", &self.state())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl InteractableManipulation {
    /// Attach a manipulation to `object`, subscribing to its interactable.
    ///
    /// Fails if the object has no interactable or `config` is invalid.
    pub fn attach(
        object: &mut SceneObject,
        source: SharedInteractorSource,
        config: ManipulationConfig,
    ) -> Result<SharedManipulation, ManipulationError> {
        config.validate()?;
        let Some(interactable) = object.interactable.as_mut() else {
            return Err(ManipulationError::MissingInteractable(object.name.clone()));
        };

        let manipulation = Arc::new(Mutex::new(Self::new(
            interactable.id(),
            object.name.clone(),
            object.transform.clone(),
            source,
            config,
        )));
        let subscriptions = Self::subscribe(&manipulation, interactable);
        manipulation.lock().subscriptions = subscriptions;

        tracing::debug!("Manipulation attached to '{}'", object.name);
        Ok(manipulation)
    }

    fn new(
        interactable: InteractableId,
        name: String,
        transform: SharedTransform,
        source: SharedInteractorSource,
        config: ManipulationConfig,
    ) -> Self {
        let (world, local) = {
            let t = transform.lock();
            (TransformSnapshot::world(&*t), TransformSnapshot::local(&*t))
        };
        let filter = config.filter;

        Self {
            interactable,
            name,
            transform,
            source,
            config,
            enabled: true,
            subscriptions: Vec::new(),
            interactors: Vec::new(),
            session_indirect: Vec::new(),
            needs_start_values: false,
            clock: FrameClock::default(),
            last_solved_frame: None,
            original_world_transform: world,
            original_local_transform: local,
            start_transform: world,
            offset_position: Vec3::ZERO,
            offset_rotation: Quat::IDENTITY,
            hit_point_to_transform: Vec3::ZERO,
            start_ray_distance: 0.0,
            stretch_origin: Vec3::ZERO,
            stretch_axis: Vec3::NEG_Z,
            stretch: 0.0,
            mobile_stretch: 0.0,
            initial_interactor_distance: 0.0,
            initial_object_scale: local.scale,
            dual_up: Vec3::Y,
            previous_flat_direction: Vec3::ZERO,
            translate_filter: OneEuroFilterVec3::new(filter),
            rotation_filter: OneEuroFilterQuat::new(filter),
            scale_filter: OneEuroFilterVec3::new(filter),
            on_manipulation_start: Event::new(),
            on_manipulation_update: Event::new(),
            on_manipulation_end: Event::new(),
            on_translation_start: Event::new(),
            on_translation_update: Event::new(),
            on_translation_end: Event::new(),
            on_rotation_start: Event::new(),
            on_rotation_update: Event::new(),
            on_rotation_end: Event::new(),
            on_scale_start: Event::new(),
            on_scale_update: Event::new(),
            on_scale_end: Event::new(),
            on_scale_limit_reached: Event::new(),
        }
    }

    fn subscribe(
        manipulation: &SharedManipulation,
        interactable: &mut Interactable,
    ) -> Vec<(TriggerChannel, SubscriptionId)> {
        let m = manipulation.clone();
        let start = interactable
            .on_interactor_trigger_start
            .subscribe(move |e| m.lock().on_trigger_toggle(e));
        let m = manipulation.clone();
        let update = interactable
            .on_trigger_update
            .subscribe(move |e| m.lock().on_trigger_update(e));
        let m = manipulation.clone();
        let end = interactable
            .on_interactor_trigger_end
            .subscribe(move |e| m.lock().on_trigger_toggle(e));
        let m = manipulation.clone();
        let canceled = interactable
            .on_trigger_canceled
            .subscribe(move |e| m.lock().on_trigger_toggle(e));

        vec![
            (TriggerChannel::InteractorStart, start),
            (TriggerChannel::Update, update),
            (TriggerChannel::InteractorEnd, end),
            (TriggerChannel::Canceled, canceled),
        ]
    }

    /// Unsubscribe from `interactable`, ending any active session
    pub fn detach(&mut self, interactable: &mut Interactable) {
        self.end_session();
        for (channel, id) in self.subscriptions.drain(..) {
            let event = match channel {
                TriggerChannel::InteractorStart => &mut interactable.on_interactor_trigger_start,
                TriggerChannel::Update => &mut interactable.on_trigger_update,
                TriggerChannel::InteractorEnd => &mut interactable.on_interactor_trigger_end,
                TriggerChannel::Canceled => &mut interactable.on_trigger_canceled,
            };
            event.unsubscribe(id);
        }
    }

    // ============== Accessors ==============

    pub fn interactable_id(&self) -> InteractableId {
        self.interactable
    }

    /// Interactors driving the current session
    pub fn interactors(&self) -> &[Interactor] {
        &self.interactors
    }

    pub fn state(&self) -> ManipulationState {
        ManipulationState::from_count(self.interactors.len())
    }

    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    /// Replace the configuration. Filter parameters apply immediately.
    pub fn set_config(&mut self, config: ManipulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.translate_filter.set_config(config.filter);
        self.rotation_filter.set_config(config.filter);
        self.scale_filter.set_config(config.filter);
        self.config = config;
        Ok(())
    }

    /// World transform at the start of the current session
    pub fn start_transform(&self) -> &TransformSnapshot {
        &self.start_transform
    }

    /// World transform when the manipulation was attached
    pub fn original_world_transform(&self) -> &TransformSnapshot {
        &self.original_world_transform
    }

    /// Local transform when the manipulation was attached
    pub fn original_local_transform(&self) -> &TransformSnapshot {
        &self.original_local_transform
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable. Disabling ends the active session.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.end_session();
        }
        self.enabled = enabled;
    }

    /// Advance the frame clock. Call once per frame before dispatching
    /// interaction events; the transform is solved at most once per frame.
    pub fn tick(&mut self, delta_time: f32) {
        self.clock.index += 1;
        self.clock.delta = delta_time.max(0.0);
        self.clock.time += f64::from(self.clock.delta);
    }

    /// Restore the local transform captured at attach time
    pub fn reset_to_original(&mut self) {
        {
            let mut transform = self.transform.lock();
            transform.set_local_position(self.original_local_transform.position);
            transform.set_local_rotation(self.original_local_transform.rotation);
            transform.set_local_scale(self.original_local_transform.scale);
        }
        if self.state().is_active() {
            self.update_start_values();
        } else {
            self.reset_filters();
        }
    }

    // ============== Event handlers ==============

    fn accepts(&self, event: &InteractorEvent) -> bool {
        if !self.enabled || event.propagation_phase == PropagationPhase::TrickleDown {
            return false;
        }
        event.stop_propagation();
        true
    }

    fn on_trigger_toggle(&mut self, event: &InteractorEvent) {
        if self.accepts(event) {
            self.sync_interactors(event.triggering_interactor);
        }
    }

    fn on_trigger_update(&mut self, event: &InteractorEvent) {
        if !self.accepts(event) {
            return;
        }
        self.sync_interactors(event.triggering_interactor);

        if self.last_solved_frame == Some(self.clock.index) {
            return;
        }
        self.last_solved_frame = Some(self.clock.index);
        self.update_transform();
    }

    /// Refresh interactor snapshots; on a change of the interactor set, close
    /// the outgoing configuration and open the incoming one.
    fn sync_interactors(&mut self, triggering: InteractorInputType) {
        let next = if triggering.is_empty() {
            Vec::new()
        } else {
            self.source.lock().interactors_by_type(triggering)
        };

        let unchanged = next.len() == self.interactors.len()
            && next
                .iter()
                .zip(&self.interactors)
                .all(|(a, b)| a.input_type == b.input_type);
        if unchanged {
            self.interactors = next;
            return;
        }

        let outgoing = self.state();
        if outgoing.is_active() {
            self.publish(Phase::End, outgoing);
        }

        self.interactors = next;
        let incoming = self.state();
        match incoming {
            ManipulationState::Idle => {
                tracing::debug!("'{}' manipulation ended", self.name);
            }
            ManipulationState::Unsupported => {
                tracing::warn!(
                    "'{}' is triggered by {} interactors; manipulation supports one or two",
                    self.name,
                    self.interactors.len()
                );
            }
            ManipulationState::Single | ManipulationState::Dual => {
                tracing::debug!("'{}' manipulation {:?} started", self.name, incoming);
                self.update_start_values();
                self.publish(Phase::Start, incoming);
            }
        }
    }

    fn end_session(&mut self) {
        let state = self.state();
        if state.is_active() {
            self.publish(Phase::End, state);
        }
        self.interactors.clear();
        self.session_indirect.clear();
    }

    // ============== Session start ==============

    fn reset_filters(&mut self) {
        self.clock.filter_epoch = self.clock.time;
        self.translate_filter.reset();
        self.rotation_filter.reset();
        self.scale_filter.reset();
    }

    /// Capture the start transform and grab offsets for the current
    /// interactors. Returns `false` if an interactor lacks required data; the
    /// next update retries.
    fn update_start_values(&mut self) -> bool {
        self.reset_filters();
        {
            let transform = self.transform.lock();
            self.start_transform = TransformSnapshot::world(&*transform);
            self.initial_object_scale = transform.local_scale();
        }
        self.stretch = 0.0;
        self.mobile_stretch = 0.0;
        self.session_indirect = self.interactors.iter().map(is_indirect).collect();

        let interactors = self.interactors.clone();
        let valid = match interactors.as_slice() {
            [single] => self.start_single(single),
            [first, second] => self.start_dual(first, second),
            _ => true,
        };
        self.needs_start_values = !valid;
        valid
    }

    fn start_single(&mut self, interactor: &Interactor) -> bool {
        let Some(start_point) = interactor.start_point else {
            tracing::warn!(
                "'{}': {:?} has no start point, cannot start manipulation",
                self.name,
                interactor.input_type
            );
            return false;
        };

        if is_indirect(interactor) {
            let Some(direction) = interactor.direction.and_then(Vec3::try_normalize) else {
                tracing::warn!(
                    "'{}': {:?} has no ray direction, cannot start manipulation",
                    self.name,
                    interactor.input_type
                );
                return false;
            };
            let distance = interactor
                .distance_to_target
                .unwrap_or_else(|| (self.start_transform.position - start_point).dot(direction))
                .max(MIN_RAY_DISTANCE);
            let ray_position = start_point + direction * distance;

            self.start_ray_distance = distance;
            self.hit_point_to_transform = self.start_transform.position - ray_position;
            self.stretch_origin = start_point;
            self.stretch_axis = direction;
        } else {
            let Some(orientation) = interactor.orientation else {
                tracing::warn!(
                    "'{}': {:?} has no orientation, cannot start manipulation",
                    self.name,
                    interactor.input_type
                );
                return false;
            };
            self.offset_position = self.start_transform.position - start_point;
            self.offset_rotation = orientation.inverse() * self.start_transform.rotation;
        }
        true
    }

    fn start_dual(&mut self, first: &Interactor, second: &Interactor) -> bool {
        let (Some(p1), Some(p2)) = (first.start_point, second.start_point) else {
            tracing::warn!(
                "'{}': both interactors need a start point for two-handed manipulation",
                self.name
            );
            return false;
        };

        self.dual_up = Vec3::Y;
        self.previous_flat_direction = Vec3::ZERO;
        let Some(basis) = self.dual_basis(p1, p2) else {
            tracing::warn!("'{}': interactors coincide, cannot build a basis", self.name);
            return false;
        };

        self.offset_rotation = basis.inverse() * self.start_transform.rotation;
        self.offset_position = self.start_transform.position - (p1 + p2) * 0.5;
        self.initial_interactor_distance = p1.distance(p2);
        true
    }

    /// Basis rotation looking from the first interactor to the second
    fn dual_basis(&mut self, p1: Vec3, p2: Vec3) -> Option<Quat> {
        let axis = self.config.rotation_axis;
        let a = project_to_rotation_plane(p1, axis);
        let b = project_to_rotation_plane(p2, axis);
        let direction = (b - a).try_normalize()?;

        let up = match axis.axis() {
            Some(axis) => axis,
            None => {
                // Crossing the vertical flips the horizontal heading; flip
                // `up` with it so the basis stays continuous.
                let flat = Vec3::new(direction.x, 0.0, direction.z);
                if let Some(flat) = flat.try_normalize() {
                    if flat.dot(self.previous_flat_direction) < 0.0 {
                        self.dual_up = -self.dual_up;
                    }
                    self.previous_flat_direction = flat;
                }
                self.dual_up
            }
        };
        look_rotation(direction, up)
    }

    // ============== Per-frame solve ==============

    fn update_transform(&mut self) {
        if self.needs_start_values && !self.update_start_values() {
            return;
        }
        let indirect: Vec<bool> = self.interactors.iter().map(is_indirect).collect();
        if indirect != self.session_indirect {
            tracing::debug!("'{}' targeting mode changed, re-anchoring", self.name);
            if !self.update_start_values() {
                return;
            }
        }

        let state = self.state();
        let interactors = self.interactors.clone();
        let solved = match interactors.as_slice() {
            [] => false,
            [single] => self.single_interactor_transform(single),
            [first, second] => self.dual_interactors_transform(first, second),
            _ => {
                tracing::warn!(
                    "'{}': {} interactors, skipping update",
                    self.name,
                    interactors.len()
                );
                false
            }
        };
        if solved {
            self.publish(Phase::Update, state);
        }
    }

    /// Rotation from the start pose to `target`, restricted to the
    /// configured axis
    fn rotation_delta(&self, target: Quat) -> Quat {
        constrain_rotation(
            (target * self.start_transform.rotation.inverse()).normalize(),
            self.config.rotation_axis,
        )
    }

    fn single_interactor_transform(&mut self, interactor: &Interactor) -> bool {
        let Some(start_point) = interactor.start_point else {
            tracing::error!(
                "'{}': {:?} lost its start point",
                self.name,
                interactor.input_type
            );
            return false;
        };

        if is_indirect(interactor) {
            let Some(direction) = interactor.direction.and_then(Vec3::try_normalize) else {
                tracing::error!(
                    "'{}': {:?} lost its ray direction",
                    self.name,
                    interactor.input_type
                );
                return false;
            };
            if self.config.enable_translation {
                let distance = self.ray_distance(interactor, start_point);
                let position = start_point + direction * distance + self.hit_point_to_transform;
                self.apply_position(position);
            }
            return true;
        }

        let Some(orientation) = interactor.orientation else {
            tracing::error!(
                "'{}': {:?} lost its orientation",
                self.name,
                interactor.input_type
            );
            return false;
        };
        let delta = self.rotation_delta(orientation * self.offset_rotation);

        if self.config.enable_rotation {
            self.apply_rotation(delta * self.start_transform.rotation);
        }
        if self.config.enable_translation {
            let offset = if self.config.enable_rotation {
                delta * self.offset_position
            } else {
                self.offset_position
            };
            self.apply_position(start_point + offset);
        }
        true
    }

    /// Distance along the ray for indirect manipulation, including stretch
    fn ray_distance(&mut self, interactor: &Interactor, start_point: Vec3) -> f32 {
        let base = self.start_ray_distance;
        let max_distance = interactor.max_raycast_distance.max(MIN_RAY_DISTANCE);

        let target = if self.config.enable_stretch_z {
            let depth = (start_point - self.stretch_origin).dot(self.stretch_axis);
            let factor = stretch_factor(
                base + self.stretch,
                interactor.max_raycast_distance,
                self.config.z_stretch_factor_min,
                self.config.z_stretch_factor_max,
            );
            // The ray origin already moves with the hand; stretch adds the rest
            depth * (factor - 1.0)
        } else {
            0.0
        };
        self.stretch = approach(self.stretch, target, STRETCH_SMOOTH_SPEED, self.clock.delta);

        if interactor.input_type == InteractorInputType::MOBILE {
            if let Some(drag) = interactor.touchpad_drag {
                self.mobile_stretch += drag.y * MOBILE_DRAG_MULTIPLIER;
            }
            let low = MIN_RAY_DISTANCE - base - self.stretch;
            let high = max_distance - base - self.stretch;
            self.mobile_stretch = self.mobile_stretch.clamp(low, high);
        }

        (base + self.stretch + self.mobile_stretch).clamp(MIN_RAY_DISTANCE, max_distance)
    }

    fn dual_interactors_transform(&mut self, first: &Interactor, second: &Interactor) -> bool {
        let (Some(p1), Some(p2)) = (first.start_point, second.start_point) else {
            tracing::error!("'{}': an interactor lost its start point", self.name);
            return false;
        };
        let Some(basis) = self.dual_basis(p1, p2) else {
            tracing::warn!("'{}': interactors coincide, holding transform", self.name);
            return false;
        };
        let delta = self.rotation_delta(basis * self.offset_rotation);

        if self.config.enable_rotation {
            self.apply_rotation(delta * self.start_transform.rotation);
        }
        if self.config.enable_translation {
            let center = (p1 + p2) * 0.5;
            let offset = if self.config.enable_rotation {
                delta * self.offset_position
            } else {
                self.offset_position
            };
            self.apply_position(center + offset);
        }
        if self.config.enable_scale {
            let requested = dual_interactor_scale(
                self.initial_object_scale,
                self.initial_interactor_distance,
                p1.distance(p2),
            );
            let original = self.original_local_transform.scale.abs();
            let (clamped, limit) = clamp_uniform_scale(
                requested,
                original * self.config.minimum_scale_factor,
                original * self.config.maximum_scale_factor,
            );
            if let Some(limit) = limit {
                self.on_scale_limit_reached.publish(&ScaleLimitEventArg {
                    interactable: self.interactable,
                    limit,
                    requested,
                    clamped,
                });
            }
            self.apply_scale(clamped);
        }
        true
    }

    // ============== Output ==============

    fn apply_position(&mut self, position: Vec3) {
        let mut transform = self.transform.lock();
        let current = transform.world_position();
        let mut position = position;
        if !self.config.enable_x_translation {
            position.x = current.x;
        }
        if !self.config.enable_y_translation {
            position.y = current.y;
        }
        if !self.config.enable_z_translation {
            position.z = current.z;
        }
        let position = if self.config.use_filter {
            self.translate_filter.filter(position, self.clock.filter_time())
        } else {
            position
        };
        transform.set_world_position(position);
    }

    fn apply_rotation(&mut self, rotation: Quat) {
        let rotation = if self.config.use_filter {
            self.rotation_filter.filter(rotation, self.clock.filter_time())
        } else {
            rotation
        };
        self.transform.lock().set_world_rotation(rotation);
    }

    fn apply_scale(&mut self, scale: Vec3) {
        let scale = if self.config.use_filter {
            self.scale_filter.filter(scale, self.clock.filter_time())
        } else {
            scale
        };
        self.transform.lock().set_local_scale(scale);
    }

    fn publish(&mut self, phase: Phase, state: ManipulationState) {
        let interactors = self
            .interactors
            .iter()
            .fold(InteractorInputType::NONE, |mask, i| mask | i.input_type);
        let arg = TransformEventArg {
            interactable: self.interactable,
            interactors,
            state,
            start_transform: self.start_transform,
            current_transform: TransformSnapshot::world(&*self.transform.lock()),
        };

        let translation = self.config.enable_translation;
        let rotation = self.config.enable_rotation;
        let scale = self.config.enable_scale && state == ManipulationState::Dual;

        match phase {
            Phase::Start => {
                self.on_manipulation_start.publish(&arg);
                if translation {
                    self.on_translation_start.publish(&arg);
                }
                if rotation {
                    self.on_rotation_start.publish(&arg);
                }
                if scale {
                    self.on_scale_start.publish(&arg);
                }
            }
            Phase::Update => {
                if translation {
                    self.on_translation_update.publish(&arg);
                }
                if rotation {
                    self.on_rotation_update.publish(&arg);
                }
                if scale {
                    self.on_scale_update.publish(&arg);
                }
                self.on_manipulation_update.publish(&arg);
            }
            Phase::End => {
                if translation {
                    self.on_translation_end.publish(&arg);
                }
                if rotation {
                    self.on_rotation_end.publish(&arg);
                }
                if scale {
                    self.on_scale_end.publish(&arg);
                }
                self.on_manipulation_end.publish(&arg);
            }
        }
    }
}
