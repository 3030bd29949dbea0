//! Interactable hover/trigger/drag state machine
//!
//! An [`Interactable`] tracks which interactor types are hovering and
//! triggering it as two bitmasks. Aggregate events fire once per
//! empty/non-empty transition of a mask; per-interactor events fire for every
//! individual enter and exit. Drag is derived from the interactor's drag
//! vectors on each trigger event and never stored.

use std::cell::Cell;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::event::Event;
use crate::flags::flag_set;
use crate::interactor::{Interactor, InteractorInputType, TargetingMode};
use crate::registry::{InteractableId, SharedRegistry};

flag_set! {
    /// Acceptable poke travel directions along the local X axis
    pub struct PokeXDirection: u8 {
        const NONE = 0;
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const ALL = (1 << 0) | (1 << 1);
    }
}

flag_set! {
    /// Acceptable poke travel directions along the local Y axis
    pub struct PokeYDirection: u8 {
        const NONE = 0;
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const ALL = (1 << 0) | (1 << 1);
    }
}

flag_set! {
    /// Acceptable poke travel directions along the local Z axis.
    /// `FORWARD` is travel toward local -Z.
    pub struct PokeZDirection: u8 {
        const NONE = 0;
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const ALL = (1 << 0) | (1 << 1);
    }
}

/// Where an event is in its trip through the interactable hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropagationPhase {
    TrickleDown,
    #[default]
    Target,
    BubbleUp,
}

/// Payload of every hover, trigger and drag event
#[derive(Debug, Clone)]
pub struct InteractorEvent {
    pub interactor: Interactor,
    pub propagation_phase: PropagationPhase,
    /// Interactable currently handling the event
    pub target: Option<InteractableId>,
    /// Hover mask of the target after the state update
    pub hovering_interactor: InteractorInputType,
    /// Trigger mask of the target after the state update
    pub triggering_interactor: InteractorInputType,
    /// Drag delta, filled for drag events only
    pub drag_vector: Option<Vec3>,
    stopped: Cell<bool>,
}

impl InteractorEvent {
    /// Create an event for `interactor` in the target phase
    pub fn new(interactor: Interactor) -> Self {
        Self {
            interactor,
            propagation_phase: PropagationPhase::Target,
            target: None,
            hovering_interactor: InteractorInputType::NONE,
            triggering_interactor: InteractorInputType::NONE,
            drag_vector: None,
            stopped: Cell::new(false),
        }
    }

    /// Set the propagation phase
    pub fn with_phase(mut self, phase: PropagationPhase) -> Self {
        self.propagation_phase = phase;
        self
    }

    /// Prevent the event from reaching further interactables up the hierarchy
    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    /// True once a subscriber called [`Self::stop_propagation`]
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Interaction entry points, for dispatchers that route by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    HoverEnter,
    HoverUpdate,
    HoverExit,
    TriggerStart,
    TriggerUpdate,
    TriggerEnd,
    TriggerCanceled,
}

/// Interactable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractableConfig {
    /// Targeting modes this interactable responds to
    pub targeting_mode: TargetingMode,
    /// Whether several interactor types may trigger at once
    pub allow_multiple_interactors: bool,
    /// Restrict poke to the acceptable directions below
    pub enable_poke_directionality: bool,
    pub acceptable_x_directions: PokeXDirection,
    pub acceptable_y_directions: PokeYDirection,
    pub acceptable_z_directions: PokeZDirection,
}

impl Default for InteractableConfig {
    fn default() -> Self {
        Self {
            targeting_mode: TargetingMode::DIRECT | TargetingMode::INDIRECT,
            allow_multiple_interactors: true,
            enable_poke_directionality: false,
            acceptable_x_directions: PokeXDirection::ALL,
            acceptable_y_directions: PokeYDirection::ALL,
            acceptable_z_directions: PokeZDirection::ALL,
        }
    }
}

/// A collision volume owned by an interactable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub name: String,
    pub enabled: bool,
}

impl Collider {
    /// Create an enabled collider
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }
}

/// Hover/trigger/drag state machine for one scene object
pub struct Interactable {
    id: InteractableId,
    name: String,
    config: InteractableConfig,
    hovering_interactor: InteractorInputType,
    triggering_interactor: InteractorInputType,
    colliders: Vec<Collider>,
    enabled: bool,
    registry: Option<SharedRegistry>,
    registered: bool,

    /// First interactor started hovering
    pub on_hover_enter: Event<InteractorEvent>,
    pub on_hover_update: Event<InteractorEvent>,
    /// Last interactor stopped hovering
    pub on_hover_exit: Event<InteractorEvent>,
    pub on_interactor_hover_enter: Event<InteractorEvent>,
    pub on_interactor_hover_exit: Event<InteractorEvent>,

    /// First interactor started triggering
    pub on_trigger_start: Event<InteractorEvent>,
    pub on_trigger_update: Event<InteractorEvent>,
    /// Last interactor stopped triggering
    pub on_trigger_end: Event<InteractorEvent>,
    pub on_interactor_trigger_start: Event<InteractorEvent>,
    pub on_interactor_trigger_end: Event<InteractorEvent>,
    /// Triggering was forcibly reset (e.g. tracking lost)
    pub on_trigger_canceled: Event<InteractorEvent>,

    pub on_drag_start: Event<InteractorEvent>,
    pub on_drag_update: Event<InteractorEvent>,
    pub on_drag_end: Event<InteractorEvent>,
}

impl std::fmt::Debug for Interactable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactable")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hovering_interactor", &self.hovering_interactor)
            .field("triggering_interactor", &self.triggering_interactor)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Interactable {
    /// Create an interactable with the given configuration
    pub fn new(name: impl Into<String>, config: InteractableConfig) -> Self {
        Self {
            id: InteractableId::new(),
            name: name.into(),
            config,
            hovering_interactor: InteractorInputType::NONE,
            triggering_interactor: InteractorInputType::NONE,
            colliders: Vec::new(),
            enabled: true,
            registry: None,
            registered: false,
            on_hover_enter: Event::new(),
            on_hover_update: Event::new(),
            on_hover_exit: Event::new(),
            on_interactor_hover_enter: Event::new(),
            on_interactor_hover_exit: Event::new(),
            on_trigger_start: Event::new(),
            on_trigger_update: Event::new(),
            on_trigger_end: Event::new(),
            on_interactor_trigger_start: Event::new(),
            on_interactor_trigger_end: Event::new(),
            on_trigger_canceled: Event::new(),
            on_drag_start: Event::new(),
            on_drag_update: Event::new(),
            on_drag_end: Event::new(),
        }
    }

    /// Attach the registry this interactable announces itself to
    pub fn with_registry(mut self, registry: SharedRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Add a collider; it adopts the current enable state
    pub fn with_collider(mut self, mut collider: Collider) -> Self {
        collider.enabled = self.enabled;
        self.colliders.push(collider);
        self
    }

    pub fn id(&self) -> InteractableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &InteractableConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InteractableConfig) {
        self.config = config;
    }

    /// Interactor types currently hovering
    pub fn hovering_interactor(&self) -> InteractorInputType {
        self.hovering_interactor
    }

    /// Interactor types currently triggering
    pub fn triggering_interactor(&self) -> InteractorInputType {
        self.triggering_interactor
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True once registered with the registry
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Enable or disable the interactable; colliders follow
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        for collider in &mut self.colliders {
            collider.enabled = enabled;
        }
    }

    /// Per-frame update. Registers on the first active frame.
    pub fn tick(&mut self) {
        if !self.enabled || self.registered {
            return;
        }
        if let Some(registry) = &self.registry {
            registry.lock().register(self.id);
            self.registered = true;
            tracing::debug!("Interactable '{}' registered", self.name);
        }
    }

    /// Whether `mode` overlaps the configured targeting mask
    pub fn accepts_targeting_mode(&self, mode: TargetingMode) -> bool {
        self.config.targeting_mode.intersects(mode)
    }

    /// Whether `interactor` may start interacting with this interactable
    pub fn can_accept(&self, interactor: &Interactor) -> bool {
        if !self.enabled || !self.accepts_targeting_mode(interactor.active_targeting_mode) {
            return false;
        }
        if self.config.allow_multiple_interactors || self.triggering_interactor.is_empty() {
            return true;
        }
        self.triggering_interactor
            .contains(interactor.input_type)
    }

    /// Whether a poke travelling along `local_direction` is acceptable.
    ///
    /// The dominant axis of the direction decides which axis set applies.
    pub fn accepts_poke_direction(&self, local_direction: Vec3) -> bool {
        if !self.config.enable_poke_directionality {
            return true;
        }
        let abs = local_direction.abs();
        if abs.max_element() < EPSILON {
            return false;
        }
        if abs.x >= abs.y && abs.x >= abs.z {
            let dir = if local_direction.x > 0.0 {
                PokeXDirection::RIGHT
            } else {
                PokeXDirection::LEFT
            };
            self.config.acceptable_x_directions.contains(dir)
        } else if abs.y >= abs.z {
            let dir = if local_direction.y > 0.0 {
                PokeYDirection::UP
            } else {
                PokeYDirection::DOWN
            };
            self.config.acceptable_y_directions.contains(dir)
        } else {
            let dir = if local_direction.z > 0.0 {
                PokeZDirection::BACK
            } else {
                PokeZDirection::FORWARD
            };
            self.config.acceptable_z_directions.contains(dir)
        }
    }

    /// Route an event by kind
    pub fn handle(&mut self, kind: InteractionKind, args: &mut InteractorEvent) {
        match kind {
            InteractionKind::HoverEnter => self.hover_enter(args),
            InteractionKind::HoverUpdate => self.hover_update(args),
            InteractionKind::HoverExit => self.hover_exit(args),
            InteractionKind::TriggerStart => self.trigger_start(args),
            InteractionKind::TriggerUpdate => self.trigger_update(args),
            InteractionKind::TriggerEnd => self.trigger_end(args),
            InteractionKind::TriggerCanceled => self.trigger_canceled(args),
        }
    }

    // ============== Hover ==============

    pub fn hover_enter(&mut self, args: &mut InteractorEvent) {
        let was_idle = self.hovering_interactor.is_empty();
        self.hovering_interactor.insert(args.interactor.input_type);
        self.stamp(args);

        if was_idle {
            tracing::debug!("'{}' hover enter", self.name);
            self.on_hover_enter.publish(args);
        }
        self.on_interactor_hover_enter.publish(args);
    }

    pub fn hover_update(&mut self, args: &mut InteractorEvent) {
        // Late updates after the last exit are dropped
        if self.hovering_interactor.is_empty() {
            return;
        }
        self.stamp(args);
        self.on_hover_update.publish(args);
    }

    pub fn hover_exit(&mut self, args: &mut InteractorEvent) {
        self.hovering_interactor.remove(args.interactor.input_type);
        self.stamp(args);

        self.on_interactor_hover_exit.publish(args);
        if self.hovering_interactor.is_empty() {
            tracing::debug!("'{}' hover exit", self.name);
            self.on_hover_exit.publish(args);
        }
    }

    // ============== Trigger ==============

    pub fn trigger_start(&mut self, args: &mut InteractorEvent) {
        let was_idle = self.triggering_interactor.is_empty();
        self.triggering_interactor.insert(args.interactor.input_type);
        self.stamp(args);

        if was_idle {
            tracing::debug!("'{}' trigger start", self.name);
            self.on_trigger_start.publish(args);
        }
        self.on_interactor_trigger_start.publish(args);
    }

    pub fn trigger_update(&mut self, args: &mut InteractorEvent) {
        if self.triggering_interactor.is_empty() {
            return;
        }
        self.stamp(args);
        self.on_trigger_update.publish(args);

        if let Some(drag) = args.interactor.current_drag_vector {
            args.drag_vector = Some(drag);
            if args.interactor.previous_drag_vector.is_none() {
                self.on_drag_start.publish(args);
            } else {
                self.on_drag_update.publish(args);
            }
        }
    }

    pub fn trigger_end(&mut self, args: &mut InteractorEvent) {
        self.triggering_interactor.remove(args.interactor.input_type);
        self.stamp(args);

        self.on_interactor_trigger_end.publish(args);
        if self.triggering_interactor.is_empty() {
            tracing::debug!("'{}' trigger end", self.name);
            self.on_trigger_end.publish(args);
        }
        self.publish_drag_end(args);
    }

    /// Clears every triggering interactor, not only the caller's bit
    pub fn trigger_canceled(&mut self, args: &mut InteractorEvent) {
        self.triggering_interactor = InteractorInputType::NONE;
        self.stamp(args);

        tracing::debug!(
            "'{}' trigger canceled by {:?}",
            self.name,
            args.interactor.input_type
        );
        self.on_trigger_canceled.publish(args);
        self.publish_drag_end(args);
    }

    fn publish_drag_end(&mut self, args: &mut InteractorEvent) {
        if let Some(previous) = args.interactor.previous_drag_vector {
            args.drag_vector = Some(previous);
            self.on_drag_end.publish(args);
        }
    }

    fn stamp(&self, args: &mut InteractorEvent) {
        args.target = Some(self.id);
        args.hovering_interactor = self.hovering_interactor;
        args.triggering_interactor = self.triggering_interactor;
    }
}

impl Drop for Interactable {
    fn drop(&mut self) {
        if !self.registered {
            return;
        }
        if let Some(registry) = &self.registry {
            registry.lock().deregister(self.id);
        }
    }
}
