//! Frame-loop runner
//!
//! Hosts one manipulable object ("cube") resting on an interactable parent
//! ("table"). Events are dispatched to the cube and bubble to the table.

use std::sync::Arc;

use glam::Vec3;
use ix_core::{
    Collider, Interactable, InteractableConfig, InteractionRegistry, Interactor, InteractorPool,
    SceneObject, SharedInteractorSource, SharedRegistry, TargetingMode, Transform,
    TransformSnapshot, dispatch_bubbling,
};
use ix_manipulation::{InteractableManipulation, ManipulationConfig, SharedManipulation};
use parking_lot::Mutex;

use crate::error::SimError;
use crate::script::{Script, ScriptStep};

/// Counters collected from manipulation events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub sessions: usize,
    pub updates: usize,
    pub scale_limits: usize,
    /// Events that reached the parent through bubbling
    pub bubbled: usize,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct SimReport {
    pub frames: usize,
    pub stats: SessionStats,
    pub final_transform: TransformSnapshot,
}

/// Single-object interaction host
pub struct Simulation {
    registry: Arc<Mutex<InteractionRegistry>>,
    pool: Arc<Mutex<InteractorPool>>,
    object: SceneObject,
    parent: Interactable,
    manipulation: SharedManipulation,
    stats: Arc<Mutex<SessionStats>>,
    delta_time: f32,
}

impl Simulation {
    /// Build the scene and attach a manipulation with `config`
    pub fn new(config: ManipulationConfig) -> Result<Self, SimError> {
        let registry = Arc::new(Mutex::new(InteractionRegistry::new()));
        let shared_registry: SharedRegistry = registry.clone();
        let pool = Arc::new(Mutex::new(InteractorPool::new()));
        let source: SharedInteractorSource = pool.clone();

        let cube = Interactable::new(
            "cube",
            InteractableConfig {
                targeting_mode: TargetingMode::ALL,
                ..Default::default()
            },
        )
        .with_registry(shared_registry.clone())
        .with_collider(Collider::new("cube_box"));
        let transform = Transform::from_position(Vec3::new(0.0, 0.0, -40.0)).into_shared();
        let mut object = SceneObject::new("cube", transform).with_interactable(cube);

        let manipulation = InteractableManipulation::attach(&mut object, source, config)?;

        let mut parent = Interactable::new("table", InteractableConfig::default())
            .with_registry(shared_registry);

        let stats = Arc::new(Mutex::new(SessionStats::default()));
        {
            let mut m = manipulation.lock();
            let s = stats.clone();
            m.on_manipulation_start.subscribe(move |e| {
                s.lock().sessions += 1;
                tracing::info!("Manipulation {:?} started by {:?}", e.state, e.interactors);
            });
            let s = stats.clone();
            m.on_manipulation_update
                .subscribe(move |_| s.lock().updates += 1);
            m.on_manipulation_end.subscribe(|e| {
                tracing::info!(
                    "Manipulation {:?} ended at {}",
                    e.state,
                    e.current_transform.position
                );
            });
            let s = stats.clone();
            m.on_scale_limit_reached.subscribe(move |e| {
                s.lock().scale_limits += 1;
                tracing::info!("Scale limit {:?} reached: {}", e.limit, e.clamped);
            });
        }

        let s = stats.clone();
        parent.on_interactor_hover_enter.subscribe(move |e| {
            s.lock().bubbled += 1;
            tracing::debug!(
                "'table' sees {:?} hovering a child ({:?})",
                e.interactor.input_type,
                e.propagation_phase
            );
        });
        let s = stats.clone();
        parent.on_interactor_trigger_start.subscribe(move |e| {
            s.lock().bubbled += 1;
            tracing::warn!(
                "'table' received a trigger from {:?}; the cube should have consumed it",
                e.interactor.input_type
            );
        });

        Ok(Self {
            registry,
            pool,
            object,
            parent,
            manipulation,
            stats,
            delta_time: 1.0 / 60.0,
        })
    }

    pub fn manipulation(&self) -> &SharedManipulation {
        &self.manipulation
    }

    /// Number of interactables registered so far
    pub fn registered(&self) -> usize {
        self.registry.lock().len()
    }

    /// Current world transform of the manipulated object
    pub fn transform(&self) -> TransformSnapshot {
        TransformSnapshot::world(&*self.object.transform.lock())
    }

    /// Advance one frame and apply `step`
    pub fn step(&mut self, step: &ScriptStep) -> Result<(), SimError> {
        self.manipulation.lock().tick(self.delta_time);
        self.object.tick();
        self.parent.tick();

        {
            let mut pool = self.pool.lock();
            for interactor in &step.interactors {
                pool.set(interactor.clone())?;
            }
            for lost in &step.lost {
                if pool.remove(*lost).is_none() {
                    tracing::warn!("Lost interactor {:?} was not tracked", lost);
                }
            }
        }

        for event in &step.events {
            let interactor = self
                .pool
                .lock()
                .get(event.input_type)
                .cloned()
                .unwrap_or_else(|| Interactor::new(event.input_type));
            let Some(target) = self.object.interactable.as_mut() else {
                return Err(SimError::Script(format!(
                    "'{}' has no interactable",
                    self.object.name
                )));
            };
            dispatch_bubbling(&mut [target, &mut self.parent], event.kind, &interactor);
        }
        Ok(())
    }

    /// Run every step of `script`
    pub fn run(&mut self, script: &Script) -> Result<SimReport, SimError> {
        tracing::info!("Running '{}' ({} frames)", script.name, script.steps.len());
        self.delta_time = script.delta_time;
        for step in &script.steps {
            self.step(step)?;
        }
        Ok(SimReport {
            frames: script.steps.len(),
            stats: self.stats.lock().clone(),
            final_transform: self.transform(),
        })
    }
}
