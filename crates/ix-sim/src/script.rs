//! Scripted interaction sessions
//!
//! A script is a list of frames. Each frame writes interactor snapshots into
//! the pool, drops lost interactors, then dispatches interaction events in
//! order. Scripts are stored as RON.

use std::path::Path;

use glam::{Quat, Vec3};
use ix_core::{InteractionKind, Interactor, InteractorInputType};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// One interaction routed to the target object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub kind: InteractionKind,
    pub input_type: InteractorInputType,
}

impl ScriptEvent {
    pub fn new(kind: InteractionKind, input_type: InteractorInputType) -> Self {
        Self { kind, input_type }
    }
}

/// One frame of input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    /// Snapshots written to the pool before dispatch
    pub interactors: Vec<Interactor>,
    /// Interactors whose tracking was lost this frame
    pub lost: Vec<InteractorInputType>,
    pub events: Vec<ScriptEvent>,
}

/// A complete scripted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub name: String,
    /// Frame duration in seconds
    pub delta_time: f32,
    pub steps: Vec<ScriptStep>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            delta_time: 1.0 / 60.0,
            steps: Vec::new(),
        }
    }
}

impl Script {
    /// Parse a RON script
    pub fn from_ron_str(content: &str) -> Result<Self, SimError> {
        let script: Script =
            ron::from_str(content).map_err(|e| SimError::Deserialize(e.to_string()))?;
        if !(script.delta_time.is_finite() && script.delta_time > 0.0) {
            return Err(SimError::Script(format!(
                "delta_time must be positive, got {}",
                script.delta_time
            )));
        }
        Ok(script)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, SimError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SimError::Serialize(e.to_string()))
    }

    /// Load a script from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SimError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save the script to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SimError::Io(e.to_string()))
    }

    /// Built-in session: grab with the left hand and lift, add the right
    /// hand, spread and turn both, then release.
    pub fn two_hand_demo() -> Self {
        const LEFT: InteractorInputType = InteractorInputType::LEFT_HAND;
        const RIGHT: InteractorInputType = InteractorInputType::RIGHT_HAND;
        let center = Vec3::new(0.0, 0.0, -40.0);
        let hand = |input_type, point| Interactor::direct(input_type, point, Quat::IDENTITY);

        let mut steps = Vec::new();
        let left_start = center - Vec3::X * 10.0;
        let right_start = center + Vec3::X * 10.0;

        steps.push(ScriptStep {
            interactors: vec![hand(LEFT, left_start), hand(RIGHT, right_start)],
            events: vec![
                ScriptEvent::new(InteractionKind::HoverEnter, LEFT),
                ScriptEvent::new(InteractionKind::TriggerStart, LEFT),
                ScriptEvent::new(InteractionKind::TriggerUpdate, LEFT),
            ],
            ..Default::default()
        });

        // Lift 10 cm with one hand
        let lift = 10;
        for i in 1..=lift {
            let offset = Vec3::Y * i as f32;
            steps.push(ScriptStep {
                interactors: vec![hand(LEFT, left_start + offset)],
                events: vec![ScriptEvent::new(InteractionKind::TriggerUpdate, LEFT)],
                ..Default::default()
            });
        }
        let raised = Vec3::Y * lift as f32;

        steps.push(ScriptStep {
            interactors: vec![hand(RIGHT, right_start + raised)],
            events: vec![
                ScriptEvent::new(InteractionKind::HoverEnter, RIGHT),
                ScriptEvent::new(InteractionKind::TriggerStart, RIGHT),
            ],
            ..Default::default()
        });

        // Spread from 20 cm to 40 cm while turning a quarter turn about Y
        let spread = 30;
        for i in 1..=spread {
            let t = i as f32 / spread as f32;
            let half = 10.0 + 10.0 * t;
            let angle = std::f32::consts::FRAC_PI_2 * t;
            let axis = Quat::from_rotation_y(angle) * Vec3::X;
            let mid = center + raised;
            steps.push(ScriptStep {
                interactors: vec![hand(LEFT, mid - axis * half), hand(RIGHT, mid + axis * half)],
                events: vec![
                    ScriptEvent::new(InteractionKind::TriggerUpdate, LEFT),
                    ScriptEvent::new(InteractionKind::TriggerUpdate, RIGHT),
                ],
                ..Default::default()
            });
        }

        steps.push(ScriptStep {
            events: vec![
                ScriptEvent::new(InteractionKind::TriggerEnd, RIGHT),
                ScriptEvent::new(InteractionKind::HoverExit, RIGHT),
            ],
            ..Default::default()
        });

        // Tracking loss on the remaining hand cancels the trigger
        steps.push(ScriptStep {
            lost: vec![LEFT],
            events: vec![
                ScriptEvent::new(InteractionKind::TriggerCanceled, LEFT),
                ScriptEvent::new(InteractionKind::HoverExit, LEFT),
            ],
            ..Default::default()
        });

        Self {
            name: "Two-hand demo".to_string(),
            steps,
            ..Default::default()
        }
    }
}
