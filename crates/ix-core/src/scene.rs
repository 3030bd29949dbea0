//! Scene objects
//!
//! A minimal component host: a transform plus an optional interactable.
//! Behaviors such as manipulation look their companion components up here.

use uuid::Uuid;

use crate::interactable::Interactable;
use crate::transform::SharedTransform;

/// A scene entity carrying interaction components
pub struct SceneObject {
    pub id: Uuid,
    pub name: String,
    pub transform: SharedTransform,
    pub interactable: Option<Interactable>,
    enabled: bool,
}

impl std::fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("interactable", &self.interactable)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl SceneObject {
    /// Create an enabled object with no components
    pub fn new(name: impl Into<String>, transform: SharedTransform) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            transform,
            interactable: None,
            enabled: true,
        }
    }

    /// Attach an interactable
    pub fn with_interactable(mut self, mut interactable: Interactable) -> Self {
        interactable.set_enabled(self.enabled);
        self.interactable = Some(interactable);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the object and its components
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if let Some(interactable) = &mut self.interactable {
            interactable.set_enabled(enabled);
        }
    }

    /// Per-frame update of the object's components
    pub fn tick(&mut self) {
        if let Some(interactable) = &mut self.interactable {
            interactable.tick();
        }
    }
}
