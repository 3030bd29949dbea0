//! Interactable registry
//!
//! The interaction manager discovers active interactables only through
//! registration. Spatial dispatch lives in the host; this module defines the
//! seam plus a simple in-memory implementation.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an interactable
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractableId(Uuid);

impl InteractableId {
    /// Create a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying uuid
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for InteractableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InteractableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InteractableId({})", self.0)
    }
}

impl fmt::Display for InteractableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration seam between interactables and the interaction manager
pub trait InteractableRegistry {
    fn register(&mut self, id: InteractableId);
    fn deregister(&mut self, id: InteractableId);
}

/// Shared registry handle
pub type SharedRegistry = Arc<Mutex<dyn InteractableRegistry + Send>>;

/// In-memory registry of active interactables
#[derive(Debug, Clone, Default)]
pub struct InteractionRegistry {
    active: HashSet<InteractableId>,
}

impl InteractionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an interactable is registered
    pub fn contains(&self, id: InteractableId) -> bool {
        self.active.contains(&id)
    }

    /// Number of registered interactables
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Iterate over registered ids
    pub fn iter(&self) -> impl Iterator<Item = &InteractableId> {
        self.active.iter()
    }
}

impl InteractableRegistry for InteractionRegistry {
    fn register(&mut self, id: InteractableId) {
        if !self.active.insert(id) {
            tracing::warn!("Interactable {} registered twice", id);
        }
    }

    fn deregister(&mut self, id: InteractableId) {
        if !self.active.remove(&id) {
            tracing::warn!("Interactable {} was not registered", id);
        }
    }
}
