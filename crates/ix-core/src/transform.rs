//! Transform service
//!
//! The host scene graph is consumed through [`SceneTransform`]. [`Transform`]
//! is a standalone node (local pose under a fixed parent matrix) used by
//! hosts without their own scene graph and by tests.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// World/local pose access for one scene node
pub trait SceneTransform {
    fn world_position(&self) -> Vec3;
    fn set_world_position(&mut self, position: Vec3);
    fn world_rotation(&self) -> Quat;
    fn set_world_rotation(&mut self, rotation: Quat);
    fn world_scale(&self) -> Vec3;
    fn set_world_scale(&mut self, scale: Vec3);

    fn local_position(&self) -> Vec3;
    fn set_local_position(&mut self, position: Vec3);
    fn local_rotation(&self) -> Quat;
    fn set_local_rotation(&mut self, rotation: Quat);
    fn local_scale(&self) -> Vec3;
    fn set_local_scale(&mut self, scale: Vec3);

    /// Composed local-to-world matrix
    fn world_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.world_scale(),
            self.world_rotation(),
            self.world_position(),
        )
    }

    /// Composed local matrix
    fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.local_scale(),
            self.local_rotation(),
            self.local_position(),
        )
    }
}

/// Shared transform handle
pub type SharedTransform = Arc<Mutex<dyn SceneTransform + Send>>;

/// Position, rotation and scale captured at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub matrix: Mat4,
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::from_parts(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

impl TransformSnapshot {
    /// Build a snapshot, composing the matrix
    pub fn from_parts(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: Mat4::from_scale_rotation_translation(scale, rotation, position),
        }
    }

    /// Capture the world pose of a transform
    pub fn world(transform: &dyn SceneTransform) -> Self {
        Self {
            position: transform.world_position(),
            rotation: transform.world_rotation(),
            scale: transform.world_scale(),
            matrix: transform.world_transform(),
        }
    }

    /// Capture the local pose of a transform
    pub fn local(transform: &dyn SceneTransform) -> Self {
        Self {
            position: transform.local_position(),
            rotation: transform.local_rotation(),
            scale: transform.local_scale(),
            matrix: transform.local_transform(),
        }
    }
}

/// A scene node with a local pose under a fixed parent matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Parent local-to-world matrix
    pub parent: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: Mat4::IDENTITY,
        }
    }
}

impl Transform {
    /// Root node at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the local scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the local rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Place the node under a parent matrix
    pub fn with_parent(mut self, parent: Mat4) -> Self {
        self.parent = parent;
        self
    }

    /// Wrap into a shared handle
    pub fn into_shared(self) -> SharedTransform {
        Arc::new(Mutex::new(self))
    }

    fn parent_parts(&self) -> (Vec3, Quat, Vec3) {
        self.parent.to_scale_rotation_translation()
    }
}

impl SceneTransform for Transform {
    fn world_position(&self) -> Vec3 {
        self.parent.transform_point3(self.position)
    }

    fn set_world_position(&mut self, position: Vec3) {
        self.position = self.parent.inverse().transform_point3(position);
    }

    fn world_rotation(&self) -> Quat {
        let (_, parent_rotation, _) = self.parent_parts();
        parent_rotation * self.rotation
    }

    fn set_world_rotation(&mut self, rotation: Quat) {
        let (_, parent_rotation, _) = self.parent_parts();
        self.rotation = (parent_rotation.inverse() * rotation).normalize();
    }

    fn world_scale(&self) -> Vec3 {
        let (parent_scale, _, _) = self.parent_parts();
        parent_scale * self.scale
    }

    fn set_world_scale(&mut self, scale: Vec3) {
        let (parent_scale, _, _) = self.parent_parts();
        self.scale = scale / parent_scale;
    }

    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn local_rotation(&self) -> Quat {
        self.rotation
    }

    fn set_local_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn local_scale(&self) -> Vec3 {
        self.scale
    }

    fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn world_transform(&self) -> Mat4 {
        self.parent * self.local_transform()
    }
}
