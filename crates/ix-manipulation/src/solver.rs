//! Geometric helpers for the manipulation solver
//!
//! Pure functions, independent of component state.

use glam::{Mat3, Quat, Vec3};
use ix_core::EPSILON;

use crate::config::RotationAxis;
use crate::constants::{ARM_EXTENSION, MIN_DRAG_DISTANCE};
use crate::events::ScaleLimit;

/// Rotation whose +Z points along `forward` and whose +Y leans toward `up`.
///
/// Returns `None` when `forward` is zero or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let right = up.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
}

/// Keep only the twist of `rotation` about the constrained axis
pub fn constrain_rotation(rotation: Quat, axis: RotationAxis) -> Quat {
    let Some(axis) = axis.axis() else {
        return rotation;
    };
    let projected = axis * rotation.xyz().dot(axis);
    let twist = Quat::from_xyzw(projected.x, projected.y, projected.z, rotation.w);
    if twist.length_squared() < EPSILON * EPSILON {
        // Pure swing (180° about a perpendicular axis): no twist component
        Quat::IDENTITY
    } else {
        twist.normalize()
    }
}

/// Flatten a point onto the plane perpendicular to the constrained axis
pub fn project_to_rotation_plane(point: Vec3, axis: RotationAxis) -> Vec3 {
    match axis {
        RotationAxis::All => point,
        RotationAxis::X => Vec3::new(0.0, point.y, point.z),
        RotationAxis::Y => Vec3::new(point.x, 0.0, point.z),
        RotationAxis::Z => Vec3::new(point.x, point.y, 0.0),
    }
}

/// Scale from the change in distance between two hands.
///
/// A degenerate initial distance holds the initial scale.
pub fn dual_interactor_scale(initial_scale: Vec3, initial_distance: f32, distance: f32) -> Vec3 {
    if initial_distance < EPSILON {
        return initial_scale;
    }
    let factor = 1.0 + (distance - initial_distance) / initial_distance;
    initial_scale * factor.max(EPSILON)
}

/// Clamp `scale` into `[min, max]` per axis without distorting it.
///
/// The whole vector is multiplied by the single most restrictive ratio, so
/// its proportions are kept. An axis collapsed to zero has no ratio; the
/// result is then the minimum bound itself. Returns the clamped value and
/// which limit was hit, if any.
pub fn clamp_uniform_scale(scale: Vec3, min: Vec3, max: Vec3) -> (Vec3, Option<ScaleLimit>) {
    let magnitude = scale.abs();

    let mut shrink = 1.0_f32;
    for i in 0..3 {
        if magnitude[i] > max[i] {
            shrink = shrink.min(max[i] / magnitude[i]);
        }
    }
    if shrink < 1.0 {
        return (scale * shrink, Some(ScaleLimit::Maximum));
    }

    let mut grow = 1.0_f32;
    for i in 0..3 {
        if magnitude[i] < min[i] {
            grow = grow.max(min[i] / magnitude[i]);
        }
    }
    if !grow.is_finite() {
        return (min * scale.signum(), Some(ScaleLimit::Minimum));
    }
    if grow > 1.0 {
        return (scale * grow, Some(ScaleLimit::Minimum));
    }

    (scale, None)
}

/// Depth amplification for ray manipulation at `distance` along the ray.
///
/// Remaps `[0, max_drag_distance]` onto `[factor_min, factor_max]`, where the
/// drag range is the raycast range minus arm reach.
pub fn stretch_factor(
    distance: f32,
    max_raycast_distance: f32,
    factor_min: f32,
    factor_max: f32,
) -> f32 {
    let max_drag_distance = (max_raycast_distance - ARM_EXTENSION).max(MIN_DRAG_DISTANCE);
    let t = (distance / max_drag_distance).clamp(0.0, 1.0);
    factor_min + (factor_max - factor_min) * t
}

/// Exponential approach of `current` toward `target`
pub fn approach(current: f32, target: f32, speed: f32, dt: f32) -> f32 {
    let t = (speed * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}
