//! Manipulation tuning constants
//!
//! Distances are in centimeters, times in seconds.

/// Distance a user can comfortably extend their arm from the body.
/// Subtracted from the raycast range to get the usable stretch range.
pub const ARM_EXTENSION: f32 = 100.0;

/// Lower bound of the stretch range (avoids division by zero)
pub const MIN_DRAG_DISTANCE: f32 = 1.0;

/// Closest an indirectly manipulated object may get to the ray origin
pub const MIN_RAY_DISTANCE: f32 = 1.0;

/// Exponential approach rate of the stretch offset (1/s)
pub const STRETCH_SMOOTH_SPEED: f32 = 15.0;

/// Ray distance gained per unit of mobile touchpad drag
pub const MOBILE_DRAG_MULTIPLIER: f32 = 0.5;

/// Default lower scale bound, as a factor of the original scale
pub const DEFAULT_MINIMUM_SCALE_FACTOR: f32 = 0.25;

/// Default upper scale bound, as a factor of the original scale
pub const DEFAULT_MAXIMUM_SCALE_FACTOR: f32 = 20.0;

/// Default stretch multiplier near the user
pub const DEFAULT_Z_STRETCH_FACTOR_MIN: f32 = 1.0;

/// Default stretch multiplier at the far end of the stretch range
pub const DEFAULT_Z_STRETCH_FACTOR_MAX: f32 = 12.0;
