//! Global constants for ix-core
//!
//! Distances are in centimeters, matching the units of interactor snapshots.

/// Default one-euro filter minimum cutoff frequency (Hz)
pub const DEFAULT_MIN_CUTOFF: f32 = 2.0;

/// Default one-euro filter speed coefficient
pub const DEFAULT_BETA: f32 = 0.015;

/// Default one-euro filter derivative cutoff frequency (Hz)
pub const DEFAULT_DERIVATE_CUTOFF: f32 = 1.0;

/// Default maximum raycast distance of an interactor
pub const DEFAULT_MAX_RAYCAST_DISTANCE: f32 = 500.0;

/// Threshold below which vectors and distances are treated as zero
pub const EPSILON: f32 = 1e-5;
