//! One-euro filter
//!
//! Adaptive low-pass filter for noisy tracked signals. Slow motion is
//! smoothed heavily (jitter removal); fast motion raises the cutoff so the
//! output keeps up (low lag).
//!
//! ```text
//! tau   = 1 / (2π · cutoff)
//! alpha = 1 / (1 + tau / dt)
//! dx̂    = blend(dx̂_prev, rate(x̂_prev, x), alpha(dcutoff))
//! cutoff = min_cutoff + beta · |dx̂|
//! x̂     = blend(x̂_prev, x, alpha(cutoff))
//! ```

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BETA, DEFAULT_DERIVATE_CUTOFF, DEFAULT_MIN_CUTOFF};

/// One-euro filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneEuroConfig {
    /// Cutoff frequency at rest (Hz). Lower removes more jitter.
    pub min_cutoff: f32,
    /// How fast the cutoff rises with speed. Higher reduces lag.
    pub beta: f32,
    /// Cutoff used to smooth the speed estimate (Hz)
    pub dcutoff: f32,
}

impl Default for OneEuroConfig {
    fn default() -> Self {
        Self {
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            dcutoff: DEFAULT_DERIVATE_CUTOFF,
        }
    }
}

/// A value the one-euro filter can smooth.
///
/// Linear signals blend with lerp and measure speed as vector length;
/// rotations blend with slerp and measure speed as angular velocity.
pub trait Signal: Copy + std::fmt::Debug {
    /// Rate of change representation
    type Rate: Copy + std::fmt::Debug;

    fn zero_rate() -> Self::Rate;

    /// Rate of change from `from` to `to` over `dt` seconds
    fn rate(from: Self, to: Self, dt: f32) -> Self::Rate;

    fn blend_rate(from: Self::Rate, to: Self::Rate, alpha: f32) -> Self::Rate;

    fn rate_magnitude(rate: Self::Rate) -> f32;

    fn blend(from: Self, to: Self, alpha: f32) -> Self;
}

impl Signal for f32 {
    type Rate = f32;

    fn zero_rate() -> f32 {
        0.0
    }

    fn rate(from: f32, to: f32, dt: f32) -> f32 {
        (to - from) / dt
    }

    fn blend_rate(from: f32, to: f32, alpha: f32) -> f32 {
        from + (to - from) * alpha
    }

    fn rate_magnitude(rate: f32) -> f32 {
        rate.abs()
    }

    fn blend(from: f32, to: f32, alpha: f32) -> f32 {
        from + (to - from) * alpha
    }
}

impl Signal for Vec3 {
    type Rate = Vec3;

    fn zero_rate() -> Vec3 {
        Vec3::ZERO
    }

    fn rate(from: Vec3, to: Vec3, dt: f32) -> Vec3 {
        (to - from) / dt
    }

    fn blend_rate(from: Vec3, to: Vec3, alpha: f32) -> Vec3 {
        from.lerp(to, alpha)
    }

    fn rate_magnitude(rate: Vec3) -> f32 {
        rate.length()
    }

    fn blend(from: Vec3, to: Vec3, alpha: f32) -> Vec3 {
        from.lerp(to, alpha)
    }
}

impl Signal for Quat {
    /// Angular velocity as a scaled axis (rad/s)
    type Rate = Vec3;

    fn zero_rate() -> Vec3 {
        Vec3::ZERO
    }

    fn rate(from: Quat, to: Quat, dt: f32) -> Vec3 {
        let mut delta = to * from.inverse();
        // Shortest arc
        if delta.w < 0.0 {
            delta = -delta;
        }
        delta.to_scaled_axis() / dt
    }

    fn blend_rate(from: Vec3, to: Vec3, alpha: f32) -> Vec3 {
        from.lerp(to, alpha)
    }

    fn rate_magnitude(rate: Vec3) -> f32 {
        rate.length()
    }

    fn blend(from: Quat, to: Quat, alpha: f32) -> Quat {
        from.slerp(to, alpha).normalize()
    }
}

/// Smoothing factor for a first-order low-pass at `cutoff` Hz
fn smoothing_factor(cutoff: f32, dt: f32) -> f32 {
    let tau = 1.0 / (TAU * cutoff.max(f32::EPSILON));
    1.0 / (1.0 + tau / dt)
}

#[derive(Debug, Clone, Copy)]
struct FilterState<T: Signal> {
    value: T,
    rate: T::Rate,
    time: f32,
}

/// One-euro filter over any [`Signal`]
#[derive(Debug, Clone)]
pub struct OneEuroFilter<T: Signal> {
    config: OneEuroConfig,
    state: Option<FilterState<T>>,
}

/// Position / scale filter
pub type OneEuroFilterVec3 = OneEuroFilter<Vec3>;

/// Rotation filter
pub type OneEuroFilterQuat = OneEuroFilter<Quat>;

impl<T: Signal> OneEuroFilter<T> {
    /// Create a filter with no history
    pub fn new(config: OneEuroConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn config(&self) -> &OneEuroConfig {
        &self.config
    }

    /// Change parameters, keeping history
    pub fn set_config(&mut self, config: OneEuroConfig) {
        self.config = config;
    }

    /// Forget all history; the next sample passes through unchanged
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// True until the first sample after construction or reset
    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    /// Last filtered value
    pub fn last_value(&self) -> Option<T> {
        self.state.map(|s| s.value)
    }

    /// Filter a sample taken at `time` seconds
    pub fn filter(&mut self, value: T, time: f32) -> T {
        let Some(prev) = self.state else {
            self.state = Some(FilterState {
                value,
                rate: T::zero_rate(),
                time,
            });
            return value;
        };

        let dt = time - prev.time;
        if dt <= 0.0 {
            return prev.value;
        }

        let raw_rate = T::rate(prev.value, value, dt);
        let rate = T::blend_rate(
            prev.rate,
            raw_rate,
            smoothing_factor(self.config.dcutoff, dt),
        );
        let cutoff = self.config.min_cutoff + self.config.beta * T::rate_magnitude(rate);
        let filtered = T::blend(prev.value, value, smoothing_factor(cutoff, dt));

        self.state = Some(FilterState {
            value: filtered,
            rate,
            time,
        });
        filtered
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = OneEuroFilterVec3::new(OneEuroConfig::default());
        let value = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(filter.filter(value, 0.0), value);

        filter.filter(Vec3::ZERO, FRAME);
        filter.reset();
        assert!(filter.is_empty());
        assert_eq!(filter.filter(value, 1.0), value);
    }

    #[test]
    fn test_constant_input_converges() {
        let mut filter = OneEuroFilter::<f32>::new(OneEuroConfig::default());
        let mut out = filter.filter(0.0, 0.0);
        for i in 1..600 {
            out = filter.filter(5.0, i as f32 * FRAME);
        }
        assert_abs_diff_eq!(out, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_step_response_is_monotonic() {
        let mut filter = OneEuroFilter::<f32>::new(OneEuroConfig::default());
        filter.filter(0.0, 0.0);

        let mut previous = 0.0;
        for i in 1..300 {
            let out = filter.filter(1.0, i as f32 * FRAME);
            assert!(out >= previous, "output went backwards at frame {i}");
            assert!(out <= 1.0, "overshoot at frame {i}: {out}");
            previous = out;
        }
        // Lags behind the first frame, but gets there
        assert!(filter.last_value().unwrap() > 0.99);
    }

    #[test]
    fn test_step_lags_on_first_frame() {
        let mut filter = OneEuroFilterVec3::new(OneEuroConfig::default());
        filter.filter(Vec3::ZERO, 0.0);
        let out = filter.filter(Vec3::X, FRAME);
        assert!(out.x > 0.0 && out.x < 1.0);
    }

    #[test]
    fn test_non_advancing_time_returns_previous() {
        let mut filter = OneEuroFilterVec3::new(OneEuroConfig::default());
        filter.filter(Vec3::ONE, 1.0);
        assert_eq!(filter.filter(Vec3::ZERO, 1.0), Vec3::ONE);
        assert_eq!(filter.filter(Vec3::ZERO, 0.5), Vec3::ONE);
    }

    #[test]
    fn test_quaternion_filter_converges_on_shortest_arc() {
        let mut filter = OneEuroFilterQuat::new(OneEuroConfig::default());
        let start = Quat::IDENTITY;
        let target = Quat::from_rotation_y(1.2);
        filter.filter(start, 0.0);

        let mut previous_angle = 0.0;
        let mut out = start;
        for i in 1..600 {
            out = filter.filter(target, i as f32 * FRAME);
            let angle = out.angle_between(start);
            // acos noise near convergence
            assert!(angle + 2e-3 >= previous_angle);
            previous_angle = angle;
        }
        assert!(out.angle_between(target) < 2e-3);
        assert_abs_diff_eq!(out.length(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_faster_motion_lags_less() {
        let slow_config = OneEuroConfig {
            beta: 0.0,
            ..Default::default()
        };
        let fast_config = OneEuroConfig {
            beta: 1.0,
            ..Default::default()
        };
        let mut slow = OneEuroFilter::<f32>::new(slow_config);
        let mut fast = OneEuroFilter::<f32>::new(fast_config);

        let mut slow_out = 0.0;
        let mut fast_out = 0.0;
        for i in 0..30 {
            let t = i as f32 * FRAME;
            let x = 100.0 * t;
            slow_out = slow.filter(x, t);
            fast_out = fast.filter(x, t);
        }
        let truth = 100.0 * 29.0 * FRAME;
        assert!((truth - fast_out).abs() < (truth - slow_out).abs());
    }
}
