//! Scalar helpers shared by the camera and picking code.
//!
//! - Single-pole exponential easing (`ease_toward`).
//! - Symmetric clamping and angle unwrapping for orbit angles.
//! - A deterministic float ordering for nearest-hit selection.

use core::cmp::Ordering;
use core::f64::consts::{PI, TAU};

/// One easing step: `current + (target - current) * k`.
///
/// For `0 < k < 1` the result lies strictly between `current` and `target`
/// (or equals both once converged), so repeated steps never overshoot.
#[inline]
pub fn ease_toward(current: f64, target: f64, k: f64) -> f64 {
    current + (target - current) * k
}

/// Clamp `v` into `[-limit, limit]`.
#[inline]
pub fn clamp_symmetric(v: f64, limit: f64) -> f64 {
    v.clamp(-limit, limit)
}

/// Shift `angle` by whole turns so it lies within `π` of `reference`.
pub fn unwrap_angle_near(angle: f64, reference: f64) -> f64 {
    let mut delta = (angle - reference) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    reference + delta
}

/// Canonicalize a floating-point value for deterministic ordering.
///
/// `-0.0` becomes `0.0`; all NaNs become a single canonical NaN.
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Deterministic total ordering for floats.
pub fn stable_total_cmp_f64(a: f64, b: f64) -> Ordering {
    canonical_f64(a).total_cmp(&canonical_f64(b))
}
