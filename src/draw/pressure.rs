//! Pressure to line-width mapping.
//!
//! Pure functions: identical inputs always produce identical outputs, which is
//! what makes replay deterministic.

use crate::config::{PressureCurve, WidthPolicy};

/// Computes the width factor for a pressure sample.
///
/// The curve output is anchored at three points: `curve(0)` maps to
/// `shrink_multiplier`, `curve(0.5)` to 1.0, and `curve(1)` to
/// `grow_multiplier`, with linear interpolation on each side of the midpoint.
/// Pressure is clamped to [0, 1] first; a degenerate side (the curve spans no
/// range there, e.g. the constant curve) maps to 1.0.
///
/// The result is always within `[shrink_multiplier, grow_multiplier]` for a
/// monotonically increasing curve.
pub fn width_factor(pressure: f64, curve: &PressureCurve, policy: &WidthPolicy) -> f64 {
    let p = pressure.clamp(0.0, 1.0);
    let raw = curve.apply(p);

    let low = curve.apply(0.0);
    let mid = curve.apply(0.5);
    let high = curve.apply(1.0);

    if raw >= mid {
        let span = high - mid;
        if span <= 0.0 {
            return 1.0;
        }
        let t = ((raw - mid) / span).clamp(0.0, 1.0);
        1.0 + t * (policy.grow_multiplier - 1.0)
    } else {
        let span = mid - low;
        if span <= 0.0 {
            return 1.0;
        }
        let t = ((raw - low) / span).clamp(0.0, 1.0);
        policy.shrink_multiplier + t * (1.0 - policy.shrink_multiplier)
    }
}

/// Effective line width for a pressure sample: `base * width_factor`.
pub fn effective_width(pressure: f64, curve: &PressureCurve, policy: &WidthPolicy) -> f64 {
    policy.base * width_factor(pressure, curve, policy)
}
