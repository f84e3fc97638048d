// extensions/easing.rs
//
// Pure easing functions for the spin animation.
// Only decelerating, non-overshooting curves: a wheel must come to rest
// exactly on its target, never swing past it and back.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Easing curve applied to spin progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant angular velocity, abrupt stop.
    Linear,
    /// Gentle slow end.
    QuadOut,
    /// Standard wheel deceleration.
    #[default]
    CubicOut,
    /// Stronger slow end.
    QuartOut,
    /// Very long coast before stopping.
    QuintOut,
    /// Sine wave deceleration (smooth).
    SineOut,
    /// Exponential deceleration (dramatic).
    ExpoOut,
}

impl Easing {
    /// Apply the curve to a normalized time value `t`.
    /// `t` is clamped to [0, 1]; the result is in [0, 1] and is exactly 0 at
    /// `t = 0` and exactly 1 at `t = 1`.
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::SineOut => {
                if t == 1.0 { 1.0 } else { (t * FRAC_PI_2).sin() }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f64.powf(-10.0 * t) }
            }
        }
    }

    /// All selectable curves, in menu order.
    pub const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::QuadOut,
        Easing::CubicOut,
        Easing::QuartOut,
        Easing::QuintOut,
        Easing::SineOut,
        Easing::ExpoOut,
    ];
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f64, b: f64, t: f64, easing: Easing) -> f64 {
    lerp(a, b, easing.apply(t))
}
