//! Spin animator: `Idle -> Spinning -> Idle`.
//!
//! A spin is planned up front (start, target, start time, duration, curve)
//! and then sampled against the clock. Sampling is a pure function of time,
//! so the frame rate only affects what gets drawn in between, never where
//! the wheel stops.

use serde::{Deserialize, Serialize};

use crate::api::config::WheelConfig;
use crate::api::types::SpinRefused;
use crate::core::geometry::FULL_TURN;
use crate::core::rng::SpinRng;
use crate::extensions::easing::{ease, Easing};

/// A spin in flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub start_rotation: f64,
    pub final_rotation: f64,
    pub started_at_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl SpinPlan {
    /// Normalized progress [0, 1].
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Rotation at a point in time. Exactly `final_rotation` once progress reaches 1.
    pub fn rotation_at(&self, now_ms: f64) -> f64 {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            self.final_rotation
        } else {
            ease(self.start_rotation, self.final_rotation, p, self.easing)
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Whole cosmetic turns for a spin, uniform over `[min_turns, max_turns)`.
/// Always an integer so the turn term is an exact multiple of 360.
pub fn whole_turns(config: &WheelConfig, r: f64) -> u32 {
    let span = config.max_turns.saturating_sub(config.min_turns);
    if span == 0 {
        return config.min_turns;
    }
    let extra = (r.clamp(0.0, 1.0) * f64::from(span)).floor() as u32;
    config.min_turns + extra.min(span - 1)
}

/// Draw a target rotation: `current + turns * 360 + offset`, `offset` in [0, 360).
/// The offset alone decides the winner.
pub fn plan_target(current: f64, config: &WheelConfig, rng: &mut impl SpinRng) -> f64 {
    let turns = whole_turns(config, rng.next_f64());
    let offset = rng.next_f64() * FULL_TURN;
    current + f64::from(turns) * FULL_TURN + offset
}

/// Drives one wheel's rotation.
#[derive(Debug, Clone, Default)]
pub struct SpinAnimator {
    rotation: f64,
    spin: Option<SpinPlan>,
}

impl SpinAnimator {
    pub fn new(rotation: f64) -> Self {
        Self {
            rotation,
            spin: None,
        }
    }

    /// Current rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// The spin in flight, if any.
    pub fn plan(&self) -> Option<&SpinPlan> {
        self.spin.as_ref()
    }

    /// Check whether a spin over `entry_count` entries may start.
    pub fn check_start(&self, entry_count: usize) -> Result<(), SpinRefused> {
        if self.spin.is_some() {
            return Err(SpinRefused::AlreadySpinning);
        }
        if entry_count < 2 {
            return Err(SpinRefused::NotEnoughEntries { count: entry_count });
        }
        Ok(())
    }

    /// Start a spin. On refusal nothing changes, the RNG included.
    pub fn start(
        &mut self,
        entry_count: usize,
        now_ms: f64,
        config: &WheelConfig,
        rng: &mut impl SpinRng,
    ) -> Result<SpinPlan, SpinRefused> {
        self.check_start(entry_count)?;
        let plan = SpinPlan {
            start_rotation: self.rotation,
            final_rotation: plan_target(self.rotation, config, rng),
            started_at_ms: now_ms,
            duration_ms: config.spin_duration_ms,
            easing: config.easing,
        };
        self.spin = Some(plan);
        Ok(plan)
    }

    /// Advance to `now_ms`. Returns the final rotation on the call that
    /// completes the spin, and `None` on every other call.
    pub fn advance(&mut self, now_ms: f64) -> Option<f64> {
        let plan = self.spin?;
        self.rotation = plan.rotation_at(now_ms);
        if plan.is_finished(now_ms) {
            self.spin = None;
            Some(plan.final_rotation)
        } else {
            None
        }
    }
}
