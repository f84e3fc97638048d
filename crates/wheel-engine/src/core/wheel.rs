//! The wheel: entries, rotation, and one spin at a time.
//!
//! Usage:
//!   let clock = ManualClock::new();
//!   let mut wheel = Wheel::new(WheelConfig::default(), clock.clone(), Xorshift64::new(seed))?;
//!   wheel.set_entries(entries)?;
//!   wheel.start_spin()?;
//!   // each frame:
//!   clock.advance(dt_ms);
//!   if let Some(result) = wheel.update() { /* winner */ }

use crate::api::config::{ConfigError, WheelConfig};
use crate::api::types::{Entry, SpinRefused, SpinResult, WheelEvent, WheelState};
use crate::core::animator::{SpinAnimator, SpinPlan};
use crate::core::geometry::{self, Segment};
use crate::core::resolver::OutcomeResolver;
use crate::core::rng::{SpinRng, Xorshift64};
use crate::core::time::{Clock, ManualClock};

pub struct Wheel<C: Clock = ManualClock, R: SpinRng = Xorshift64> {
    config: WheelConfig,
    clock: C,
    rng: R,
    entries: Vec<Entry>,
    animator: SpinAnimator,
    resolver: OutcomeResolver,
    events: Vec<WheelEvent>,
}

impl<C: Clock, R: SpinRng> Wheel<C, R> {
    pub fn new(config: WheelConfig, clock: C, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            rng,
            entries: Vec::new(),
            animator: SpinAnimator::default(),
            resolver: OutcomeResolver::new(),
            events: Vec::new(),
        })
    }

    /// Replace the entry list. Refused mid-spin so the drawn wheel and the
    /// resolved snapshot never disagree.
    pub fn set_entries(&mut self, entries: Vec<Entry>) -> Result<(), SpinRefused> {
        if self.animator.is_spinning() {
            return Err(SpinRefused::AlreadySpinning);
        }
        self.entries = entries;
        Ok(())
    }

    /// Replace the configuration. A spin in flight keeps the duration and
    /// curve it started with.
    pub fn set_config(&mut self, config: WheelConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> WheelState {
        WheelState {
            rotation_degrees: self.animator.rotation(),
            entry_count: self.entries.len(),
        }
    }

    pub fn rotation(&self) -> f64 {
        self.animator.rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.animator.is_spinning()
    }

    pub fn current_spin(&self) -> Option<&SpinPlan> {
        self.animator.plan()
    }

    /// Progress of the spin in flight, [0, 1].
    pub fn progress(&self) -> Option<f64> {
        self.animator
            .plan()
            .map(|plan| plan.progress(self.clock.now_ms()))
    }

    pub fn segments(&self) -> Vec<Segment> {
        geometry::segments(self.entries.len())
    }

    /// Entry currently under the pointer, if the wheel has any entries.
    pub fn entry_under_pointer(&self) -> Option<&Entry> {
        geometry::resolve(&self.entries, self.animator.rotation()).map(|(_, entry)| entry)
    }

    /// Begin a spin. Refusals leave the wheel untouched apart from queueing
    /// a `SpinRefused` event for the host to surface.
    pub fn start_spin(&mut self) -> Result<SpinPlan, SpinRefused> {
        let now = self.clock.now_ms();
        match self
            .animator
            .start(self.entries.len(), now, &self.config, &mut self.rng)
        {
            Ok(plan) => {
                self.resolver.arm(self.entries.clone());
                log::debug!(
                    "spin started: {} entries, {:.2} -> {:.2} deg over {} ms",
                    self.entries.len(),
                    plan.start_rotation,
                    plan.final_rotation,
                    plan.duration_ms
                );
                self.events.push(WheelEvent::SpinStarted {
                    start_rotation: plan.start_rotation,
                    final_rotation: plan.final_rotation,
                });
                Ok(plan)
            }
            Err(reason) => {
                log::debug!("spin refused: {}", reason);
                self.events.push(WheelEvent::SpinRefused { reason });
                Err(reason)
            }
        }
    }

    /// Sample the clock and move the wheel. Returns the result on the single
    /// update that completes a spin.
    pub fn update(&mut self) -> Option<SpinResult> {
        let now = self.clock.now_ms();
        let final_rotation = self.animator.advance(now)?;
        let result = self.resolver.resolve(final_rotation, now)?;
        log::info!(
            "spin complete: '{}' (#{}) at {:.2} deg",
            result.winner.text,
            result.winner.id,
            result.final_rotation_degrees
        );
        self.events.push(WheelEvent::SpinCompleted {
            result: result.clone(),
        });
        Some(result)
    }

    /// Drain queued events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = WheelEvent> + '_ {
        self.events.drain(..)
    }
}
