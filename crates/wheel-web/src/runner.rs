use wheel_engine::{
    label_anchor, segment_at, ConfigError, Entry, FixedTimestep, ManualClock, SpinResult, Wheel,
    WheelConfig, WheelEvent, Xorshift64,
};

/// Drives a wheel from browser frame deltas.
///
/// The host calls `tick` from its animation frame with the elapsed seconds.
/// Time is fed to the engine in fixed steps on a manual clock, so a spin
/// plays out the same regardless of the display's refresh rate.
pub struct WheelRunner {
    wheel: Wheel<ManualClock, Xorshift64>,
    clock: ManualClock,
    timestep: FixedTimestep,
    /// Completed spin not yet collected by the host.
    winner: Option<SpinResult>,
}

impl WheelRunner {
    pub fn new(seed: u64) -> Result<Self, ConfigError> {
        Self::with_config(WheelConfig::default(), seed)
    }

    pub fn with_config(config: WheelConfig, seed: u64) -> Result<Self, ConfigError> {
        let clock = ManualClock::new();
        let timestep = FixedTimestep::new(config.fixed_dt_ms);
        let wheel = Wheel::new(config, clock.clone(), Xorshift64::new(seed))?;
        Ok(Self {
            wheel,
            clock,
            timestep,
            winner: None,
        })
    }

    /// Replace entries from a JSON array. Returns false on bad JSON or mid-spin.
    pub fn set_entries_json(&mut self, json: &str) -> bool {
        let entries: Vec<Entry> = match serde_json::from_str(json) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("wheel: bad entries json: {}", err);
                return false;
            }
        };
        match self.wheel.set_entries(entries) {
            Ok(()) => true,
            Err(reason) => {
                log::warn!("wheel: entries not replaced: {}", reason);
                false
            }
        }
    }

    /// Apply a JSON config. Missing fields take their defaults.
    pub fn configure_json(&mut self, json: &str) -> bool {
        let config = match WheelConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("wheel: config rejected: {}", err);
                return false;
            }
        };
        let dt_ms = config.fixed_dt_ms;
        match self.wheel.set_config(config) {
            Ok(()) => {
                self.timestep = FixedTimestep::new(dt_ms);
                true
            }
            Err(err) => {
                log::warn!("wheel: config rejected: {}", err);
                false
            }
        }
    }

    /// Request a spin. False when refused.
    pub fn spin(&mut self) -> bool {
        let started = self.wheel.start_spin().is_ok();
        self.flush_events();
        started
    }

    /// Run one frame: advance the clock in fixed steps and update the wheel.
    ///
    /// At most ten fixed steps run per call, so after a long stall (hidden
    /// tab, debugger) the spin resumes where it was instead of jumping ahead.
    /// The cost is that `spin_duration_ms` bounds engine time, not wall time:
    /// a stalled frame stretches the spin on the wall clock.
    pub fn tick(&mut self, dt_seconds: f64) {
        let steps = self.timestep.accumulate(dt_seconds * 1000.0);
        for _ in 0..steps {
            self.clock.advance(self.timestep.dt_ms());
            if let Some(result) = self.wheel.update() {
                self.winner = Some(result);
            }
        }
        self.flush_events();
    }

    pub fn rotation(&self) -> f64 {
        self.wheel.rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    /// Segment layout in wheel space as a JSON array.
    pub fn segments_json(&self) -> String {
        serde_json::to_string(&self.wheel.segments()).unwrap_or_default()
    }

    /// Screen-space label position for `index`, relative to the wheel center,
    /// at the current rotation.
    pub fn label_anchor(&self, index: usize, radius: f64) -> Option<[f64; 2]> {
        label_anchor(index, self.wheel.entries().len(), radius, self.wheel.rotation())
            .map(|v| v.to_array())
    }

    /// Segment drawn under a screen angle (degrees, 0 at the pointer) at the
    /// current rotation. Used for hit-testing clicks on the wheel.
    pub fn segment_at_screen(&self, screen_degrees: f64) -> Option<usize> {
        segment_at(self.wheel.entries().len(), screen_degrees - self.wheel.rotation())
    }

    pub fn take_winner(&mut self) -> Option<SpinResult> {
        self.winner.take()
    }

    /// The pending winner as JSON, or an empty string when there is none.
    pub fn take_winner_json(&mut self) -> String {
        self.take_winner()
            .and_then(|result| serde_json::to_string(&result).ok())
            .unwrap_or_default()
    }

    pub fn wheel(&self) -> &Wheel<ManualClock, Xorshift64> {
        &self.wheel
    }

    fn flush_events(&mut self) {
        for event in self.wheel.drain_events() {
            match event {
                WheelEvent::SpinRefused { reason } => log::info!("wheel: spin refused: {}", reason),
                other => log::debug!("wheel: {:?}", other),
            }
        }
    }
}
