use std::cell::Cell;
use std::rc::Rc;

/// Monotonic time source, in milliseconds.
/// The engine never reads wall-clock time directly; hosts inject one of these.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Explicitly advanced clock.
/// Clones share the same underlying time, so a test (or a frame-driven host)
/// can keep a handle and advance the clock the wheel is reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a given time.
    pub fn starting_at(ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    /// Move time forward. Negative deltas are ignored.
    pub fn advance(&self, ms: f64) {
        if ms > 0.0 {
            self.now.set(self.now.get() + ms);
        }
    }

    /// Jump to an absolute time. Ignored if it would move backwards.
    pub fn set(&self, ms: f64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Fixed timestep accumulator.
/// Turns variable frame deltas into a steady number of engine updates.
pub struct FixedTimestep {
    /// The fixed delta per step, in milliseconds.
    dt_ms: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
}

impl FixedTimestep {
    pub fn new(dt_ms: f64) -> Self {
        Self {
            dt_ms,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_ms: f64) -> u32 {
        self.accumulator += frame_ms.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt_ms * 10.0);
        let steps = (self.accumulator / self.dt_ms) as u32;
        self.accumulator -= f64::from(steps) * self.dt_ms;
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt_ms
    }

    /// The fixed delta, in milliseconds.
    pub fn dt_ms(&self) -> f64 {
        self.dt_ms
    }
}
