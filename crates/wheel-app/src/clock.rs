use std::time::{SystemTime, UNIX_EPOCH};

use tokio::time::Instant;
use wheel_engine::Clock;

/// Engine clock backed by tokio's time, so paused-time tests and the
/// session's frame sleeps agree on what "now" is.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Wall-clock milliseconds since the Unix epoch, for record timestamps.
pub fn unix_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}
