//! Simulated request latency for the in-memory stores.
//!
//! The stores stand in for a remote API, so every call pays a short delay
//! before touching data. Two tiers: `heavy` for listing and writes that
//! create or modify, `light` for single lookups and removals.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub heavy: Duration,
    pub light: Duration,
}

impl Latency {
    pub const fn new(heavy_ms: u64, light_ms: u64) -> Self {
        Self {
            heavy: Duration::from_millis(heavy_ms),
            light: Duration::from_millis(light_ms),
        }
    }

    /// Same delay for every call.
    pub const fn uniform(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// No delay at all.
    pub const fn none() -> Self {
        Self::uniform(0)
    }

    pub async fn heavy(&self) {
        pause(self.heavy).await;
    }

    pub async fn light(&self) {
        pause(self.light).await;
    }
}

impl Default for Latency {
    /// 300 ms for list/create/update, 200 ms for get/delete/clear/reorder.
    fn default() -> Self {
        Self::new(300, 200)
    }
}

async fn pause(d: Duration) {
    if !d.is_zero() {
        tokio::time::sleep(d).await;
    }
}
