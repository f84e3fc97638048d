use serde::{Deserialize, Serialize};

use crate::extensions::easing::Easing;

/// Shortest spin the engine accepts, in milliseconds.
pub const MIN_SPIN_DURATION_MS: f64 = 500.0;
/// Longest spin the engine accepts, in milliseconds.
pub const MAX_SPIN_DURATION_MS: f64 = 30_000.0;

/// Configuration for a wheel instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Duration of one spin in milliseconds (default: 3000).
    pub spin_duration_ms: f64,
    /// Fewest cosmetic full turns per spin (default: 4).
    pub min_turns: u32,
    /// Upper bound (exclusive unless equal to `min_turns`) on cosmetic full turns (default: 8).
    pub max_turns: u32,
    /// Deceleration curve (default: cubic ease-out).
    pub easing: Easing,
    /// Fixed update step for frame-driven hosts, in milliseconds (default: 1000/60).
    pub fixed_dt_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: 3000.0,
            min_turns: 4,
            max_turns: 8,
            easing: Easing::CubicOut,
            fixed_dt_ms: 1000.0 / 60.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("spin duration {0} ms is outside the supported 500..=30000 ms range")]
    SpinDuration(f64),
    #[error("min_turns must be at least 1")]
    ZeroTurns,
    #[error("min_turns {min} exceeds max_turns {max}")]
    TurnRange { min: u32, max: u32 },
    #[error("fixed_dt_ms must be positive and finite, got {0}")]
    FixedStep(f64),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl WheelConfig {
    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with a different spin duration.
    pub fn with_spin_duration(mut self, ms: f64) -> Self {
        self.spin_duration_ms = ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.spin_duration_ms;
        if !d.is_finite() || !(MIN_SPIN_DURATION_MS..=MAX_SPIN_DURATION_MS).contains(&d) {
            return Err(ConfigError::SpinDuration(d));
        }
        if self.min_turns == 0 {
            return Err(ConfigError::ZeroTurns);
        }
        if self.min_turns > self.max_turns {
            return Err(ConfigError::TurnRange {
                min: self.min_turns,
                max: self.max_turns,
            });
        }
        if !self.fixed_dt_ms.is_finite() || self.fixed_dt_ms <= 0.0 {
            return Err(ConfigError::FixedStep(self.fixed_dt_ms));
        }
        Ok(())
    }
}
