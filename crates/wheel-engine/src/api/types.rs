use serde::{Deserialize, Serialize};

/// Stable identifier of a wheel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One named slice of the wheel.
/// The engine only reads entries; the list belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
    /// Hex color, e.g. `#7C3AED`.
    pub color: String,
    /// Carried for storage compatibility. Segments are uniform regardless.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Entry {
    pub fn new(id: u32, text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: EntryId(id),
            text: text.into(),
            color: color.into(),
            weight: 1.0,
        }
    }
}

/// Rotation state of a wheel instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelState {
    /// Cumulative clockwise rotation in degrees. Unbounded.
    pub rotation_degrees: f64,
    pub entry_count: usize,
}

/// The outcome of one completed spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub winner: Entry,
    /// Position of the winner in the spin's entry snapshot.
    pub winner_index: usize,
    pub final_rotation_degrees: f64,
    /// Engine-clock reading when the spin came to rest: milliseconds on the
    /// wheel's injected `Clock`, not a wall-clock timestamp.
    pub completed_at_ms: f64,
}

/// Why a spin request was declined. The wheel stays idle and unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinRefused {
    #[error("at least 2 entries are required to spin, wheel has {count}")]
    NotEnoughEntries { count: usize },
    #[error("a spin is already in progress")]
    AlreadySpinning,
}

/// Notifications queued by the wheel, drained by the host once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WheelEvent {
    SpinStarted {
        start_rotation: f64,
        final_rotation: f64,
    },
    SpinRefused {
        reason: SpinRefused,
    },
    SpinCompleted {
        result: SpinResult,
    },
}
