pub mod api;
pub mod core;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{WheelConfig, ConfigError, MIN_SPIN_DURATION_MS, MAX_SPIN_DURATION_MS};
pub use api::types::{Entry, EntryId, SpinRefused, SpinResult, WheelEvent, WheelState};
pub use core::animator::{SpinAnimator, SpinPlan, plan_target, whole_turns};
pub use core::geometry::{
    Segment, FULL_TURN, label_anchor, pointer_angle, resolve, resolve_index, segment_at,
    segment_width, segments,
};
pub use core::resolver::OutcomeResolver;
pub use core::rng::{SpinRng, SequenceRng, Xorshift64};
pub use core::time::{Clock, FixedTimestep, ManualClock};
pub use core::wheel::Wheel;

pub use extensions::{Easing, lerp, ease};
