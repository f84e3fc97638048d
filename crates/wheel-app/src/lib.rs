//! Async collaborators around the wheel engine: in-memory stores with
//! simulated latency, bundled fixtures, and the spin session that ties them
//! together.

pub mod clock;
pub mod entries;
pub mod error;
pub mod fixtures;
pub mod history;
pub mod latency;
pub mod session;
pub mod wheels;

pub use clock::{unix_ms, TokioClock};
pub use entries::{EntryPatch, EntryRecord, EntryStore, NewEntry, DEFAULT_PALETTE};
pub use error::{SessionError, StoreError};
pub use history::{HistoryStore, NewSpinRecord, SpinRecord, HISTORY_DISPLAY_LIMIT};
pub use latency::Latency;
pub use session::{SpinSession, DEFAULT_FRAME, MIN_FRAME};
pub use wheels::{NewWheel, WheelId, WheelPatch, WheelRecord, WheelStore};
