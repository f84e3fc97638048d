use crate::api::types::{Entry, SpinResult};
use crate::core::geometry;

/// Turns the animator's final rotation into a [`SpinResult`].
///
/// Armed with the entry snapshot when a spin starts; resolving consumes the
/// snapshot, so a spin can produce at most one result.
#[derive(Debug, Clone, Default)]
pub struct OutcomeResolver {
    snapshot: Option<Vec<Entry>>,
}

impl OutcomeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the entries a spin started with.
    pub fn arm(&mut self, snapshot: Vec<Entry>) {
        self.snapshot = Some(snapshot);
    }

    pub fn is_armed(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Resolve against the armed snapshot. `None` if nothing is armed
    /// (already resolved, or no spin started).
    ///
    /// # Panics
    /// If armed with an empty snapshot or handed a non-finite rotation.
    /// Spins never start with fewer than two entries and plans are built
    /// from finite values, so either case is a broken caller.
    pub fn resolve(&mut self, final_rotation: f64, now_ms: f64) -> Option<SpinResult> {
        let entries = self.snapshot.take()?;
        let Some((winner_index, winner)) = geometry::resolve(&entries, final_rotation) else {
            unreachable!(
                "resolved {} degrees against {} entries",
                final_rotation,
                entries.len()
            );
        };
        Some(SpinResult {
            winner: winner.clone(),
            winner_index,
            final_rotation_degrees: final_rotation,
            completed_at_ms: now_ms,
        })
    }
}
