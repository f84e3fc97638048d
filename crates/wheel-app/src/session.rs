//! Spin session: one wheel wired to the entry and history stores.
//!
//! The session keeps the engine's entry list in step with the entry store,
//! drives spins frame by frame on tokio time, and hands each winner to the
//! history store.

use std::sync::Arc;
use std::time::Duration;

use wheel_engine::{
    EntryId, SpinRefused, SpinResult, SpinRng, Wheel, WheelConfig, WheelEvent, Xorshift64,
};

use crate::clock::TokioClock;
use crate::entries::{EntryPatch, EntryRecord, EntryStore, NewEntry};
use crate::error::SessionError;
use crate::history::{HistoryStore, NewSpinRecord, SpinRecord};
use crate::wheels::{WheelId, WheelRecord};

/// Default frame interval, roughly 60 Hz.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Shortest frame interval accepted; anything below is raised to this.
pub const MIN_FRAME: Duration = Duration::from_millis(1);

pub struct SpinSession<R: SpinRng = Xorshift64> {
    wheel: Wheel<TokioClock, R>,
    entries: Arc<EntryStore>,
    history: Arc<HistoryStore>,
    wheel_id: WheelId,
    frame: Duration,
    /// Completed spin not yet written to history.
    unrecorded: Option<SpinResult>,
}

impl<R: SpinRng> SpinSession<R> {
    pub fn new(
        wheel: Wheel<TokioClock, R>,
        entries: Arc<EntryStore>,
        history: Arc<HistoryStore>,
        wheel_id: WheelId,
    ) -> Self {
        Self {
            wheel,
            entries,
            history,
            wheel_id,
            frame: DEFAULT_FRAME,
            unrecorded: None,
        }
    }

    /// Build a session for a saved wheel, using its spin duration.
    pub fn for_wheel(
        record: &WheelRecord,
        rng: R,
        entries: Arc<EntryStore>,
        history: Arc<HistoryStore>,
    ) -> Result<Self, SessionError> {
        let wheel = Wheel::new(record.config(), TokioClock::new(), rng)?;
        Ok(Self::new(wheel, entries, history, record.id))
    }

    /// Frame interval for the spin loop, clamped to at least [`MIN_FRAME`].
    pub fn with_frame_interval(mut self, frame: Duration) -> Self {
        self.frame = frame.max(MIN_FRAME);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame
    }

    /// True while a spin is in flight or its result has not been recorded.
    pub fn is_busy(&self) -> bool {
        self.wheel.is_spinning() || self.unrecorded.is_some()
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SpinRefused::AlreadySpinning.into());
        }
        Ok(())
    }

    pub fn wheel(&self) -> &Wheel<TokioClock, R> {
        &self.wheel
    }

    pub fn wheel_id(&self) -> WheelId {
        self.wheel_id
    }

    /// Pull the entry list from the store into the engine.
    pub async fn refresh_entries(&mut self) -> Result<(), SessionError> {
        let snapshot = self.entries.snapshot().await;
        self.wheel.set_entries(snapshot)?;
        Ok(())
    }

    pub async fn add_entry(&mut self, new: NewEntry) -> Result<EntryRecord, SessionError> {
        self.ensure_idle()?;
        let record = self.entries.create(new).await?;
        self.refresh_entries().await?;
        Ok(record)
    }

    pub async fn update_entry(
        &mut self,
        id: EntryId,
        patch: EntryPatch,
    ) -> Result<EntryRecord, SessionError> {
        self.ensure_idle()?;
        let record = self.entries.update(id, patch).await?;
        self.refresh_entries().await?;
        Ok(record)
    }

    pub async fn remove_entry(&mut self, id: EntryId) -> Result<EntryRecord, SessionError> {
        self.ensure_idle()?;
        let removed = self.entries.delete(id).await?;
        self.refresh_entries().await?;
        Ok(removed)
    }

    pub async fn clear_entries(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.entries.clear().await;
        self.refresh_entries().await
    }

    pub async fn reorder_entries(&mut self, order: &[EntryId]) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.entries.reorder(order).await?;
        self.refresh_entries().await
    }

    /// Switch to another saved wheel. Takes effect from the next spin.
    pub fn apply_wheel(&mut self, record: &WheelRecord) -> Result<(), SessionError> {
        self.set_config(record.config())?;
        self.wheel_id = record.id;
        Ok(())
    }

    pub fn set_config(&mut self, config: WheelConfig) -> Result<(), SessionError> {
        self.wheel.set_config(config)?;
        Ok(())
    }

    /// Spin to completion and record the winner.
    ///
    /// Cancel-safe: if an earlier call was dropped mid-spin, this call picks
    /// that spin up, drives it to rest and records it instead of starting a
    /// new one. A result is written to history exactly once.
    pub async fn spin(&mut self) -> Result<SpinRecord, SessionError> {
        if !self.is_busy() {
            let started = self.wheel.start_spin();
            self.flush_events();
            started?;
        } else {
            log::debug!("wheel {}: resuming an interrupted spin", self.wheel_id);
        }

        let result = loop {
            if let Some(result) = &self.unrecorded {
                break result.clone();
            }
            tokio::time::sleep(self.frame).await;
            self.unrecorded = self.wheel.update();
        };
        self.flush_events();

        let record = self
            .history
            .record(NewSpinRecord::from_result(self.wheel_id, result))
            .await;
        self.unrecorded = None;
        Ok(record)
    }

    /// Most recent results, oldest first.
    pub async fn history(&self) -> Vec<SpinRecord> {
        self.history.recent().await
    }

    pub async fn clear_history(&self) {
        self.history.clear().await;
    }

    fn flush_events(&mut self) {
        for event in self.wheel.drain_events() {
            match &event {
                WheelEvent::SpinRefused { reason } => log::warn!("wheel {}: {}", self.wheel_id, reason),
                other => log::trace!("wheel {}: {:?}", self.wheel_id, other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::Latency;
    use wheel_engine::SequenceRng;

    fn stores() -> (Arc<EntryStore>, Arc<HistoryStore>) {
        (
            Arc::new(EntryStore::from_fixtures(Latency::none()).unwrap()),
            Arc::new(HistoryStore::new(Latency::none())),
        )
    }

    fn session<R: SpinRng>(rng: R) -> SpinSession<R> {
        let (entries, history) = stores();
        let wheel = Wheel::new(WheelConfig::default(), TokioClock::new(), rng).unwrap();
        SpinSession::new(wheel, entries, history, WheelId(1))
    }

    #[tokio::test(start_paused = true)]
    async fn spin_records_the_pinned_winner() {
        // 4 turns + 90 deg: pointer at 270, segment 4 of 6.
        let mut session = session(SequenceRng::new([0.0, 0.25]));
        session.refresh_entries().await.unwrap();

        let record = session.spin().await.unwrap();
        assert_eq!(record.winner.text, "Hiking Trip");
        assert_eq!(record.final_rotation_degrees, 1530.0);
        assert_eq!(record.wheel_id, WheelId(1));
        assert_eq!(session.wheel().rotation(), 1530.0);
        assert!(!session.wheel().is_spinning());
        assert_eq!(session.history().await, vec![record]);
    }

    #[tokio::test(start_paused = true)]
    async fn spin_takes_the_configured_duration() {
        let mut session = session(Xorshift64::new(5));
        session.refresh_entries().await.unwrap();
        let start = tokio::time::Instant::now();
        session.spin().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(3000));
        assert!(elapsed < Duration::from_millis(3000) + DEFAULT_FRAME * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn refused_spin_records_nothing() {
        let mut session = session(Xorshift64::new(5));
        session.clear_entries().await.unwrap();
        session.add_entry(NewEntry::text("Solo")).await.unwrap();

        let err = session.spin().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Refused(SpinRefused::NotEnoughEntries { count: 1 })
        ));
        assert!(session.history().await.is_empty());
        assert_eq!(session.wheel().rotation(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn store_errors_leave_the_wheel_alone() {
        let mut session = session(Xorshift64::new(5));
        session.refresh_entries().await.unwrap();
        let before = session.wheel().entries().to_vec();

        assert!(matches!(
            session.remove_entry(EntryId(99)).await,
            Err(SessionError::Store(_))
        ));
        assert!(session.add_entry(NewEntry::text("   ")).await.is_err());
        assert_eq!(session.wheel().entries(), before.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn entry_edits_flow_into_the_wheel() {
        let mut session = session(Xorshift64::new(5));
        session.refresh_entries().await.unwrap();

        let added = session.add_entry(NewEntry::text("Bowling")).await.unwrap();
        assert_eq!(session.wheel().entries().len(), 7);

        session.remove_entry(EntryId(1)).await.unwrap();
        assert_eq!(session.wheel().entries()[0].text, "Movie Marathon");

        let patch = EntryPatch { text: Some("Bowling Night".into()), ..Default::default() };
        session.update_entry(added.entry.id, patch).await.unwrap();
        assert_eq!(session.wheel().entries()[5].text, "Bowling Night");

        let mut order: Vec<_> = session.wheel().entries().iter().map(|e| e.id).collect();
        order.reverse();
        session.reorder_entries(&order).await.unwrap();
        assert_eq!(session.wheel().entries()[0].text, "Bowling Night");
    }

    #[tokio::test(start_paused = true)]
    async fn apply_wheel_changes_duration_and_tag() {
        let (entries, history) = stores();
        let wheels = crate::fixtures::wheels().unwrap();
        let mut session =
            SpinSession::for_wheel(&wheels[0], Xorshift64::new(9), entries, history).unwrap();
        session.refresh_entries().await.unwrap();

        session.apply_wheel(&wheels[1]).unwrap();
        assert_eq!(session.wheel_id(), WheelId(2));
        assert_eq!(session.wheel().config().spin_duration_ms, 5000.0);

        let start = tokio::time::Instant::now();
        let record = session.spin().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(5000));
        assert_eq!(record.wheel_id, WheelId(2));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_spin_is_resumed_and_recorded_once() {
        let mut session = session(SequenceRng::new([0.0, 0.25]));
        session.refresh_entries().await.unwrap();

        let cut = tokio::time::timeout(Duration::from_secs(1), session.spin()).await;
        assert!(cut.is_err());
        assert!(session.wheel().is_spinning());
        let plan = *session.wheel().current_spin().unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        let record = session.spin().await.unwrap();
        assert_eq!(record.final_rotation_degrees, plan.final_rotation);
        assert_eq!(record.winner.text, "Hiking Trip");
        assert!(!session.is_busy());
        assert_eq!(session.history().await.len(), 1);

        // The next call starts a fresh spin.
        let next = session.spin().await.unwrap();
        assert!(next.final_rotation_degrees > record.final_rotation_degrees);
        assert_eq!(session.history().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_edits_wait_for_an_interrupted_spin() {
        let mut session = session(Xorshift64::new(5));
        session.refresh_entries().await.unwrap();
        let _ = tokio::time::timeout(Duration::from_millis(500), session.spin()).await;

        let err = session.add_entry(NewEntry::text("Bowling")).await.unwrap_err();
        assert!(matches!(err, SessionError::Refused(SpinRefused::AlreadySpinning)));
        assert!(matches!(
            session.remove_entry(EntryId(1)).await,
            Err(SessionError::Refused(SpinRefused::AlreadySpinning))
        ));
        assert!(session.clear_entries().await.is_err());
        assert_eq!(session.entries.len().await, 6);
        assert_eq!(session.wheel().entries().len(), 6);

        session.spin().await.unwrap();
        session.add_entry(NewEntry::text("Bowling")).await.unwrap();
        assert_eq!(session.entries.len().await, 7);
        assert_eq!(session.wheel().entries().len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_frame_interval_is_clamped() {
        let mut session = session(Xorshift64::new(5)).with_frame_interval(Duration::ZERO);
        assert_eq!(session.frame_interval(), MIN_FRAME);
        session.refresh_entries().await.unwrap();
        let start = tokio::time::Instant::now();
        session.spin().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn history_is_capped_and_clearable() {
        let mut session = session(Xorshift64::new(17));
        session.refresh_entries().await.unwrap();
        for _ in 0..12 {
            session.spin().await.unwrap();
        }
        assert_eq!(session.history().await.len(), 10);
        session.clear_history().await;
        assert!(session.history().await.is_empty());
    }
}
