//! Spin history: append-only log of winners.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use wheel_engine::{Entry, SpinResult};

use crate::clock::unix_ms;
use crate::latency::Latency;
use crate::wheels::WheelId;

/// How many results the history panel shows.
pub const HISTORY_DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub id: u32,
    pub wheel_id: WheelId,
    pub winner: Entry,
    pub final_rotation_degrees: f64,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSpinRecord {
    pub wheel_id: WheelId,
    pub winner: Entry,
    pub final_rotation_degrees: f64,
}

impl NewSpinRecord {
    pub fn from_result(wheel_id: WheelId, result: SpinResult) -> Self {
        Self {
            wheel_id,
            winner: result.winner,
            final_rotation_degrees: result.final_rotation_degrees,
        }
    }
}

pub struct HistoryStore {
    records: RwLock<Vec<SpinRecord>>,
    latency: Latency,
}

impl HistoryStore {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<SpinRecord>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    /// Every record, oldest first.
    pub async fn list(&self) -> Vec<SpinRecord> {
        self.latency.light().await;
        self.records.read().await.clone()
    }

    /// The last [`HISTORY_DISPLAY_LIMIT`] records, oldest first.
    pub async fn recent(&self) -> Vec<SpinRecord> {
        self.latency.light().await;
        let records = self.records.read().await;
        let skip = records.len().saturating_sub(HISTORY_DISPLAY_LIMIT);
        records[skip..].to_vec()
    }

    pub async fn by_wheel(&self, wheel_id: WheelId) -> Vec<SpinRecord> {
        self.latency.light().await;
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.wheel_id == wheel_id)
            .cloned()
            .collect()
    }

    pub async fn record(&self, new: NewSpinRecord) -> SpinRecord {
        self.latency.light().await;
        let mut records = self.records.write().await;
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = SpinRecord {
            id: next_id,
            wheel_id: new.wheel_id,
            winner: new.winner,
            final_rotation_degrees: new.final_rotation_degrees,
            timestamp_ms: unix_ms(),
        };
        records.push(record.clone());
        log::debug!("spin #{} recorded: '{}'", next_id, record.winner.text);
        record
    }

    pub async fn clear(&self) {
        self.latency.light().await;
        self.records.write().await.clear();
        log::debug!("history cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(wheel: u32, text: &str) -> NewSpinRecord {
        NewSpinRecord {
            wheel_id: WheelId(wheel),
            winner: Entry::new(1, text, "#06B6D4"),
            final_rotation_degrees: 1500.0,
        }
    }

    #[tokio::test]
    async fn record_appends_with_sequential_ids() {
        let store = HistoryStore::new(Latency::none());
        let a = store.record(spin(1, "a")).await;
        let b = store.record(spin(1, "b")).await;
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.list().await, vec![a, b]);
    }

    #[tokio::test]
    async fn recent_is_capped_at_ten_newest() {
        let store = HistoryStore::new(Latency::none());
        for i in 0..15 {
            store.record(spin(1, &format!("spin {}", i))).await;
        }
        let recent = store.recent().await;
        assert_eq!(recent.len(), HISTORY_DISPLAY_LIMIT);
        assert_eq!(recent[0].winner.text, "spin 5");
        assert_eq!(recent[9].winner.text, "spin 14");
        assert_eq!(store.list().await.len(), 15);
    }

    #[tokio::test]
    async fn filters_by_wheel() {
        let store = HistoryStore::new(Latency::none());
        store.record(spin(1, "a")).await;
        store.record(spin(2, "b")).await;
        store.record(spin(1, "c")).await;
        let texts: Vec<_> = store
            .by_wheel(WheelId(1))
            .await
            .into_iter()
            .map(|r| r.winner.text)
            .collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let store = HistoryStore::new(Latency::none());
        store.record(spin(1, "a")).await;
        store.clear().await;
        assert!(store.recent().await.is_empty());
        let next = store.record(spin(1, "b")).await;
        assert_eq!(next.id, 1);
    }

    #[test]
    fn from_result_keeps_winner_and_rotation() {
        let result = SpinResult {
            winner: Entry::new(4, "Dave", "#10B981"),
            winner_index: 3,
            final_rotation_degrees: 450.0,
            completed_at_ms: 3000.0,
        };
        let new = NewSpinRecord::from_result(WheelId(2), result);
        assert_eq!(new.winner.text, "Dave");
        assert_eq!(new.final_rotation_degrees, 450.0);
        assert_eq!(new.wheel_id, WheelId(2));
    }
}
