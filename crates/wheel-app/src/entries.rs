//! Entry store for the wheel's editable list of names.
//!
//! In-memory, ordered, with simulated latency. Every read hands back owned
//! copies so callers cannot reach into the store's state.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use wheel_engine::{Entry, EntryId};

use crate::clock::unix_ms;
use crate::error::StoreError;
use crate::latency::Latency;

/// Colors handed to entries created without one, cycled by list position.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#7C3AED", "#EC4899", "#F59E0B", "#10B981", "#3B82F6", "#8B5CF6", "#EF4444", "#06B6D4",
];

/// A stored entry: the engine-facing fields plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    #[serde(flatten)]
    pub entry: Entry,
    pub created_at_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEntry {
    pub text: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl NewEntry {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Partial update. `None` fields are left alone; the id can never change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

fn clean_text(text: &str) -> Result<String, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyText);
    }
    Ok(trimmed.to_string())
}

fn check_weight(weight: f64) -> Result<f64, StoreError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(StoreError::InvalidWeight(weight))
    }
}

pub struct EntryStore {
    records: RwLock<Vec<EntryRecord>>,
    latency: Latency,
}

impl EntryStore {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<EntryRecord>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    /// All entries, in wheel order.
    pub async fn list(&self) -> Vec<EntryRecord> {
        self.latency.heavy().await;
        self.records.read().await.clone()
    }

    /// Engine-facing entries, in wheel order.
    pub async fn snapshot(&self) -> Vec<Entry> {
        self.list().await.into_iter().map(|r| r.entry).collect()
    }

    pub async fn get(&self, id: EntryId) -> Result<EntryRecord, StoreError> {
        self.latency.light().await;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.entry.id == id)
            .cloned()
            .ok_or(StoreError::EntryNotFound(id))
    }

    /// Append a new entry. Text is trimmed and must not be empty; the id is
    /// one past the current highest.
    pub async fn create(&self, new: NewEntry) -> Result<EntryRecord, StoreError> {
        self.latency.heavy().await;
        let text = clean_text(&new.text)?;
        let weight = check_weight(new.weight.unwrap_or(1.0))?;

        let mut records = self.records.write().await;
        let next_id = records.iter().map(|r| r.entry.id.0).max().unwrap_or(0) + 1;
        let color = new
            .color
            .unwrap_or_else(|| DEFAULT_PALETTE[records.len() % DEFAULT_PALETTE.len()].to_string());
        let record = EntryRecord {
            entry: Entry {
                id: EntryId(next_id),
                text,
                color,
                weight,
            },
            created_at_ms: unix_ms(),
        };
        records.push(record.clone());
        log::debug!("entry created: #{} '{}'", next_id, record.entry.text);
        Ok(record)
    }

    pub async fn update(&self, id: EntryId, patch: EntryPatch) -> Result<EntryRecord, StoreError> {
        self.latency.heavy().await;
        let text = patch.text.as_deref().map(clean_text).transpose()?;
        let weight = patch.weight.map(check_weight).transpose()?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.entry.id == id)
            .ok_or(StoreError::EntryNotFound(id))?;
        if let Some(text) = text {
            record.entry.text = text;
        }
        if let Some(color) = patch.color {
            record.entry.color = color;
        }
        if let Some(weight) = weight {
            record.entry.weight = weight;
        }
        log::debug!("entry updated: #{}", id);
        Ok(record.clone())
    }

    /// Remove an entry, returning what was removed.
    pub async fn delete(&self, id: EntryId) -> Result<EntryRecord, StoreError> {
        self.latency.light().await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.entry.id == id)
            .ok_or(StoreError::EntryNotFound(id))?;
        let removed = records.remove(index);
        log::debug!("entry deleted: #{}", id);
        Ok(removed)
    }

    pub async fn clear(&self) {
        self.latency.light().await;
        self.records.write().await.clear();
        log::debug!("entries cleared");
    }

    /// Put entries in the given order. `order` must be a permutation of the
    /// current ids.
    pub async fn reorder(&self, order: &[EntryId]) -> Result<Vec<EntryRecord>, StoreError> {
        self.latency.light().await;
        let mut records = self.records.write().await;
        if order.len() != records.len() {
            return Err(StoreError::InvalidOrder);
        }
        let mut remaining = records.clone();
        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            let index = remaining
                .iter()
                .position(|r| r.entry.id == *id)
                .ok_or(StoreError::InvalidOrder)?;
            reordered.push(remaining.swap_remove(index));
        }
        *records = reordered;
        Ok(records.clone())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EntryStore {
        EntryStore::new(Latency::none())
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_trims() {
        let store = store();
        let a = store.create(NewEntry::text("  Alice ")).await.unwrap();
        let b = store.create(NewEntry::text("Bob")).await.unwrap();
        assert_eq!(a.entry.id, EntryId(1));
        assert_eq!(b.entry.id, EntryId(2));
        assert_eq!(a.entry.text, "Alice");
        assert_eq!(a.entry.weight, 1.0);
    }

    #[tokio::test]
    async fn create_cycles_palette_unless_color_given() {
        let store = store();
        let a = store.create(NewEntry::text("a")).await.unwrap();
        let b = store.create(NewEntry::text("b")).await.unwrap();
        let c = store
            .create(NewEntry { text: "c".into(), color: Some("#000000".into()), weight: None })
            .await
            .unwrap();
        assert_eq!(a.entry.color, DEFAULT_PALETTE[0]);
        assert_eq!(b.entry.color, DEFAULT_PALETTE[1]);
        assert_eq!(c.entry.color, "#000000");
    }

    #[tokio::test]
    async fn create_rejects_blank_text_and_bad_weight() {
        let store = store();
        assert!(matches!(store.create(NewEntry::text("   ")).await, Err(StoreError::EmptyText)));
        let bad = NewEntry { text: "x".into(), color: None, weight: Some(0.0) };
        assert!(matches!(store.create(bad).await, Err(StoreError::InvalidWeight(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn id_follows_current_maximum() {
        let store = store();
        store.create(NewEntry::text("a")).await.unwrap();
        let b = store.create(NewEntry::text("b")).await.unwrap();
        store.delete(b.entry.id).await.unwrap();
        let c = store.create(NewEntry::text("c")).await.unwrap();
        assert_eq!(c.entry.id, EntryId(2));
    }

    #[tokio::test]
    async fn get_and_update() {
        let store = store();
        let a = store.create(NewEntry::text("Alice")).await.unwrap();
        let patch = EntryPatch { text: Some(" Alicia ".into()), ..Default::default() };
        let updated = store.update(a.entry.id, patch).await.unwrap();
        assert_eq!(updated.entry.text, "Alicia");
        assert_eq!(updated.entry.color, a.entry.color);
        assert_eq!(store.get(a.entry.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = store();
        let missing = EntryId(42);
        assert!(matches!(store.get(missing).await, Err(StoreError::EntryNotFound(id)) if id == missing));
        assert!(matches!(
            store.update(missing, EntryPatch::default()).await,
            Err(StoreError::EntryNotFound(_))
        ));
        assert!(matches!(store.delete(missing).await, Err(StoreError::EntryNotFound(_))));
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let store = store();
        let a = store.create(NewEntry::text("a")).await.unwrap();
        store.create(NewEntry::text("b")).await.unwrap();
        let removed = store.delete(a.entry.id).await.unwrap();
        assert_eq!(removed, a);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn list_returns_copies() {
        let store = store();
        store.create(NewEntry::text("a")).await.unwrap();
        let mut copy = store.list().await;
        copy[0].entry.text = "mutated".into();
        copy.clear();
        assert_eq!(store.list().await[0].entry.text, "a");
    }

    #[tokio::test]
    async fn reorder_requires_a_permutation() {
        let store = store();
        for t in ["a", "b", "c"] {
            store.create(NewEntry::text(t)).await.unwrap();
        }
        let order = [EntryId(3), EntryId(1), EntryId(2)];
        let reordered = store.reorder(&order).await.unwrap();
        let texts: Vec<_> = reordered.iter().map(|r| r.entry.text.as_str()).collect();
        assert_eq!(texts, ["c", "a", "b"]);

        assert!(matches!(store.reorder(&[EntryId(1)]).await, Err(StoreError::InvalidOrder)));
        assert!(matches!(
            store.reorder(&[EntryId(1), EntryId(1), EntryId(2)]).await,
            Err(StoreError::InvalidOrder)
        ));
        assert_eq!(store.snapshot().await[0].text, "c");
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let store = store();
        store.create(NewEntry::text("a")).await.unwrap();
        store.clear().await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn calls_pay_simulated_latency() {
        let store = EntryStore::new(Latency::default());
        let start = tokio::time::Instant::now();
        store.list().await;
        assert_eq!(start.elapsed().as_millis(), 300);
        let _ = store.get(EntryId(1)).await;
        assert_eq!(start.elapsed().as_millis(), 500);
    }
}
