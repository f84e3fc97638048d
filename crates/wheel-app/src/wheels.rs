//! Saved wheel presets.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use wheel_engine::{WheelConfig, MAX_SPIN_DURATION_MS, MIN_SPIN_DURATION_MS};

use crate::clock::unix_ms;
use crate::error::StoreError;
use crate::latency::Latency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WheelId(pub u32);

impl std::fmt::Display for WheelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelRecord {
    pub id: WheelId,
    pub name: String,
    pub spin_duration_ms: f64,
    pub created_at_ms: i64,
}

impl WheelRecord {
    /// Engine config for this preset, defaults elsewhere.
    pub fn config(&self) -> WheelConfig {
        WheelConfig::default().with_spin_duration(self.spin_duration_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWheel {
    pub name: String,
    #[serde(default)]
    pub spin_duration_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WheelPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spin_duration_ms: Option<f64>,
}

fn clean_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyText);
    }
    Ok(trimmed.to_string())
}

fn check_duration(ms: f64) -> Result<f64, StoreError> {
    if ms.is_finite() && (MIN_SPIN_DURATION_MS..=MAX_SPIN_DURATION_MS).contains(&ms) {
        Ok(ms)
    } else {
        Err(StoreError::InvalidDuration(ms))
    }
}

pub struct WheelStore {
    records: RwLock<Vec<WheelRecord>>,
    latency: Latency,
}

impl WheelStore {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    pub fn with_records(records: Vec<WheelRecord>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    pub async fn list(&self) -> Vec<WheelRecord> {
        self.latency.heavy().await;
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: WheelId) -> Result<WheelRecord, StoreError> {
        self.latency.light().await;
        self.records
            .read()
            .await
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(StoreError::WheelNotFound(id))
    }

    pub async fn create(&self, new: NewWheel) -> Result<WheelRecord, StoreError> {
        self.latency.heavy().await;
        let name = clean_name(&new.name)?;
        let spin_duration_ms = check_duration(
            new.spin_duration_ms
                .unwrap_or(WheelConfig::default().spin_duration_ms),
        )?;

        let mut records = self.records.write().await;
        let next_id = records.iter().map(|w| w.id.0).max().unwrap_or(0) + 1;
        let record = WheelRecord {
            id: WheelId(next_id),
            name,
            spin_duration_ms,
            created_at_ms: unix_ms(),
        };
        records.push(record.clone());
        log::debug!("wheel created: #{} '{}'", next_id, record.name);
        Ok(record)
    }

    pub async fn update(&self, id: WheelId, patch: WheelPatch) -> Result<WheelRecord, StoreError> {
        self.latency.heavy().await;
        let name = patch.name.as_deref().map(clean_name).transpose()?;
        let duration = patch.spin_duration_ms.map(check_duration).transpose()?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::WheelNotFound(id))?;
        if let Some(name) = name {
            record.name = name;
        }
        if let Some(ms) = duration {
            record.spin_duration_ms = ms;
        }
        Ok(record.clone())
    }

    pub async fn delete(&self, id: WheelId) -> Result<WheelRecord, StoreError> {
        self.latency.light().await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|w| w.id == id)
            .ok_or(StoreError::WheelNotFound(id))?;
        log::debug!("wheel deleted: #{}", id);
        Ok(records.remove(index))
    }
}
