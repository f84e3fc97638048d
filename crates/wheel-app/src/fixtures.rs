//! Seed data bundled with the crate.

use crate::entries::{EntryRecord, EntryStore};
use crate::error::StoreError;
use crate::history::{HistoryStore, SpinRecord};
use crate::latency::Latency;
use crate::wheels::{WheelRecord, WheelStore};

pub const ENTRIES_JSON: &str = include_str!("../fixtures/entries.json");
pub const WHEELS_JSON: &str = include_str!("../fixtures/wheels.json");
pub const SPIN_RESULTS_JSON: &str = include_str!("../fixtures/spin_results.json");

pub fn entries() -> Result<Vec<EntryRecord>, StoreError> {
    Ok(serde_json::from_str(ENTRIES_JSON)?)
}

pub fn wheels() -> Result<Vec<WheelRecord>, StoreError> {
    Ok(serde_json::from_str(WHEELS_JSON)?)
}

pub fn spin_results() -> Result<Vec<SpinRecord>, StoreError> {
    Ok(serde_json::from_str(SPIN_RESULTS_JSON)?)
}

impl EntryStore {
    pub fn from_fixtures(latency: Latency) -> Result<Self, StoreError> {
        Ok(Self::with_records(entries()?, latency))
    }
}

impl WheelStore {
    pub fn from_fixtures(latency: Latency) -> Result<Self, StoreError> {
        Ok(Self::with_records(wheels()?, latency))
    }
}

impl HistoryStore {
    pub fn from_fixtures(latency: Latency) -> Result<Self, StoreError> {
        Ok(Self::with_records(spin_results()?, latency))
    }
}
