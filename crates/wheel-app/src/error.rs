use wheel_engine::{ConfigError, EntryId, SpinRefused};

use crate::wheels::WheelId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("entry not found: {0}")]
    EntryNotFound(EntryId),
    #[error("wheel not found: {0}")]
    WheelNotFound(WheelId),
    #[error("text must not be empty")]
    EmptyText,
    #[error("weight must be positive and finite, got {0}")]
    InvalidWeight(f64),
    #[error("spin duration {0} ms is out of range")]
    InvalidDuration(f64),
    #[error("reorder must list every current entry exactly once")]
    InvalidOrder,
    #[error("fixture data is malformed: {0}")]
    Fixture(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("spin refused: {0}")]
    Refused(#[from] SpinRefused),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
