//! Persisted tour progress

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dom::KeyValueStore;
use crate::error::UiError;

/// What the tour remembers between page loads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourRecord {
    /// Tour was finished or dismissed
    #[serde(default)]
    pub seen: bool,
    /// Step to resume at when the tour continues on another page
    #[serde(default)]
    pub step: Option<usize>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Missing or unreadable entries load as a fresh record.
pub fn load_tour_record(store: &impl KeyValueStore, key: &str) -> TourRecord {
    let Some(raw) = store.get(key) else {
        return TourRecord::default();
    };
    match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(e) => {
            warn!("Discarding unreadable tour record under {key}: {e}");
            TourRecord::default()
        }
    }
}

pub fn save_tour_record(
    store: &impl KeyValueStore,
    key: &str,
    record: &TourRecord,
) -> Result<(), UiError> {
    let raw = serde_json::to_string(record).map_err(|e| UiError::Storage(e.to_string()))?;
    store.set(key, &raw)
}
