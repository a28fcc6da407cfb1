//! Whole-collection (de)serialization helpers.

use pollbox_common::{AppError, AppResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::storage::StorageBackend;

/// Read the JSON array stored under `key`.
///
/// An absent or unparseable value reads as an empty collection; stored
/// corruption is masked, not surfaced.
pub(crate) fn read<T: DeserializeOwned>(
    store: &dyn StorageBackend,
    key: &str,
) -> AppResult<Vec<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(error) => {
            warn!(key, %error, "discarding malformed collection");
            Ok(Vec::new())
        }
    }
}

/// Serialize `items` and rewrite the whole value under `key`.
pub(crate) fn write<T: Serialize>(
    store: &dyn StorageBackend,
    key: &str,
    items: &[T],
) -> AppResult<()> {
    let raw =
        serde_json::to_string(items).map_err(|e| AppError::Serialization(e.to_string()))?;
    store.set(key, &raw)
}
