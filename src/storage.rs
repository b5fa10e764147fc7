/// Storage access for browser.storage.local

use crate::config::{LAST_UPDATE_KEY, RELEASES_KEY};
use crate::error::ExtensionError;
use crate::release::{PersistedSnapshot, ReleaseTable};
use serde_json::{Map, Value};

/// Asynchronous key-value store with last-write-wins semantics
///
/// A single `set` call replaces all of its keys at once; readers never see a
/// partially written batch.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, ExtensionError>;

    async fn set(&self, entries: Map<String, Value>) -> Result<(), ExtensionError>;
}

/// Interpret a stored `releases` value
///
/// Absent and empty tables both mean "no data".
pub fn decode_releases(value: Option<Value>) -> Result<Option<ReleaseTable>, ExtensionError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(None);
    };

    let table: ReleaseTable = serde_json::from_value(value).map_err(|e| ExtensionError::Decode {
        what: RELEASES_KEY,
        message: e.to_string(),
    })?;

    Ok(Some(table).filter(|t| !t.is_empty()))
}

pub async fn load_releases<S: KeyValueStore>(store: &S) -> Result<Option<ReleaseTable>, ExtensionError> {
    decode_releases(store.get(RELEASES_KEY).await?)
}

/// Read the last refresh time in epoch milliseconds
pub async fn load_last_update<S: KeyValueStore>(store: &S) -> Result<Option<i64>, ExtensionError> {
    let value = store.get(LAST_UPDATE_KEY).await?;

    Ok(value.and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))))
}

/// Replace the whole snapshot in a single write
pub async fn save_snapshot<S: KeyValueStore>(
    store: &S,
    snapshot: &PersistedSnapshot,
) -> Result<(), ExtensionError> {
    let value = serde_json::to_value(snapshot).map_err(|source| ExtensionError::Serialize {
        what: "snapshot",
        source,
    })?;

    let Value::Object(entries) = value else {
        return Err(ExtensionError::Decode {
            what: "snapshot",
            message: "snapshot did not serialize to an object".to_string(),
        });
    };

    store.set(entries).await
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_decode_absent_releases() {
        assert_eq!(decode_releases(None).unwrap(), None);
        assert_eq!(decode_releases(Some(Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_decode_empty_releases_is_no_data() {
        assert_eq!(decode_releases(Some(json!({}))).unwrap(), None);
    }

    #[test]
    fn test_decode_malformed_releases() {
        let result = decode_releases(Some(json!(["desktop_release"])));

        assert!(matches!(result, Err(ExtensionError::Decode { what: "releases", .. })));
    }

    #[test]
    fn test_save_and_load_snapshot() {
        let store = MemoryStore::default();
        let mut releases = ReleaseTable::new();
        releases.insert("ios_release".to_string(), vec!["121.0".to_string()]);
        let snapshot = PersistedSnapshot {
            releases: releases.clone(),
            last_update: 1700000000000,
        };

        block_on(save_snapshot(&store, &snapshot)).unwrap();

        assert_eq!(store.writes.get(), 1);
        assert_eq!(block_on(load_releases(&store)).unwrap(), Some(releases));
        assert_eq!(block_on(load_last_update(&store)).unwrap(), Some(1700000000000));
    }

    #[test]
    fn test_last_update_accepts_float_timestamps() {
        let store = MemoryStore::with(json!({ "last_update": 1700000000000.0 }));

        assert_eq!(block_on(load_last_update(&store)).unwrap(), Some(1700000000000));
    }

    #[test]
    fn test_last_update_absent() {
        let store = MemoryStore::default();

        assert_eq!(block_on(load_last_update(&store)).unwrap(), None);
    }
}
