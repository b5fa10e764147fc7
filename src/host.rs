/// Browser-backed implementations of the storage, network, clock and tab collaborators

use crate::error::ExtensionError;
use crate::scheduler::{AlarmSpec, CatalogFetcher, Clock};
use crate::storage::KeyValueStore;
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/browser.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(entries: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn fetchCatalog(url: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn createAlarm(name: &str, info: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;
}

/// `browser.storage.local`
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, ExtensionError> {
        let value = getStorage(key)
            .await
            .map_err(|e| ExtensionError::Storage(format!("{:?}", e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value)
            .map(Some)
            .map_err(|e| ExtensionError::Decode {
                what: "storage value",
                message: format!("{:?}", e),
            })
    }

    async fn set(&self, entries: Map<String, Value>) -> Result<(), ExtensionError> {
        let entries_js = to_js(&entries)?;

        setStorage(entries_js)
            .await
            .map_err(|e| ExtensionError::Storage(format!("{:?}", e)))
    }
}

/// Catalog download through `fetch`
pub struct BrowserFetcher;

impl CatalogFetcher for BrowserFetcher {
    async fn fetch_catalog(&self, url: &str) -> Result<Vec<Value>, ExtensionError> {
        let body = fetchCatalog(url)
            .await
            .map_err(|e| ExtensionError::Fetch(format!("{:?}", e)))?;

        serde_wasm_bindgen::from_value(body)
            .map_err(|e| ExtensionError::Fetch(format!("catalog is not a JSON array: {:?}", e)))
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// Plain JS objects rather than `Map`s, as storage and the alarms API expect
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, ExtensionError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ExtensionError::Bridge(format!("Failed to serialize: {:?}", e)))
}

pub fn register_alarm(alarm: &AlarmSpec) -> Result<(), ExtensionError> {
    let info = to_js(alarm)?;

    createAlarm(&alarm.name, info)
        .map_err(|e| ExtensionError::Bridge(format!("Failed to create alarm: {:?}", e)))
}

pub async fn open_tab(url: &str) -> Result<(), ExtensionError> {
    createTab(url)
        .await
        .map_err(|e| ExtensionError::Bridge(format!("Failed to open tab: {:?}", e)))
}
