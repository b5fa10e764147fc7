/// Data structures for release catalog entries and the persisted lookup table
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from `<platform>_<channel>` key to its versions, sorted ascending
pub type ReleaseTable = BTreeMap<String, Vec<String>>;

/// One record of the remote catalog. Every field is optional because the
/// endpoint is not trusted to send complete records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRelease {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
impl RawRelease {
    pub fn new(product: &str, channel: &str, version: &str) -> RawRelease {
        RawRelease {
            product: Some(product.to_string()),
            channel: Some(channel.to_string()),
            version: Some(version.to_string()),
        }
    }
}

/// Platform a release targets, derived from the product name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
    Desktop,
}

impl Platform {
    /// Map a catalog product name onto a platform (case-insensitive)
    pub fn from_product(product: &str) -> Option<Platform> {
        match product.to_lowercase().as_str() {
            "firefox" => Some(Platform::Desktop),
            "firefox for android" => Some(Platform::Android),
            "firefox for ios" => Some(Platform::Ios),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the `<platform>_<channel>` grouping key
pub fn release_key(platform: Platform, channel: &str) -> String {
    format!("{}_{}", platform.as_str(), channel.to_lowercase())
}

/// Split a key on its first `_` into (platform, channel)
pub fn split_key(key: &str) -> (&str, &str) {
    key.split_once('_').unwrap_or((key, ""))
}

/// The durable state written by every successful refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedSnapshot {
    pub releases: ReleaseTable,
    pub last_update: i64,
}
