/// Compile-time configuration for the refresh cycle and the popup

/// Mozilla's Nucleus release catalog
pub const CATALOG_URL: &str = "https://nucleus.mozilla.org/rna/releases/?format=json";

pub const ALARM_NAME: &str = "update-firefox-release-info";

/// Storage keys in `browser.storage.local`
pub const RELEASES_KEY: &str = "releases";
pub const LAST_UPDATE_KEY: &str = "last_update";

pub const NOTES_BASE_URL: &str = "https://www.mozilla.org/en-US/firefox/";

/// Aurora builds before this major version use the legacy notes page
pub const AURORA_NOTES_BEFORE_MAJOR: u64 = 29;

/// Words that may not appear as a `_`-delimited token of a release key
pub const BANNED_WORDS: [&str; 2] = ["thunderbird", "os"];

pub const MINUTE_MS: i64 = 60 * 1000;

/// Settings for the background refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    pub catalog_url: String,
    pub alarm_name: String,
    pub period_minutes: f64,
    pub initial_delay_minutes: f64,
    /// A snapshot younger than this is not refreshed by the alarm
    pub staleness_window_ms: i64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            catalog_url: CATALOG_URL.to_string(),
            alarm_name: ALARM_NAME.to_string(),
            period_minutes: 60.0,
            initial_delay_minutes: 60.0,
            // One minute shy of the period so an hourly alarm always finds the snapshot stale
            staleness_window_ms: 59 * MINUTE_MS,
        }
    }
}

/// Log level for `wasm-logger`
pub fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}
