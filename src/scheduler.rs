/// Background refresh of the release catalog
use crate::classify::classify;
use crate::config::RefreshConfig;
use crate::error::ExtensionError;
use crate::release::PersistedSnapshot;
use crate::sort::sort_table;
use crate::storage::{load_last_update, save_snapshot, KeyValueStore};
use serde::Serialize;
use serde_json::Value;

/// Source of the raw release catalog
#[allow(async_fn_in_trait)]
pub trait CatalogFetcher {
    /// Fetch the catalog as a JSON array. Transport errors, non-2xx responses
    /// and non-array bodies are all errors.
    async fn fetch_catalog(&self, url: &str) -> Result<Vec<Value>, ExtensionError>;
}

pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Recurring alarm the background page registers after startup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmSpec {
    #[serde(skip)]
    pub name: String,
    pub delay_in_minutes: f64,
    pub period_in_minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { keys: usize, versions: usize },
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    /// The alarm belongs to someone else
    Ignored,
    /// The stored snapshot is younger than the staleness window
    Fresh,
    Refreshed(RefreshOutcome),
}

/// Everything the background handlers need, built once per background page
pub struct SchedulerContext<S, F, C> {
    pub store: S,
    pub fetcher: F,
    pub clock: C,
    pub config: RefreshConfig,
}

impl<S, F, C> SchedulerContext<S, F, C>
where
    S: KeyValueStore,
    F: CatalogFetcher,
    C: Clock,
{
    pub fn new(store: S, fetcher: F, clock: C, config: RefreshConfig) -> Self {
        SchedulerContext {
            store,
            fetcher,
            clock,
            config,
        }
    }

    /// Refresh immediately, then hand back the alarm to arm
    ///
    /// The alarm's first firing comes after its initial delay, so the startup
    /// refresh does not consume a tick.
    pub async fn on_startup(&self) -> AlarmSpec {
        self.refresh().await;

        AlarmSpec {
            name: self.config.alarm_name.clone(),
            delay_in_minutes: self.config.initial_delay_minutes,
            period_in_minutes: self.config.period_minutes,
        }
    }

    pub async fn on_alarm(&self, name: &str) -> AlarmOutcome {
        if name != self.config.alarm_name {
            return AlarmOutcome::Ignored;
        }

        if self.is_fresh().await {
            log::debug!("Release snapshot is fresh, skipping refresh");
            return AlarmOutcome::Fresh;
        }

        AlarmOutcome::Refreshed(self.refresh().await)
    }

    /// A missing or unreadable timestamp counts as stale
    async fn is_fresh(&self) -> bool {
        let threshold = self.clock.now_ms() - self.config.staleness_window_ms;

        match load_last_update(&self.store).await {
            Ok(Some(last_update)) => last_update > threshold,
            Ok(None) => false,
            Err(e) => {
                log::warn!("Could not read last update time: {}", e);
                false
            }
        }
    }

    /// Fetch, classify, sort and persist the catalog
    ///
    /// Any failure abandons this cycle and leaves the stored snapshot as it was.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.try_refresh().await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Release refresh skipped: {}", e);
                RefreshOutcome::Skipped
            }
        }
    }

    async fn try_refresh(&self) -> Result<RefreshOutcome, ExtensionError> {
        let records = self.fetcher.fetch_catalog(&self.config.catalog_url).await?;
        let report = classify(&records);

        let snapshot = PersistedSnapshot {
            releases: sort_table(report.table),
            last_update: self.clock.now_ms(),
        };
        save_snapshot(&self.store, &snapshot).await?;

        let keys = snapshot.releases.len();
        let versions = snapshot.releases.values().map(Vec::len).sum();
        log::info!(
            "Stored {} versions under {} keys ({} accepted, {} rejected)",
            versions,
            keys,
            report.accepted,
            report.rejected
        );

        Ok(RefreshOutcome::Updated { keys, versions })
    }
}
