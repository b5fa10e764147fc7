/// Background page event handlers

use crate::config::RefreshConfig;
use crate::host::{self, BrowserFetcher, BrowserStorage, SystemClock};
use crate::message::Message;
use crate::scheduler::SchedulerContext;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

type BackgroundContext = SchedulerContext<BrowserStorage, BrowserFetcher, SystemClock>;

thread_local! {
    static CONTEXT: Rc<BackgroundContext> = Rc::new(SchedulerContext::new(
        BrowserStorage,
        BrowserFetcher,
        SystemClock,
        RefreshConfig::default(),
    ));
}

fn context() -> Rc<BackgroundContext> {
    CONTEXT.with(Rc::clone)
}

/// `runtime.onInstalled` / `runtime.onStartup`
pub async fn on_startup() {
    let alarm = context().on_startup().await;

    match host::register_alarm(&alarm) {
        Ok(()) => log::info!(
            "Scheduled '{}' every {} minutes",
            alarm.name,
            alarm.period_in_minutes
        ),
        Err(e) => log::warn!("Failed to schedule updates: {}", e),
    }
}

/// `alarms.onAlarm`
pub async fn on_alarm(name: String) {
    let outcome = context().on_alarm(&name).await;
    log::debug!("Alarm '{}' handled: {:?}", name, outcome);
}

/// `runtime.onMessage`; unrecognized messages get no reply
pub fn on_message(data: JsValue) -> JsValue {
    let message = serde_wasm_bindgen::from_value(data)
        .ok()
        .and_then(Message::parse);

    match message {
        Some(message) => {
            let ack = message.ack();
            match message {
                Message::OpenTab { url } => spawn_local(async move {
                    if let Err(e) = host::open_tab(&url).await {
                        log::warn!("{}", e);
                    }
                }),
            }
            JsValue::from_str(ack)
        }
        None => JsValue::UNDEFINED,
    }
}
