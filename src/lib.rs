/// Firefox Release Notes - browser extension for jumping to release notes
/// Built with Rust + WASM + Yew

mod background;
mod classify;
mod config;
mod error;
mod host;
mod message;
mod release;
mod scheduler;
mod selector;
mod sort;
mod storage;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook and logging for both the popup and the background page
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::log_level()));
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Background page entry points, wired to browser events in background_main.js
#[wasm_bindgen]
pub async fn handle_startup() {
    background::on_startup().await;
}

#[wasm_bindgen]
pub async fn handle_alarm(name: String) {
    background::on_alarm(name).await;
}

#[wasm_bindgen]
pub fn handle_message(data: JsValue) -> JsValue {
    background::on_message(data)
}
