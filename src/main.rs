//! Layana Admin Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod store;
mod views;

use std::sync::Arc;

use app::App;
use leptos::prelude::*;
use tracing::Level;

use crate::context::load_config;

const APP_NAME: &str = "layana-admin";

fn console_sink(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = load_config();
    if let Err(e) = rolling_logger::init_logger(APP_NAME, config.log_capacity, Some(Arc::new(console_sink))) {
        web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
    }
    if let Some(e) = config_error {
        let _ = rolling_logger::error(&format!("ignoring invalid LAYANA_CONFIG_JSON: {}", e));
    }
    let _ = rolling_logger::info("dashboard starting");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
