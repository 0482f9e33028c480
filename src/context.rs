//! Application Context
//!
//! Shared handles provided via Leptos Context API. Backends are not `Send`
//! so they sit in local storage behind a `StoredValue`.

use std::time::Duration;

use leptos::prelude::*;

use layana_core::ClientConfig;

use crate::api::Backends;
use crate::store::{store_dismiss_notice, store_push_notice, AppStore, NoticeLevel};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<ClientConfig>,
    backends: StoredValue<Backends, LocalStorage>,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(config: ClientConfig, backends: Backends, store: AppStore) -> Self {
        Self {
            config: StoredValue::new(config),
            backends: StoredValue::new_local(backends),
            store,
        }
    }

    pub fn backends(&self) -> Backends {
        self.backends.get_value()
    }

    /// Show a toast that expires after the configured TTL
    pub fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Error => tracing::warn!(notice = %message, "notification"),
            _ => tracing::debug!(notice = %message, "notification"),
        }
        let id = store_push_notice(&self.store, level, message);
        let ttl = self.config.with_value(|c| c.notification_ttl_ms);
        let store = self.store;
        set_timeout(
            move || store_dismiss_notice(&store, id),
            Duration::from_millis(u64::from(ttl)),
        );
    }

    pub fn dismiss(&self, id: u64) {
        store_dismiss_notice(&self.store, id);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Configuration baked in at build time; wasm builds have no process
/// environment to read at runtime. An unparsable JSON document falls back
/// to defaults and is handed back so it can be logged once logging is up.
pub fn load_config() -> (ClientConfig, Option<serde_json::Error>) {
    let (config, error) = match option_env!("LAYANA_CONFIG_JSON").map(ClientConfig::from_json) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (ClientConfig::default(), Some(e)),
        None => (ClientConfig::default(), None),
    };
    let config =
        config.with_overrides(option_env!("LAYANA_API_URL"), option_env!("LAYANA_API_TOKEN"));
    (config, error)
}
