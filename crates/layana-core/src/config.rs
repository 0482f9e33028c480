//! Client Configuration
//!
//! Every field has a default so a partial JSON document (or none at all)
//! yields a usable configuration. Without an API URL the dashboard runs
//! against the in-memory demo backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://api.layana.example/v1`
    pub api_base_url: Option<String>,
    /// Bearer token attached to every request
    pub api_token: Option<String>,
    pub search_debounce_ms: u32,
    pub notification_ttl_ms: u32,
    pub row_height_px: f64,
    pub header_height_px: f64,
    pub min_page_size: u32,
    /// Lines kept by the activity log
    pub log_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_token: None,
            search_debounce_ms: 400,
            notification_ttl_ms: 4000,
            row_height_px: 52.0,
            header_height_px: 48.0,
            min_page_size: 5,
            log_capacity: 500,
        }
    }
}

impl ClientConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Apply URL/token overrides; blank values count as unset.
    pub fn with_overrides(mut self, api_url: Option<&str>, api_token: Option<&str>) -> Self {
        if let Some(url) = non_blank(api_url) {
            self.api_base_url = Some(url);
        }
        if let Some(token) = non_blank(api_token) {
            self.api_token = Some(token);
        }
        self
    }

    pub fn uses_remote_api(&self) -> bool {
        self.api_base_url.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
