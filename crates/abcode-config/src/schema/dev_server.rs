use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Local development server that serves the dashboard UI with live reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Probe the dev server at all. When false the bundled UI is always used.
    pub enabled: bool,
    pub url: String,
    /// Reachability probe timeout in milliseconds (valid range: 50-5000).
    pub probe_timeout_ms: u32,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:5173".into(),
            probe_timeout_ms: 500,
        }
    }
}

impl DevServerConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.probe_timeout_ms))
    }
}
