use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Readiness handshake settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How long to wait for `webviewReady` before delivering anyway
    /// (valid range: 100-10000).
    pub ready_grace_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            ready_grace_ms: 1000,
        }
    }
}

impl SyncConfig {
    pub fn ready_grace(&self) -> Duration {
        Duration::from_millis(u64::from(self.ready_grace_ms))
    }
}
