use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which saves re-sync the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Language identifiers whose saves trigger a sync.
    pub languages: Vec<String>,
    /// Coalescing window for filesystem events, in milliseconds (0-5000).
    pub debounce_ms: u32,
    /// Watch the workspace for saves. The command console works either way.
    pub watch_workspace: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            languages: vec!["python".into()],
            debounce_ms: 300,
            watch_workspace: true,
        }
    }
}

impl TriggerConfig {
    /// Whether a save of a document with this language id should sync.
    pub fn matches(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }
}
