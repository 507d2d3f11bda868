//! Dashboard panel configuration.

use serde::{Deserialize, Serialize};

/// Panel window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Fixed identifier of the panel type.
    pub view_type: String,
    pub title: String,
    /// Bundled UI directory, relative to the working directory unless absolute.
    pub dist_dir: String,
    pub width: u32,
    pub height: u32,
    /// Keep the panel's page alive while its window is hidden.
    pub retain_context_when_hidden: bool,
    pub devtools: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            view_type: "abcodeDashboard".into(),
            title: "ABCode Dashboard".into(),
            dist_dir: "media/dist".into(),
            width: 900,
            height: 1000,
            retain_context_when_hidden: true,
            devtools: cfg!(debug_assertions),
        }
    }
}
