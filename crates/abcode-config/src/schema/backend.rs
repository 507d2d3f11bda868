use serde::{Deserialize, Serialize};

/// Analysis backend queried by the dashboard UI.
///
/// The host never calls it; the origin is only allowed in the panel's
/// content-security policy and navigation allowlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub origin: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000".into(),
        }
    }
}
