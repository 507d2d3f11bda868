//! Configuration schema types for the ABCode dashboard host.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backend;
mod dev_server;
mod panel;
mod sync;
mod system;
mod trigger;

pub use backend::*;
pub use dev_server::*;
pub use panel::*;
pub use sync::*;
pub use system::*;
pub use trigger::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AbcodeConfig {
    pub dev_server: DevServerConfig,
    pub panel: PanelConfig,
    pub sync: SyncConfig,
    pub trigger: TriggerConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}
