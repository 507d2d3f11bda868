//! Internal constants for the app state module.

use std::time::Duration;

/// Upper bound on how long the loop sleeps between checks of the save and
/// command channels.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Worker threads for the background runtime (watcher, probe).
pub(super) const RUNTIME_WORKERS: usize = 2;
