//! Graceful shutdown: close the panel, stop trigger sources, stop the runtime.

use std::time::Duration;

use super::core::AbcodeApp;

impl AbcodeApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Close the dashboard panel (its webview goes before the manager)
    /// 2. Drop trigger receivers so background producers stop
    /// 3. Shut down the tokio runtime (cancels the save watcher)
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        self.dashboard.dispose();
        self.poll_panel_events();
        self.webviews = None;

        self.save_rx = None;
        self.command_rx = None;

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
