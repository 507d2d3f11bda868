//! Trigger handling: turn saves and commands into dashboard syncs.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use abcode_common::ContentOrigin;
use abcode_webview::{probe_dev_server, SyncOutcome};
use winit::event_loop::ActiveEventLoop;

use super::console::{Command, HELP};
use super::core::AbcodeApp;
use super::editor::language_id;
use super::panel_host::WryPanelHost;

/// Decide the content origin. Any probe problem means bundled content.
fn probe_origin(
    runtime: Option<&tokio::runtime::Runtime>,
    enabled: bool,
    url: &str,
    timeout: Duration,
) -> ContentOrigin {
    if !enabled {
        return ContentOrigin::Bundled;
    }
    let Some(rt) = runtime else {
        return ContentOrigin::Bundled;
    };
    let reachable = rt.block_on(probe_dev_server(url, timeout));
    tracing::info!(url, reachable, "dev server probe");
    ContentOrigin::from_probe(reachable)
}

impl AbcodeApp {
    /// `abcode.openDashboard`: show the dashboard with the focused document.
    pub(super) fn open_dashboard(&mut self, event_loop: &ActiveEventLoop) {
        let Some(manager) = self.webviews.as_ref() else {
            tracing::warn!("Cannot open dashboard: webviews not initialized");
            return;
        };

        let snapshot = self.editor.snapshot();
        let mut host = WryPanelHost {
            event_loop,
            manager,
            devtools: self.config.panel.devtools,
            allowed_origins: &self.allowed_origins,
        };

        let resolver = &self.resolver;
        let runtime = self.tokio_runtime.as_ref();
        let dev = &self.config.dev_server;
        let dev_enabled = self.dev_server_enabled;
        let resolve = || {
            let origin = probe_origin(runtime, dev_enabled, &dev.url, dev.probe_timeout());
            resolver.resolve(origin)
        };

        match self.dashboard.open(&mut host, snapshot, resolve, Instant::now()) {
            Ok(SyncOutcome::NoFocusedDocument) => {}
            Ok(outcome) => tracing::debug!(?outcome, "dashboard sync"),
            // Already logged and reported by the dashboard.
            Err(_) => {}
        }
        self.surface_notifications();
    }

    /// A file was saved in the workspace.
    pub(super) fn handle_save(&mut self, path: PathBuf, event_loop: &ActiveEventLoop) {
        let language = language_id(&path);
        self.editor.focus(path);
        if !self.config.trigger.matches(language) {
            tracing::debug!(language, "save ignored: language not a trigger");
            return;
        }
        self.open_dashboard(event_loop);
    }

    pub(super) fn handle_command(&mut self, command: Command, event_loop: &ActiveEventLoop) {
        tracing::debug!(?command, "console command");
        match command {
            Command::OpenDashboard => self.open_dashboard(event_loop),
            Command::Focus(path) => self.focus_path(path),
            Command::Close => self.dashboard.dispose(),
            Command::Help => println!("{HELP}"),
            Command::Quit => self.should_exit = true,
        }
    }

    pub(super) fn focus_path(&mut self, path: PathBuf) {
        let path = self.workspace_path(&path);
        if !path.is_file() {
            eprintln!("not a file: {}", path.display());
            return;
        }
        self.editor.focus(path);
    }

    /// Show pending user notifications on the console.
    pub(super) fn surface_notifications(&mut self) {
        for note in self.dashboard.drain_notifications() {
            eprintln!("{note}");
        }
    }
}
