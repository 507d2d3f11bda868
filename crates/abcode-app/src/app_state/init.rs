//! Background runtime, trigger sources, and webview setup.

use std::sync::mpsc;

use abcode_webview::{ContentProvider, WebViewManager};

use super::console::{spawn_stdin_console, HELP};
use super::core::AbcodeApp;
use super::save_watcher::SaveWatcher;
use super::types::RUNTIME_WORKERS;

impl AbcodeApp {
    /// Start everything that needs the event loop to be running. Runs once.
    pub(super) fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.initialize_runtime();
        self.initialize_webviews();
        self.start_save_watcher();
        self.start_console();
    }

    fn initialize_runtime(&mut self) {
        match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(RUNTIME_WORKERS)
            .thread_name("abcode-worker")
            .enable_all()
            .build()
        {
            Ok(rt) => self.tokio_runtime = Some(rt),
            Err(e) => {
                tracing::error!("Failed to start tokio runtime: {e}");
            }
        }
    }

    /// Set up the webview manager with the content provider for `abcode://`.
    ///
    /// The provider is rooted at the panel's local resource root, so that
    /// directory is all a bundled panel can load from disk.
    fn initialize_webviews(&mut self) {
        let dist_dir = self
            .dashboard
            .lifecycle()
            .options()
            .local_resource_root
            .clone();
        if !self.resolver.index_path().is_file() {
            tracing::warn!(
                path = %dist_dir.display(),
                "Bundled UI not found; the dashboard needs the dev server to open"
            );
        }

        let mut manager = WebViewManager::new();
        manager.set_content_provider(ContentProvider::new(&dist_dir));
        self.webviews = Some(manager);
        tracing::info!(dist_dir = %dist_dir.display(), "WebView manager initialized");
    }

    fn start_save_watcher(&mut self) {
        if !self.config.trigger.watch_workspace {
            tracing::info!("Workspace watching disabled");
            return;
        }
        let Some(rt) = &self.tokio_runtime else {
            tracing::warn!("No runtime; save watching unavailable");
            return;
        };

        let (tx, rx) = mpsc::channel();
        let watcher = SaveWatcher::new(&self.workspace, self.config.trigger.debounce());
        rt.spawn(async move {
            if let Err(e) = watcher.watch(tx).await {
                tracing::error!("Save watcher stopped: {e}");
            }
        });
        self.save_rx = Some(rx);
    }

    fn start_console(&mut self) {
        let (tx, rx) = mpsc::channel();
        spawn_stdin_console(tx);
        self.command_rx = Some(rx);
        println!("{HELP}");
    }
}
