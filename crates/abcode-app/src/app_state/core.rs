//! AbcodeApp struct definition and constructor.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use abcode_config::AbcodeConfig;
use abcode_webview::{ContentResolver, Dashboard, PanelOptions, WebViewManager};

use crate::cli::Args;

use super::console::Command;
use super::editor::FocusedDocument;
use super::panel_host::WindowPanel;

/// Top-level application state.
pub struct AbcodeApp {
    pub(super) config: AbcodeConfig,
    pub(super) workspace: PathBuf,

    // Dashboard
    pub(super) resolver: ContentResolver,
    pub(super) dashboard: Dashboard<WindowPanel>,
    pub(super) webviews: Option<WebViewManager>,
    pub(super) allowed_origins: Vec<String>,
    pub(super) dev_server_enabled: bool,

    // Trigger sources
    pub(super) editor: FocusedDocument,
    pub(super) save_rx: Option<mpsc::Receiver<PathBuf>>,
    pub(super) command_rx: Option<mpsc::Receiver<Command>>,
    pub(super) open_on_start: bool,

    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,
    pub(super) initialized: bool,
    pub(super) should_exit: bool,
}

impl AbcodeApp {
    pub fn new(config: AbcodeConfig, args: &Args) -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        let dist_dir = absolutize(&cwd, Path::new(&config.panel.dist_dir));
        let resolver = ContentResolver::new(
            dist_dir.clone(),
            config.dev_server.url.clone(),
            config.backend.origin.clone(),
        );
        let dev_server_enabled = config.dev_server.enabled && !args.no_dev_server;

        let mut allowed_origins = vec![config.backend.origin.clone()];
        if dev_server_enabled {
            allowed_origins.push(config.dev_server.url.clone());
        }

        let dashboard = Dashboard::new(panel_options(&config, dist_dir), config.sync.ready_grace());

        Self {
            workspace: args.workspace_root(),
            resolver,
            dashboard,
            webviews: None,
            allowed_origins,
            dev_server_enabled,
            editor: FocusedDocument::new(args.initial_file()),
            save_rx: None,
            command_rx: None,
            open_on_start: args.open,
            tokio_runtime: None,
            initialized: false,
            should_exit: false,
            config,
        }
    }

    /// Resolve a user-supplied path against the workspace.
    pub(super) fn workspace_path(&self, path: &Path) -> PathBuf {
        absolutize(&self.workspace, path)
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Fixed panel properties from config.
pub(super) fn panel_options(config: &AbcodeConfig, dist_dir: PathBuf) -> PanelOptions {
    PanelOptions {
        view_type: config.panel.view_type.clone(),
        title: config.panel.title.clone(),
        enable_scripts: true,
        retain_context_when_hidden: config.panel.retain_context_when_hidden,
        local_resource_root: dist_dir,
        width: config.panel.width,
        height: config.panel.height,
    }
}
