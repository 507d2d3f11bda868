use std::path::PathBuf;

use clap::Parser;

/// ABCode: a live code-analysis dashboard next to your editor.
#[derive(Parser, Debug)]
#[command(name = "abcode", version, about)]
pub struct Args {
    /// Workspace directory to watch for saves.
    #[arg(value_name = "WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// File to treat as the focused document at startup.
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Open the dashboard immediately (same as `abcode.openDashboard`).
    #[arg(long)]
    pub open: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override, as a tracing directive (e.g. `abcode=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Always load the bundled UI, skipping the dev-server probe.
    #[arg(long)]
    pub no_dev_server: bool,
}

impl Args {
    /// The workspace root, defaulting to the current directory.
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The `--file` path, resolved against the workspace when relative.
    pub fn initial_file(&self) -> Option<PathBuf> {
        let file = self.file.as_ref()?;
        if file.is_absolute() {
            Some(file.clone())
        } else {
            Some(self.workspace_root().join(file))
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
