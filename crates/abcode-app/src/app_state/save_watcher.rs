//! Workspace save observer.
//!
//! Watches the workspace recursively with `notify` and reports each saved
//! file once its writes have settled, so an editor's atomic save (write,
//! rename, touch) produces a single trigger.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use abcode_common::AbcodeError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info};

/// Directories that never contain user documents.
const IGNORED_DIRS: &[&str] = &["node_modules", "target", "__pycache__", "dist"];

fn is_ignored_name(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&name.as_ref())
}

/// Whether a change under `root` should be ignored.
///
/// `root` should be canonical (see [`canonical_root`]). Only components
/// below the root are checked; a path that is not under it is judged by its
/// file name alone, so the directories the workspace lives in never matter.
pub(crate) fn is_ignored(root: &Path, path: &Path) -> bool {
    match path.strip_prefix(root) {
        Ok(relative) => relative.components().any(|c| match c {
            Component::Normal(name) => is_ignored_name(name),
            _ => false,
        }),
        Err(_) => path.file_name().is_some_and(is_ignored_name),
    }
}

/// The workspace root as the watcher reports it: absolute, with `.`/`..`
/// and symlinks resolved.
pub(crate) fn canonical_root(root: &Path) -> PathBuf {
    match std::fs::canonicalize(root) {
        Ok(canonical) => canonical,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "cannot canonicalize workspace root");
            if root.is_absolute() {
                root.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(root))
                    .unwrap_or_else(|_| root.to_path_buf())
            }
        }
    }
}

/// Per-path debounce: a path is due once it has been quiet for `window`.
#[derive(Debug)]
pub(crate) struct Debouncer {
    window: Duration,
    pending: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Record a change; restarts that path's quiet window.
    pub fn record(&mut self, path: PathBuf, now: Instant) {
        self.pending.insert(path, now + self.window);
    }

    /// Remove and return every path whose window has elapsed, oldest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut due: Vec<(PathBuf, Instant)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(p, at)| (p.clone(), *at))
            .collect();
        due.sort_by_key(|(_, at)| *at);
        for (path, _) in &due {
            self.pending.remove(path);
        }
        due.into_iter().map(|(p, _)| p).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Watches a workspace directory for saved files.
pub(crate) struct SaveWatcher {
    root: PathBuf,
    debounce: Duration,
}

impl SaveWatcher {
    pub fn new(root: &Path, debounce: Duration) -> Self {
        Self {
            root: canonical_root(root),
            debounce,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Watch until the receiving side goes away, sending each saved file
    /// on `tx` after its debounce window.
    pub async fn watch(&self, tx: mpsc::Sender<PathBuf>) -> Result<(), AbcodeError> {
        let (notify_tx, mut notify_rx) = tokio::sync::mpsc::channel::<PathBuf>(256);
        let root = self.root.clone();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    for path in event.paths {
                        if is_ignored(&root, &path) {
                            continue;
                        }
                        if let Err(e) = notify_tx.try_send(path) {
                            let reason = e.to_string();
                            let path = e.into_inner();
                            debug!(path = %path.display(), "save event dropped: {reason}");
                        }
                    }
                }
                Err(e) => {
                    error!("file watcher error: {e}");
                }
            },
            notify::Config::default(),
        )
        .map_err(|e| AbcodeError::Watch(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| {
                AbcodeError::Watch(format!("failed to watch {}: {e}", self.root.display()))
            })?;

        info!(root = %self.root.display(), "watching workspace for saves");

        let mut debouncer = Debouncer::new(self.debounce);
        loop {
            let wait = debouncer
                .next_due()
                .map(|at| at.saturating_duration_since(Instant::now()))
                .unwrap_or(Duration::from_secs(3600));

            tokio::select! {
                changed = notify_rx.recv() => match changed {
                    Some(path) => debouncer.record(path, Instant::now()),
                    None => break,
                },
                _ = tokio::time::sleep(wait) => {}
            }

            for path in debouncer.take_due(Instant::now()) {
                if !path.is_file() {
                    continue;
                }
                debug!(path = %path.display(), "save detected");
                if tx.send(path).is_err() {
                    debug!("save receiver dropped, stopping watcher");
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}
