//! The focused document: what a sync captures.

use std::path::{Path, PathBuf};

use abcode_common::DocumentSnapshot;
use tracing::{debug, warn};

/// Language identifier for `path`, by extension.
pub(crate) fn language_id(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("py") | Some("pyw") | Some("pyi") => "python",
        Some("rs") => "rust",
        Some("ts") | Some("mts") | Some("cts") => "typescript",
        Some("tsx") => "typescriptreact",
        Some("js") | Some("mjs") | Some("cjs") => "javascript",
        Some("jsx") => "javascriptreact",
        Some("go") => "go",
        Some("java") => "java",
        Some("c") | Some("h") => "c",
        Some("cpp") | Some("cc") | Some("cxx") | Some("hpp") => "cpp",
        Some("rb") => "ruby",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("md") => "markdown",
        Some("html") | Some("htm") => "html",
        Some("css") => "css",
        Some("sh") | Some("bash") => "shellscript",
        _ => "plaintext",
    }
}

/// Tracks which file counts as the active editor.
///
/// Starts from `--file`; every save or `focus` command moves it.
#[derive(Debug, Default)]
pub(crate) struct FocusedDocument {
    path: Option<PathBuf>,
}

impl FocusedDocument {
    pub fn new(initial: Option<PathBuf>) -> Self {
        Self { path: initial }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn focus(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "focused document changed");
        self.path = Some(path);
    }

    pub fn language(&self) -> Option<&'static str> {
        self.path.as_deref().map(language_id)
    }

    /// Capture the document as it is on disk right now. `None` when nothing
    /// is focused or the file cannot be read as text.
    pub fn snapshot(&self) -> Option<DocumentSnapshot> {
        let path = self.path.as_deref()?;
        match std::fs::read_to_string(path) {
            Ok(content) => Some(DocumentSnapshot::for_path(path, content, language_id(path))),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read focused document");
                None
            }
        }
    }
}
