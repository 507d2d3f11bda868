use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable capture of the focused document at trigger time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub content: String,
    /// Language identifier, e.g. `"python"`.
    pub content_type: String,
    /// File name without directories, e.g. `"a.py"`.
    pub display_name: String,
}

impl DocumentSnapshot {
    pub fn new(
        content: impl Into<String>,
        content_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            display_name: display_name.into(),
        }
    }

    /// Build a snapshot for `path`, using its base name as the display name.
    pub fn for_path(path: &Path, content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::new(content, content_type, display_name(path))
    }
}

/// Base name of a path, falling back to the whole path when it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
