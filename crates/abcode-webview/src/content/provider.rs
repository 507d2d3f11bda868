//! Bundled asset serving via the `abcode://` custom protocol.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Path of the entry document within the bundle.
pub const INDEX_PATH: &str = "index.html";

/// Serves files from the bundled UI directory.
///
/// A request for `abcode://localhost/assets/index.js` resolves to
/// `{root}/assets/index.js`. Nothing outside `root` is ever served, which is
/// what restricts the panel's local resource access to the bundled UI.
///
/// The entry document is special: once [`serve_document`](Self::serve_document)
/// has been called, `index.html` is answered with that rewritten document
/// instead of the file on disk.
pub struct ContentProvider {
    root: PathBuf,
    document: RwLock<Option<String>>,
}

impl ContentProvider {
    /// Create a provider rooted at `root` (usually `media/dist`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            document: RwLock::new(None),
        }
    }

    /// Answer `index.html` requests with `html` from now on.
    pub fn serve_document(&self, html: impl Into<String>) {
        if let Ok(mut document) = self.document.write() {
            *document = Some(html.into());
        }
    }

    fn served_document(&self) -> Option<String> {
        self.document.read().ok().and_then(|d| d.clone())
    }

    /// Resolve a request path to content bytes and MIME type.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Cow<'static, [u8]>)> {
        let clean = path.split(|c: char| c == '?' || c == '#').next().unwrap_or("");
        let clean = clean.trim_start_matches('/');
        let clean = if clean.is_empty() { INDEX_PATH } else { clean };

        if clean == INDEX_PATH {
            if let Some(html) = self.served_document() {
                return Some(("text/html", Cow::Owned(html.into_bytes())));
            }
        }

        let file_path = self.root.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the root.
        let canonical_root = std::fs::canonicalize(&self.root).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_root) || !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&canonical_file), Cow::Owned(data)))
    }

    /// Extract the asset path from a custom-protocol request URI.
    ///
    /// WebView2 rewrites `abcode://localhost/x` to `http://abcode.localhost/x`,
    /// so both spellings are accepted.
    pub fn request_path(uri: &str) -> &str {
        uri.strip_prefix("abcode://localhost/")
            .or_else(|| uri.strip_prefix("abcode://localhost"))
            .or_else(|| uri.strip_prefix("http://abcode.localhost/"))
            .or_else(|| uri.strip_prefix("abcode:///"))
            .or_else(|| uri.strip_prefix("abcode://"))
            .unwrap_or("")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
