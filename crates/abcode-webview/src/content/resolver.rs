//! Decide and materialize the panel's initial document.

use std::path::{Path, PathBuf};

use abcode_common::{ContentOrigin, PanelError};
use tracing::{debug, info};

use super::provider::INDEX_PATH;
use super::rewrite::{
    asset_base, bundled_csp, escape_attr, generate_nonce, inject_into_head, rewrite_asset_urls,
    startup_script, DEV_CSP,
};

/// Initial content for a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub origin: ContentOrigin,
    pub html: String,
}

/// Wrapper that frames the dev server and relays messages in both
/// directions between the host bridge and the framed page.
const DEV_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta http-equiv="Content-Security-Policy" content="__CSP__">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>html,body{margin:0;padding:0;height:100%;overflow:hidden}#dev-frame{border:0;width:100%;height:100vh;display:block}</style>
</head>
<body>
<iframe id="dev-frame" src="__URL__" allow="clipboard-read; clipboard-write"></iframe>
<script>
(function() {
    var host = typeof window.acquireHostApi === 'function' ? window.acquireHostApi() : null;
    window.hostApi = host;
    var frame = document.getElementById('dev-frame');
    window.addEventListener('message', function(event) {
        if (event.source === frame.contentWindow) {
            if (host) { host.postMessage(event.data); }
        } else if (frame.contentWindow) {
            frame.contentWindow.postMessage(event.data, '*');
        }
    });
})();
</script>
</body>
</html>
"#;

/// Builds the panel document for either content origin.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    dist_dir: PathBuf,
    dev_server_url: String,
    backend_origin: String,
}

impl ContentResolver {
    pub fn new(
        dist_dir: impl Into<PathBuf>,
        dev_server_url: impl Into<String>,
        backend_origin: impl Into<String>,
    ) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            dev_server_url: dev_server_url.into(),
            backend_origin: backend_origin.into(),
        }
    }

    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    pub fn dev_server_url(&self) -> &str {
        &self.dev_server_url
    }

    pub fn backend_origin(&self) -> &str {
        &self.backend_origin
    }

    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join(INDEX_PATH)
    }

    /// Produce the document for `origin`.
    ///
    /// Only the bundled path can fail, and only when `index.html` cannot be
    /// read. Files on disk are never modified.
    pub fn resolve(&self, origin: ContentOrigin) -> Result<Document, PanelError> {
        match origin {
            ContentOrigin::DevServer => Ok(self.dev_server_document()),
            ContentOrigin::Bundled => self.bundled_document(),
        }
    }

    fn dev_server_document(&self) -> Document {
        info!(url = %self.dev_server_url, "loading dashboard from dev server");
        let html = DEV_TEMPLATE
            .replace("__CSP__", DEV_CSP)
            .replace("__URL__", &escape_attr(&self.dev_server_url));
        Document {
            origin: ContentOrigin::DevServer,
            html,
        }
    }

    fn bundled_document(&self) -> Result<Document, PanelError> {
        let index = self.index_path();
        let source = std::fs::read_to_string(&index).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PanelError::MissingIndex(index.clone())
            } else {
                PanelError::Create(format!("failed to read {}: {e}", index.display()))
            }
        })?;

        let nonce = generate_nonce();
        let csp = bundled_csp(&nonce, &self.backend_origin);
        let head = format!(
            "<meta http-equiv=\"Content-Security-Policy\" content=\"{}\">{}",
            escape_attr(&csp),
            startup_script(&nonce)
        );

        let html = rewrite_asset_urls(&source, asset_base());
        let html = inject_into_head(&html, &head);

        debug!(index = %index.display(), bytes = html.len(), "bundled dashboard resolved");
        info!(dist = %self.dist_dir.display(), "loading dashboard from bundled assets");
        Ok(Document {
            origin: ContentOrigin::Bundled,
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VITE_INDEX: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <link rel="icon" type="image/svg+xml" href="/vite.svg" />
    <title>ABCode</title>
    <script type="module" crossorigin src="/assets/index-D1x2.js"></script>
    <link rel="stylesheet" crossorigin href="/assets/index-B3y4.css">
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

    fn resolver_with_index(html: &str) -> (tempfile::TempDir, ContentResolver) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), html).unwrap();
        let resolver = ContentResolver::new(
            dir.path(),
            "http://localhost:5173",
            "http://localhost:8000",
        );
        (dir, resolver)
    }

    #[test]
    fn bundled_rewrites_assets_to_host_scheme() {
        let (_dir, resolver) = resolver_with_index(VITE_INDEX);
        let doc = resolver.resolve(ContentOrigin::Bundled).unwrap();
        assert_eq!(doc.origin, ContentOrigin::Bundled);

        let base = asset_base();
        assert!(doc.html.contains(&format!("src=\"{base}assets/index-D1x2.js\"")));
        assert!(doc.html.contains(&format!("href=\"{base}assets/index-B3y4.css\"")));
        assert!(doc.html.contains(&format!("href=\"{base}vite.svg\"")));
        assert!(!doc.html.contains("src=\"/assets"));
    }

    #[test]
    fn bundled_injects_strict_csp_with_backend() {
        let (_dir, resolver) = resolver_with_index(VITE_INDEX);
        let doc = resolver.resolve(ContentOrigin::Bundled).unwrap();
        assert!(doc.html.contains("http-equiv=\"Content-Security-Policy\""));
        assert!(doc.html.contains("default-src 'none'"));
        assert!(doc.html.contains("http://localhost:8000"));
        assert!(!doc.html.contains("<iframe"));
    }

    #[test]
    fn startup_script_precedes_every_other_script() {
        let (_dir, resolver) = resolver_with_index(VITE_INDEX);
        let doc = resolver.resolve(ContentOrigin::Bundled).unwrap();

        let first_script = doc.html.find("<script").unwrap();
        let bridge = doc.html.find("acquireHostApi").unwrap();
        let app_script = doc.html.find("index-D1x2.js").unwrap();
        assert!(doc.html[first_script..].starts_with("<script nonce="));
        assert!(bridge < app_script);
    }

    #[test]
    fn startup_nonce_matches_csp() {
        let (_dir, resolver) = resolver_with_index(VITE_INDEX);
        let doc = resolver.resolve(ContentOrigin::Bundled).unwrap();

        let start = doc.html.find("<script nonce=\"").unwrap() + "<script nonce=\"".len();
        let nonce = &doc.html[start..start + 32];
        assert!(doc.html.contains(&format!("'nonce-{nonce}'")));
    }

    #[test]
    fn missing_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = ContentResolver::new(
            dir.path().join("dist"),
            "http://localhost:5173",
            "http://localhost:8000",
        );
        let err = resolver.resolve(ContentOrigin::Bundled).unwrap_err();
        assert!(matches!(err, PanelError::MissingIndex(p) if p.ends_with("index.html")));
    }

    #[test]
    fn bundled_resolution_leaves_source_untouched() {
        let (dir, resolver) = resolver_with_index(VITE_INDEX);
        resolver.resolve(ContentOrigin::Bundled).unwrap();
        let on_disk = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(on_disk, VITE_INDEX);
    }

    #[test]
    fn dev_server_document_frames_the_url() {
        let resolver = ContentResolver::new(
            "/nonexistent/dist",
            "http://localhost:5173",
            "http://localhost:8000",
        );
        let doc = resolver.resolve(ContentOrigin::DevServer).unwrap();
        assert_eq!(doc.origin, ContentOrigin::DevServer);
        assert!(doc.html.contains("<iframe id=\"dev-frame\" src=\"http://localhost:5173\""));
        assert!(doc.html.contains("'unsafe-inline'"));
        assert!(doc.html.contains("acquireHostApi"));
    }

    #[test]
    fn dev_server_url_is_escaped() {
        let resolver = ContentResolver::new("dist", "http://localhost:5173/?a=\"b\"", "http://x");
        let doc = resolver.resolve(ContentOrigin::DevServer).unwrap();
        assert!(doc.html.contains("?a=&quot;b&quot;"));
    }
}
