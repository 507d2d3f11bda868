use std::path::PathBuf;

/// Fixed properties of the dashboard panel.
#[derive(Debug, Clone)]
pub struct PanelOptions {
    /// Identifier of the panel type, e.g. `abcodeDashboard`.
    pub view_type: String,
    pub title: String,
    pub enable_scripts: bool,
    /// Keep the page alive while the panel is hidden.
    pub retain_context_when_hidden: bool,
    /// The only local directory the panel may load resources from.
    pub local_resource_root: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            view_type: "abcodeDashboard".to_string(),
            title: "ABCode Dashboard".to_string(),
            enable_scripts: true,
            retain_context_when_hidden: true,
            local_resource_root: PathBuf::from("media/dist"),
            width: 900,
            height: 1000,
        }
    }
}

/// Configuration for creating a new WebView instance.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Initial URL to load.
    pub url: Option<String>,
    /// Initial HTML content to render (used when `url` is unset).
    pub html: Option<String>,
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access.
    pub clipboard: bool,
    /// Origins the page may navigate to besides the host scheme.
    pub allowed_origins: Vec<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            url: None,
            html: None,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("ABCode/{}", env!("CARGO_PKG_VERSION"))),
            clipboard: true,
            allowed_origins: Vec::new(),
        }
    }
}

impl WebViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Create a config that renders inline HTML.
    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..Default::default()
        }
    }

    /// Allow navigation to an additional origin.
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origins.push(origin.into());
        self
    }
}
