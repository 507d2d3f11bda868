//! Panel management.
//!
//! [`WebViewManager`] builds `wry::WebView` instances for dashboard panels.
//! [`PanelLifecycle`] owns the single live panel and is the only place the
//! panel handle is created or cleared.

use std::sync::Arc;

use crate::content::ContentProvider;
use crate::events::{PanelEvent, PanelEvents};

mod handle;
pub mod handlers;
mod host;
mod lifecycle;
mod panel_lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use host::{DisposeNotifier, Panel, PanelHost};
pub use panel_lifecycle::{Ensured, PanelLifecycle};
pub use types::{PanelOptions, WebViewConfig};

/// Builds webviews for panels and collects their events.
pub struct WebViewManager {
    /// Event sink. Webview callbacks push here; the event loop drains.
    pub(crate) events: PanelEvents,
    /// Serves the bundled UI over `abcode://`.
    content_provider: Option<Arc<ContentProvider>>,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self {
            events: PanelEvents::new(),
            content_provider: None,
        }
    }

    /// Handle to the shared event sink, for panels that report their own
    /// disposal.
    pub fn events(&self) -> PanelEvents {
        self.events.clone()
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<PanelEvent> {
        self.events.drain()
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
