use abcode_common::PanelId;
use wry::WebView;

use crate::ipc::{js_dispatch_message, OutboundMessage};

/// Handle to a panel's WebView.
pub struct WebViewHandle {
    pub(super) webview: WebView,
    pub(super) panel_id: PanelId,
}

impl WebViewHandle {
    pub fn panel_id(&self) -> PanelId {
        self.panel_id
    }

    /// Deliver `message` to the page as a DOM `message` event.
    pub fn post_message(&self, message: &OutboundMessage) -> Result<(), wry::Error> {
        self.webview.evaluate_script(&js_dispatch_message(message))
    }

    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn focus(&self) -> Result<(), wry::Error> {
        self.webview.focus()
    }

    /// Navigate to `url`, replacing the current page.
    pub fn load_url(&self, url: &str) -> Result<(), wry::Error> {
        self.webview.load_url(url)
    }

    /// Replace the current page with inline HTML.
    pub fn load_html(&self, html: &str) -> Result<(), wry::Error> {
        self.webview.load_html(html)
    }
}
