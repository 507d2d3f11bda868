//! Native panel host: each dashboard panel is its own window with a child
//! webview filling it.

use abcode_common::{PanelError, PanelId};
use abcode_webview::{
    DisposeNotifier, Document, OutboundMessage, Panel, PanelHost, PanelOptions, WebViewConfig,
    WebViewHandle, WebViewManager,
};
use tracing::{debug, warn};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

// =============================================================================
// COORDINATE CONVERSION
// =============================================================================

/// Bounds covering a whole window of the given logical size.
pub(crate) fn full_window_bounds(width: f64, height: f64) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}

fn window_bounds(window: &Window) -> wry::Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    full_window_bounds(size.width, size.height)
}

// =============================================================================
// CONTEXT RETENTION
// =============================================================================

/// Page the panel was created with, so it can be loaded again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageSource {
    Url(String),
    Html(String),
}

impl PageSource {
    pub fn of(config: &WebViewConfig) -> Self {
        match (&config.url, &config.html) {
            (Some(url), _) => Self::Url(url.clone()),
            (None, Some(html)) => Self::Html(html.clone()),
            (None, None) => Self::Html(String::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageAction {
    /// Drop the page's state while the panel is out of sight.
    Unload,
    /// Load the original page again.
    Restore,
}

/// Decides what happens to the page when the panel is hidden and shown.
///
/// A retained panel keeps its page alive. Otherwise the page is unloaded
/// when hidden and loaded fresh when shown again; the fresh page announces
/// itself with `webviewReady` and is sent the latest snapshot.
#[derive(Debug)]
pub(crate) struct ContextRetention {
    retain: bool,
    unloaded: bool,
}

impl ContextRetention {
    pub fn new(retain: bool) -> Self {
        Self {
            retain,
            unloaded: false,
        }
    }

    pub fn on_visibility(&mut self, visible: bool) -> Option<PageAction> {
        if self.retain {
            return None;
        }
        match (visible, self.unloaded) {
            (false, false) => {
                self.unloaded = true;
                Some(PageAction::Unload)
            }
            (true, true) => {
                self.unloaded = false;
                Some(PageAction::Restore)
            }
            _ => None,
        }
    }
}

const BLANK_PAGE: &str = "<html><body></body></html>";

// =============================================================================
// PANEL
// =============================================================================

pub(crate) struct WindowPanel {
    // The webview is a child of `window` and must drop first.
    webview: WebViewHandle,
    window: Window,
    notifier: DisposeNotifier,
    page: PageSource,
    retention: ContextRetention,
}

impl WindowPanel {
    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// The panel window was hidden (occluded or minimized) or shown again.
    pub fn visibility_changed(&mut self, visible: bool) {
        let Some(action) = self.retention.on_visibility(visible) else {
            return;
        };
        let result = match (action, &self.page) {
            (PageAction::Unload, _) => self.webview.load_html(BLANK_PAGE),
            (PageAction::Restore, PageSource::Url(url)) => self.webview.load_url(url),
            (PageAction::Restore, PageSource::Html(html)) => self.webview.load_html(html),
        };
        match result {
            Ok(()) => debug!(panel = %self.id(), ?action, "panel context"),
            Err(e) => warn!(panel = %self.id(), ?action, error = %e, "panel context change failed"),
        }
    }

    /// Keep the webview filling the window after a resize.
    pub fn sync_bounds(&self) {
        if let Err(e) = self.webview.set_bounds(window_bounds(&self.window)) {
            warn!(panel = %self.id(), error = %e, "failed to resize webview");
        }
    }

    /// The user closed the window. Hide it now; the handle is released when
    /// the disposal event is processed.
    pub fn close_requested(&self) {
        self.window.set_visible(false);
        self.notifier.fire();
    }
}

impl Panel for WindowPanel {
    fn id(&self) -> PanelId {
        self.webview.panel_id()
    }

    fn reveal(&self) -> Result<(), PanelError> {
        if self.notifier.has_fired() {
            return Err(PanelError::Disposed);
        }
        self.window.set_visible(true);
        self.window.set_minimized(false);
        self.window.focus_window();
        if let Err(e) = self.webview.focus() {
            debug!(panel = %self.id(), error = %e, "webview focus failed");
        }
        Ok(())
    }

    fn post_message(&self, message: &OutboundMessage) -> Result<(), PanelError> {
        if self.notifier.has_fired() {
            return Err(PanelError::Disposed);
        }
        self.webview
            .post_message(message)
            .map_err(|e| PanelError::Post(e.to_string()))
    }

    fn dispose(&mut self) {
        self.window.set_visible(false);
        self.notifier.fire();
    }
}

// =============================================================================
// HOST
// =============================================================================

/// Creates panels on the running event loop.
pub(crate) struct WryPanelHost<'a> {
    pub event_loop: &'a ActiveEventLoop,
    pub manager: &'a WebViewManager,
    pub devtools: bool,
    /// Origins the page may navigate to (dev server, backend).
    pub allowed_origins: &'a [String],
}

impl PanelHost for WryPanelHost<'_> {
    type Panel = WindowPanel;

    fn create_panel(
        &mut self,
        id: PanelId,
        options: &PanelOptions,
        document: Document,
    ) -> Result<WindowPanel, PanelError> {
        if !options.enable_scripts {
            warn!(panel = %id, "scripts cannot be disabled in a native webview; ignoring");
        }

        let attrs = WindowAttributes::default()
            .with_title(options.title.clone())
            .with_inner_size(LogicalSize::new(options.width as f64, options.height as f64));
        let window = self
            .event_loop
            .create_window(attrs)
            .map_err(|e| PanelError::Create(format!("failed to create window: {e}")))?;

        let origin = document.origin;
        let mut config = self.manager.config_for(document);
        config.devtools = self.devtools;
        config.allowed_origins = self.allowed_origins.to_vec();
        let page = PageSource::of(&config);

        let webview = self
            .manager
            .create(id, &window, window_bounds(&window), config)?;

        debug!(panel = %id, %origin, "panel window created");
        Ok(WindowPanel {
            webview,
            window,
            notifier: DisposeNotifier::new(id, self.manager.events()),
            page,
            retention: ContextRetention::new(options.retain_context_when_hidden),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retained_context_is_never_touched() {
        let mut r = ContextRetention::new(true);
        assert_eq!(r.on_visibility(false), None);
        assert_eq!(r.on_visibility(true), None);
    }

    #[test]
    fn unretained_context_unloads_and_restores_once() {
        let mut r = ContextRetention::new(false);
        assert_eq!(r.on_visibility(true), None);
        assert_eq!(r.on_visibility(false), Some(PageAction::Unload));
        assert_eq!(r.on_visibility(false), None);
        assert_eq!(r.on_visibility(true), Some(PageAction::Restore));
        assert_eq!(r.on_visibility(true), None);
    }

    #[test]
    fn page_source_prefers_url() {
        let config = WebViewConfig::with_url("abcode://localhost/index.html");
        assert_eq!(
            PageSource::of(&config),
            PageSource::Url("abcode://localhost/index.html".into())
        );
        let config = WebViewConfig::with_html("<iframe>");
        assert_eq!(PageSource::of(&config), PageSource::Html("<iframe>".into()));
    }

    #[test]
    fn full_window_bounds_start_at_origin() {
        let rect = full_window_bounds(900.0, 1000.0);
        match rect.position {
            wry::dpi::Position::Logical(pos) => {
                assert_eq!(pos.x, 0.0);
                assert_eq!(pos.y, 0.0);
            }
            _ => panic!("Expected logical position"),
        }
        match rect.size {
            wry::dpi::Size::Logical(size) => {
                assert!((size.width - 900.0).abs() < f64::EPSILON);
                assert!((size.height - 1000.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical size"),
        }
    }
}
