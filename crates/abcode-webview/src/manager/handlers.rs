use abcode_common::PanelId;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, PanelEvent, PanelEvents};

use super::WebViewManager;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// URL prefixes every panel may navigate to.
///
/// - `abcode://` custom protocol for bundled assets
/// - `http://abcode.localhost/` the same protocol as rewritten by WebView2
/// - `about:blank` the empty page inline HTML is loaded into
pub const ALLOWED_NAV_PREFIXES: &[&str] = &["abcode://", "http://abcode.localhost/", "about:blank"];

/// Check whether a URL is allowed, given the extra origins configured for
/// this panel (dev server, analysis backend).
pub fn is_navigation_allowed(url: &str, extra_origins: &[String]) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
        || extra_origins.iter().any(|origin| matches_origin(url, origin))
}

/// `url` is `origin` itself or a path under it. `http://localhost:5173`
/// must not admit `http://localhost:51730`.
fn matches_origin(url: &str, origin: &str) -> bool {
    let origin = origin.trim_end_matches('/');
    if origin.is_empty() {
        return false;
    }
    match url.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

impl WebViewManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: PanelEvents,
        panel_id: PanelId,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let body = request.body().to_string();

            if serde_json::from_str::<serde_json::Value>(&body).is_err() {
                warn!(
                    %panel_id,
                    body_len = body.len(),
                    "IPC message rejected: invalid JSON"
                );
                return;
            }

            debug!(%panel_id, body_len = body.len(), "IPC message from page");
            events.push(PanelEvent::IpcMessage { panel_id, body });
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: PanelEvents,
        panel_id: PanelId,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(%panel_id, ?state, url = %url, "page load");
            events.push(PanelEvent::PageLoad {
                panel_id,
                state,
                url,
            });
        })
    }

    pub(super) fn attach_navigation_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: PanelEvents,
        panel_id: PanelId,
        extra_origins: Vec<String>,
    ) -> WebViewBuilder<'a> {
        builder.with_navigation_handler(move |url| {
            if !is_navigation_allowed(&url, &extra_origins) {
                warn!(
                    %panel_id,
                    url = %url,
                    "navigation blocked: URL not in allowlist"
                );
                events.push(PanelEvent::NavigationBlocked { panel_id, url });
                return false;
            }

            debug!(%panel_id, url = %url, "navigation allowed");
            true
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
