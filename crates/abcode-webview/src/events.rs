//! Panel event types.

use std::sync::{Arc, Mutex};

use abcode_common::PanelId;
use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a panel, drained by the host's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Raw IPC body received from the page.
    IpcMessage { panel_id: PanelId, body: String },
    PageLoad {
        panel_id: PanelId,
        state: PageLoadState,
        url: String,
    },
    /// A navigation was blocked by the allowlist.
    NavigationBlocked { panel_id: PanelId, url: String },
    /// The panel is gone. Emitted exactly once per panel.
    Disposed { panel_id: PanelId },
}

impl PanelEvent {
    pub fn panel_id(&self) -> PanelId {
        match self {
            Self::IpcMessage { panel_id, .. }
            | Self::PageLoad { panel_id, .. }
            | Self::NavigationBlocked { panel_id, .. }
            | Self::Disposed { panel_id } => *panel_id,
        }
    }
}

/// Shared event sink. Webview callbacks push, the event loop drains.
#[derive(Debug, Clone, Default)]
pub struct PanelEvents {
    inner: Arc<Mutex<Vec<PanelEvent>>>,
}

impl PanelEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PanelEvent) {
        if let Ok(mut events) = self.inner.lock() {
            events.push(event);
        }
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<PanelEvent> {
        match self.inner.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}
