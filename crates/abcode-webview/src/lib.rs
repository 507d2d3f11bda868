//! Dashboard panel hosting for ABCode.
//!
//! Wraps the `wry` crate and provides:
//! - Content resolution (bundled UI vs. local dev server)
//! - A `abcode://` custom protocol for serving bundled assets
//! - The panel <-> host message protocol and JS bridge
//! - Single-panel lifecycle management
//! - The readiness handshake that delivers document snapshots

pub mod content;
pub mod dashboard;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use content::{probe_dev_server, ContentProvider, ContentResolver, Document};
pub use dashboard::{Dashboard, SyncOutcome, NO_ACTIVE_EDITOR};
pub use events::{PageLoadState, PanelEvent, PanelEvents};
pub use ipc::{InboundMessage, OutboundMessage};
pub use manager::{
    DisposeNotifier, Ensured, Panel, PanelHost, PanelLifecycle, PanelOptions, WebViewConfig,
    WebViewHandle, WebViewManager,
};
pub use sync::{Readiness, SyncDispatcher};
