//! Message protocol between the host and the dashboard panel.
//!
//! Messages flow in both directions:
//! - **Panel -> Host**: the page calls `hostApi.postMessage({...})`, which
//!   forwards the JSON through `window.ipc.postMessage` to the webview's IPC
//!   handler.
//! - **Host -> Panel**: the host evaluates a script that dispatches a DOM
//!   `message` event on `window` carrying the outbound message.

use abcode_common::DocumentSnapshot;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Message types the panel is allowed to send.
pub const ALLOWED_INBOUND_TYPES: &[&str] = &["webviewReady"];

/// A message from the panel's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    /// The page attached its message listener. May arrive more than once.
    WebviewReady,
}

impl InboundMessage {
    /// Parse a raw IPC body. Unknown types and malformed JSON are logged
    /// and dropped.
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(body_len = raw.len(), error = %e, "IPC message rejected: invalid JSON");
                return None;
            }
        };

        let kind = value.get("type").and_then(|t| t.as_str()).unwrap_or("").to_owned();
        if !is_inbound_type_allowed(&kind) {
            warn!(kind, "IPC message rejected: unknown type");
            return None;
        }

        match serde_json::from_value(value) {
            Ok(msg) => Some(msg),
            Err(e) => {
                warn!(kind, error = %e, "IPC message rejected: bad shape");
                None
            }
        }
    }
}

/// Check whether an inbound message type is in the allowlist.
pub fn is_inbound_type_allowed(kind: &str) -> bool {
    ALLOWED_INBOUND_TYPES.contains(&kind)
}

/// A message to the panel's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Wire form of a [`DocumentSnapshot`].
    UpdateCode {
        code: String,
        language: String,
        #[serde(rename = "fileName")]
        file_name: String,
    },
}

impl OutboundMessage {
    pub fn update_code(snapshot: &DocumentSnapshot) -> Self {
        Self::UpdateCode {
            code: snapshot.content.clone(),
            language: snapshot.content_type.clone(),
            file_name: snapshot.display_name.clone(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateCode { .. } => "updateCode",
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

/// Initialization script injected into every panel before any page script.
///
/// Exposes `window.acquireHostApi()`, which hands out the bridge object
/// exactly once per page load.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    var acquired = false;
    var api = Object.freeze({
        postMessage: function(msg) {
            window.ipc.postMessage(JSON.stringify(msg));
        },
        getState: function() {
            try {
                return JSON.parse(window.sessionStorage.getItem('abcode.state'));
            } catch (e) {
                return undefined;
            }
        },
        setState: function(state) {
            try {
                window.sessionStorage.setItem('abcode.state', JSON.stringify(state));
            } catch (e) {}
            return state;
        }
    });
    window.acquireHostApi = function() {
        if (acquired) {
            throw new Error('host API has already been acquired');
        }
        acquired = true;
        return api;
    };
})();
"#;

/// Generate a JS snippet that delivers `message` to the page as a DOM
/// `message` event.
pub fn js_dispatch_message(message: &OutboundMessage) -> String {
    format!(
        "window.dispatchEvent(new MessageEvent('message', {{ data: {} }}));",
        message.to_json()
    )
}
