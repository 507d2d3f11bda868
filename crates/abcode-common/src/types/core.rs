use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a dashboard panel instance. A new id is issued for every
/// panel the host creates, so events from a disposed panel can be told apart
/// from events of its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(pub u32);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel-{}", self.0)
    }
}

/// Where the panel's initial document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentOrigin {
    /// The built UI under the bundled asset directory.
    Bundled,
    /// A locally running live-reloading development server.
    DevServer,
}

impl ContentOrigin {
    /// Pick the origin from the outcome of the dev-server probe.
    pub fn from_probe(dev_server_reachable: bool) -> Self {
        if dev_server_reachable {
            Self::DevServer
        } else {
            Self::Bundled
        }
    }
}

impl fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled"),
            Self::DevServer => write!(f, "dev-server"),
        }
    }
}

/// Lifecycle phase of the dashboard panel as seen by the host.
///
/// `NoPanel -> Creating -> ContentLoading -> Ready <-> Syncing -> Disposed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelPhase {
    NoPanel,
    Creating,
    ContentLoading,
    Ready,
    Syncing,
    Disposed,
}

impl PanelPhase {
    pub fn is_live(self) -> bool {
        matches!(self, Self::ContentLoading | Self::Ready | Self::Syncing)
    }
}
