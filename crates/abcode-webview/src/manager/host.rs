//! Seams between panel management and the windowing backend.

use std::sync::atomic::{AtomicBool, Ordering};

use abcode_common::{PanelError, PanelId};

use crate::content::Document;
use crate::events::{PanelEvent, PanelEvents};
use crate::ipc::OutboundMessage;

use super::types::PanelOptions;

/// A live dashboard panel.
pub trait Panel {
    fn id(&self) -> PanelId;

    /// Bring the panel to the foreground without reloading it.
    fn reveal(&self) -> Result<(), PanelError>;

    /// Fire-and-forget delivery of a message to the page.
    fn post_message(&self, message: &OutboundMessage) -> Result<(), PanelError>;

    /// Close the panel. Implementations must report disposal through their
    /// [`DisposeNotifier`].
    fn dispose(&mut self);
}

/// Creates panels. Implemented by the windowing backend and by test fakes.
pub trait PanelHost {
    type Panel: Panel;

    /// Create a panel and load `document` into it. This is the only time
    /// content is assigned to a panel.
    fn create_panel(
        &mut self,
        id: PanelId,
        options: &PanelOptions,
        document: Document,
    ) -> Result<Self::Panel, PanelError>;
}

/// One-shot disposal signal for a panel.
///
/// However a panel goes away (user close, programmatic close, drop after
/// an error), it pushes exactly one [`PanelEvent::Disposed`].
#[derive(Debug)]
pub struct DisposeNotifier {
    panel_id: PanelId,
    events: PanelEvents,
    fired: AtomicBool,
}

impl DisposeNotifier {
    pub fn new(panel_id: PanelId, events: PanelEvents) -> Self {
        Self {
            panel_id,
            events,
            fired: AtomicBool::new(false),
        }
    }

    /// Report disposal. Returns `false` if it was already reported.
    pub fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.events.push(PanelEvent::Disposed {
            panel_id: self.panel_id,
        });
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Drop for DisposeNotifier {
    fn drop(&mut self) {
        self.fire();
    }
}
