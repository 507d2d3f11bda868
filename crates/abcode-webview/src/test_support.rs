//! In-memory panel host for unit tests.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use abcode_common::{ContentOrigin, PanelError, PanelId};

use crate::content::Document;
use crate::events::PanelEvents;
use crate::ipc::OutboundMessage;
use crate::manager::{DisposeNotifier, Panel, PanelHost, PanelOptions};

#[derive(Debug, Default)]
pub(crate) struct FakeLog {
    pub created: Vec<(PanelId, Document)>,
    pub posted: Vec<(PanelId, OutboundMessage)>,
    pub reveals: Vec<PanelId>,
    pub disposed: Vec<PanelId>,
}

#[derive(Debug, Default)]
struct Switches {
    fail_create: Cell<bool>,
    fail_reveal: Cell<bool>,
    fail_post: Cell<bool>,
}

pub(crate) struct FakeHost {
    log: Rc<RefCell<FakeLog>>,
    switches: Rc<Switches>,
    events: PanelEvents,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            log: Rc::default(),
            switches: Rc::default(),
            events: PanelEvents::new(),
        }
    }

    pub fn log(&self) -> Ref<'_, FakeLog> {
        self.log.borrow()
    }

    pub fn events(&self) -> &PanelEvents {
        &self.events
    }

    pub fn fail_create(&self, on: bool) {
        self.switches.fail_create.set(on);
    }

    pub fn fail_reveal(&self, on: bool) {
        self.switches.fail_reveal.set(on);
    }

    pub fn fail_post(&self, on: bool) {
        self.switches.fail_post.set(on);
    }

    /// Code of every `updateCode` delivered, in order.
    pub fn delivered_code(&self) -> Vec<String> {
        self.log
            .borrow()
            .posted
            .iter()
            .map(|(_, OutboundMessage::UpdateCode { code, .. })| code.clone())
            .collect()
    }
}

impl PanelHost for FakeHost {
    type Panel = FakePanel;

    fn create_panel(
        &mut self,
        id: PanelId,
        _options: &PanelOptions,
        document: Document,
    ) -> Result<FakePanel, PanelError> {
        if self.switches.fail_create.get() {
            return Err(PanelError::Create("fake host refused".into()));
        }
        self.log.borrow_mut().created.push((id, document));
        Ok(FakePanel {
            id,
            log: Rc::clone(&self.log),
            switches: Rc::clone(&self.switches),
            notifier: DisposeNotifier::new(id, self.events.clone()),
        })
    }
}

pub(crate) struct FakePanel {
    id: PanelId,
    log: Rc<RefCell<FakeLog>>,
    switches: Rc<Switches>,
    notifier: DisposeNotifier,
}

impl FakePanel {
    /// Simulate the user closing the panel.
    pub fn close_by_user(&self) {
        self.notifier.fire();
    }
}

impl Panel for FakePanel {
    fn id(&self) -> PanelId {
        self.id
    }

    fn reveal(&self) -> Result<(), PanelError> {
        self.log.borrow_mut().reveals.push(self.id);
        if self.switches.fail_reveal.get() {
            return Err(PanelError::Disposed);
        }
        Ok(())
    }

    fn post_message(&self, message: &OutboundMessage) -> Result<(), PanelError> {
        if self.switches.fail_post.get() {
            return Err(PanelError::Post("fake post failure".into()));
        }
        self.log
            .borrow_mut()
            .posted
            .push((self.id, message.clone()));
        Ok(())
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed.push(self.id);
        self.notifier.fire();
    }
}

pub(crate) fn bundled_doc() -> Document {
    Document {
        origin: ContentOrigin::Bundled,
        html: "<html><head></head><body></body></html>".into(),
    }
}

pub(crate) fn dev_doc() -> Document {
    Document {
        origin: ContentOrigin::DevServer,
        html: "<iframe id=\"dev-frame\"></iframe>".into(),
    }
}
