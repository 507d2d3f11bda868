//! The dashboard: one panel, kept in sync with the focused document.

use std::time::{Duration, Instant};

use abcode_common::{
    DocumentSnapshot, Notification, NotificationQueue, PanelError, PanelId, PanelPhase,
};
use tracing::{debug, error, warn};

use crate::content::Document;
use crate::events::PanelEvent;
use crate::ipc::InboundMessage;
use crate::manager::{Panel, PanelHost, PanelLifecycle, PanelOptions};
use crate::sync::{Readiness, SyncDispatcher};

/// Shown when a sync is requested with nothing to show.
pub const NO_ACTIVE_EDITOR: &str = "No active editor found. Please open a file first.";

/// Result of [`Dashboard::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No document was focused; nothing was created or touched.
    NoFocusedDocument,
    /// The snapshot went out to the panel.
    Delivered(PanelId),
    /// The panel is still loading; the snapshot waits for readiness or the
    /// fallback deadline.
    Queued(PanelId),
}

pub struct Dashboard<P: Panel> {
    lifecycle: PanelLifecycle<P>,
    dispatcher: SyncDispatcher,
    phase: PanelPhase,
    notifications: NotificationQueue,
}

impl<P: Panel> Dashboard<P> {
    pub fn new(options: PanelOptions, ready_grace: Duration) -> Self {
        Self {
            lifecycle: PanelLifecycle::new(options),
            dispatcher: SyncDispatcher::new(ready_grace),
            phase: PanelPhase::NoPanel,
            notifications: NotificationQueue::default(),
        }
    }

    /// Show the dashboard with `snapshot`.
    ///
    /// Creates the panel on first use (calling `resolve` for its content)
    /// and reveals it afterwards. `None` means no document is focused: the
    /// user is warned and no panel is created or touched.
    pub fn open<H, F>(
        &mut self,
        host: &mut H,
        snapshot: Option<DocumentSnapshot>,
        resolve: F,
        now: Instant,
    ) -> Result<SyncOutcome, PanelError>
    where
        H: PanelHost<Panel = P>,
        F: FnOnce() -> Result<Document, PanelError>,
    {
        let Some(snapshot) = snapshot else {
            warn!("dashboard requested with no focused document");
            self.notifications.push(Notification::warning(NO_ACTIVE_EDITOR));
            return Ok(SyncOutcome::NoFocusedDocument);
        };

        if !self.lifecycle.is_open() {
            self.transition(PanelPhase::Creating);
        }

        let ensured = match self.lifecycle.ensure_panel(host, resolve) {
            Ok(ensured) => ensured,
            Err(e) => {
                error!(error = %e, "failed to open dashboard");
                self.notifications.push(Notification::error(format!(
                    "Failed to open ABCode Dashboard: {e}"
                )));
                self.transition(PanelPhase::NoPanel);
                return Err(e);
            }
        };

        if ensured.created() {
            self.dispatcher.reset();
            self.transition(PanelPhase::ContentLoading);
        }

        let Some(panel) = self.lifecycle.get() else {
            return Err(PanelError::Disposed);
        };
        let attempts = self.dispatcher.sync(panel, snapshot, now);
        self.after_dispatch(attempts);

        Ok(if attempts > 0 {
            SyncOutcome::Delivered(ensured.id())
        } else {
            SyncOutcome::Queued(ensured.id())
        })
    }

    /// Route an event from the panel host.
    pub fn handle_event(&mut self, event: PanelEvent, now: Instant) {
        match event {
            PanelEvent::IpcMessage { panel_id, body } => {
                if self.lifecycle.panel_id() != Some(panel_id) {
                    debug!(panel = %panel_id, "ignoring message from stale panel");
                    return;
                }
                match InboundMessage::from_json(&body) {
                    Some(InboundMessage::WebviewReady) => {
                        if let Some(panel) = self.lifecycle.get() {
                            let attempts = self.dispatcher.on_ready(panel, now);
                            self.after_dispatch(attempts);
                        }
                    }
                    None => {}
                }
            }
            PanelEvent::PageLoad {
                panel_id,
                state,
                url,
            } => {
                debug!(panel = %panel_id, ?state, url = %url, "panel page load");
            }
            PanelEvent::NavigationBlocked { panel_id, url } => {
                debug!(panel = %panel_id, url = %url, "panel navigation was blocked");
            }
            PanelEvent::Disposed { panel_id } => {
                if self.lifecycle.handle_disposed(panel_id) {
                    self.dispatcher.on_disposed();
                    self.transition(PanelPhase::Disposed);
                }
            }
        }
    }

    /// Run the fallback delivery if it is due.
    pub fn tick(&mut self, now: Instant) {
        let Some(panel) = self.lifecycle.get() else {
            return;
        };
        let attempts = self.dispatcher.tick(panel, now);
        self.after_dispatch(attempts);
    }

    /// Earliest instant [`tick`](Self::tick) must run.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.lifecycle.is_open() {
            self.dispatcher.next_deadline()
        } else {
            None
        }
    }

    /// Close the panel, if any.
    pub fn dispose(&mut self) {
        if self.lifecycle.dispose().is_some() {
            self.dispatcher.on_disposed();
            self.transition(PanelPhase::Disposed);
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn readiness(&self) -> Readiness {
        self.dispatcher.readiness()
    }

    pub fn panel(&self) -> Option<&P> {
        self.lifecycle.get()
    }

    pub fn panel_mut(&mut self) -> Option<&mut P> {
        self.lifecycle.get_mut()
    }

    pub fn lifecycle(&self) -> &PanelLifecycle<P> {
        &self.lifecycle
    }

    /// Take the user-facing notifications raised so far.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn after_dispatch(&mut self, attempts: usize) {
        if !self.lifecycle.is_open() {
            return;
        }
        if attempts > 0 {
            self.transition(PanelPhase::Syncing);
        }
        let settled = match self.dispatcher.readiness() {
            Readiness::Loading => PanelPhase::ContentLoading,
            Readiness::Assumed | Readiness::Confirmed => PanelPhase::Ready,
        };
        self.transition(settled);
    }

    fn transition(&mut self, next: PanelPhase) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "dashboard phase");
            self.phase = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use abcode_common::{ContentOrigin, NotificationLevel};

    use super::*;
    use crate::ipc::OutboundMessage;
    use crate::test_support::{bundled_doc, dev_doc, FakeHost, FakePanel};

    const GRACE: Duration = Duration::from_millis(1000);

    fn dashboard() -> Dashboard<FakePanel> {
        Dashboard::new(PanelOptions::default(), GRACE)
    }

    fn snap(code: &str) -> Option<DocumentSnapshot> {
        Some(DocumentSnapshot::new(code, "python", "a.py"))
    }

    fn ready(id: PanelId) -> PanelEvent {
        PanelEvent::IpcMessage {
            panel_id: id,
            body: r#"{"type":"webviewReady"}"#.to_string(),
        }
    }

    /// Feed every pending host event back into the dashboard.
    fn pump(dash: &mut Dashboard<FakePanel>, host: &FakeHost, now: Instant) {
        for event in host.events().drain() {
            dash.handle_event(event, now);
        }
    }

    #[test]
    fn repeated_saves_keep_a_single_panel() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();

        for i in 0..5 {
            let at = t0 + Duration::from_millis(100 * i);
            dash.open(&mut host, snap(&format!("v{i}")), || Ok(bundled_doc()), at)
                .unwrap();
        }
        assert_eq!(host.log().created.len(), 1);
        assert_eq!(host.log().reveals.len(), 4);
        assert_eq!(dash.lifecycle().panel_id(), Some(PanelId(1)));
    }

    #[test]
    fn trigger_after_disposal_creates_exactly_one_new_panel() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();

        dash.panel().unwrap().close_by_user();
        pump(&mut dash, &host, t0);
        assert_eq!(dash.phase(), PanelPhase::Disposed);
        assert!(dash.panel().is_none());

        dash.open(&mut host, snap("b"), || Ok(bundled_doc()), t0).unwrap();
        dash.open(&mut host, snap("c"), || Ok(bundled_doc()), t0).unwrap();
        assert_eq!(host.log().created.len(), 2);
        assert_eq!(dash.lifecycle().panel_id(), Some(PanelId(2)));
    }

    #[test]
    fn ready_then_sync_delivers_exactly_once() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();

        let outcome = dash.open(&mut host, snap("old"), || Ok(bundled_doc()), t0).unwrap();
        assert_eq!(outcome, SyncOutcome::Queued(PanelId(1)));
        dash.handle_event(ready(PanelId(1)), t0 + Duration::from_millis(200));

        let outcome = dash
            .open(&mut host, snap("new"), || Ok(bundled_doc()), t0 + Duration::from_millis(300))
            .unwrap();
        assert_eq!(outcome, SyncOutcome::Delivered(PanelId(1)));

        dash.tick(t0 + GRACE * 5);
        assert_eq!(host.delivered_code(), vec!["old", "new"]);
    }

    #[test]
    fn missing_ready_still_delivers_after_grace() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();

        assert_eq!(dash.next_deadline(), Some(t0 + GRACE));
        dash.tick(t0 + GRACE / 2);
        assert!(host.delivered_code().is_empty());

        dash.tick(t0 + GRACE);
        assert_eq!(host.delivered_code(), vec!["a"]);
        assert_eq!(dash.readiness(), Readiness::Assumed);
        assert_eq!(dash.phase(), PanelPhase::Ready);
        assert_eq!(dash.next_deadline(), None);
    }

    #[test]
    fn no_focused_document_warns_and_creates_nothing() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();

        let outcome = dash
            .open(&mut host, None, || panic!("must not resolve content"), Instant::now())
            .unwrap();
        assert_eq!(outcome, SyncOutcome::NoFocusedDocument);
        assert!(host.log().created.is_empty());
        assert_eq!(dash.phase(), PanelPhase::NoPanel);

        let notes = dash.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Warning);
        assert_eq!(notes[0].message, NO_ACTIVE_EDITOR);
    }

    #[test]
    fn no_focused_document_leaves_existing_panel_alone() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();

        dash.open(&mut host, None, || Ok(bundled_doc()), t0).unwrap();
        assert!(host.log().reveals.is_empty());
        assert!(host.log().posted.is_empty());
    }

    #[test]
    fn scenario_ready_then_save() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();

        // Dev server down: the panel carries the bundled document.
        dash.open(&mut host, snap("print()"), || Ok(bundled_doc()), t0)
            .unwrap();
        assert_eq!(host.log().created[0].1.origin, ContentOrigin::Bundled);
        dash.handle_event(ready(PanelId(1)), t0 + Duration::from_millis(50));

        let save = Some(DocumentSnapshot::new("x=1", "python", "a.py"));
        dash.open(&mut host, save, || Ok(bundled_doc()), t0 + Duration::from_millis(60))
            .unwrap();
        dash.tick(t0 + GRACE * 3);

        let log = host.log();
        let matching: Vec<_> = log
            .posted
            .iter()
            .filter(|(_, m)| matches!(m, OutboundMessage::UpdateCode { code, .. } if code == "x=1"))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(
            matching[0].1,
            OutboundMessage::UpdateCode {
                code: "x=1".into(),
                language: "python".into(),
                file_name: "a.py".into(),
            }
        );
    }

    #[test]
    fn dev_server_document_is_passed_through() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        dash.open(&mut host, snap("a"), || Ok(dev_doc()), Instant::now())
            .unwrap();
        assert_eq!(host.log().created[0].1.origin, ContentOrigin::DevServer);
    }

    #[test]
    fn disposal_before_fallback_makes_it_noop() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();

        dash.panel().unwrap().close_by_user();
        pump(&mut dash, &host, t0 + Duration::from_millis(10));
        assert_eq!(dash.next_deadline(), None);

        dash.tick(t0 + GRACE * 2);
        assert!(host.log().posted.is_empty());
    }

    #[test]
    fn programmatic_dispose_is_reported_once() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();

        dash.dispose();
        assert_eq!(dash.phase(), PanelPhase::Disposed);
        // The disposal event arrives afterwards and is stale by then.
        pump(&mut dash, &host, t0);
        assert_eq!(host.log().disposed, vec![PanelId(1)]);
        assert_eq!(dash.phase(), PanelPhase::Disposed);
    }

    #[test]
    fn stale_ready_from_old_panel_is_ignored() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();
        dash.dispose();
        pump(&mut dash, &host, t0);
        dash.open(&mut host, snap("b"), || Ok(bundled_doc()), t0).unwrap();

        dash.handle_event(ready(PanelId(1)), t0);
        assert!(host.log().posted.is_empty());
        assert_eq!(dash.readiness(), Readiness::Loading);

        dash.handle_event(ready(PanelId(2)), t0);
        assert_eq!(host.delivered_code(), vec!["b"]);
    }

    #[test]
    fn every_ready_resends_the_latest_snapshot() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();
        dash.handle_event(ready(PanelId(1)), t0);
        dash.open(&mut host, snap("b"), || Ok(bundled_doc()), t0).unwrap();
        assert_eq!(host.delivered_code(), vec!["a", "b"]);

        // A reloaded page announces itself again and gets "b" back.
        dash.handle_event(ready(PanelId(1)), t0 + GRACE);
        dash.handle_event(ready(PanelId(1)), t0 + GRACE * 2);
        assert_eq!(host.delivered_code(), vec!["a", "b", "b", "b"]);

        assert_eq!(host.log().created.len(), 1);
        assert_eq!(dash.lifecycle().panel_id(), Some(PanelId(1)));
        assert_eq!(dash.readiness(), Readiness::Confirmed);
        assert_eq!(dash.phase(), PanelPhase::Ready);
        assert_eq!(dash.next_deadline(), None);
    }

    #[test]
    fn malformed_ipc_is_dropped() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();

        dash.handle_event(
            PanelEvent::IpcMessage {
                panel_id: PanelId(1),
                body: r#"{"type":"runShell","cmd":"rm"}"#.into(),
            },
            t0,
        );
        assert!(host.log().posted.is_empty());
        assert_eq!(dash.readiness(), Readiness::Loading);
    }

    #[test]
    fn post_failure_does_not_break_later_syncs() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();
        host.fail_post(true);
        dash.handle_event(ready(PanelId(1)), t0);
        assert!(host.log().posted.is_empty());

        host.fail_post(false);
        dash.open(&mut host, snap("b"), || Ok(bundled_doc()), t0).unwrap();
        assert_eq!(host.delivered_code(), vec!["b"]);
        assert_eq!(dash.phase(), PanelPhase::Ready);
    }

    #[test]
    fn missing_index_surfaces_error_and_leaves_no_panel() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();

        let err = dash
            .open(
                &mut host,
                snap("a"),
                || Err(PanelError::MissingIndex("media/dist/index.html".into())),
                Instant::now(),
            )
            .unwrap_err();
        assert!(matches!(err, PanelError::MissingIndex(_)));
        assert!(dash.panel().is_none());
        assert_eq!(dash.phase(), PanelPhase::NoPanel);

        let notes = dash.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert!(notes[0].message.contains("index.html"));
    }

    #[test]
    fn phases_follow_the_lifecycle() {
        let mut host = FakeHost::new();
        let mut dash = dashboard();
        let t0 = Instant::now();
        assert_eq!(dash.phase(), PanelPhase::NoPanel);

        dash.open(&mut host, snap("a"), || Ok(bundled_doc()), t0).unwrap();
        assert_eq!(dash.phase(), PanelPhase::ContentLoading);

        dash.handle_event(ready(PanelId(1)), t0);
        assert_eq!(dash.phase(), PanelPhase::Ready);

        dash.open(&mut host, snap("b"), || Ok(bundled_doc()), t0).unwrap();
        assert_eq!(dash.phase(), PanelPhase::Ready);

        dash.dispose();
        assert_eq!(dash.phase(), PanelPhase::Disposed);
        assert!(!dash.phase().is_live());
    }
}
