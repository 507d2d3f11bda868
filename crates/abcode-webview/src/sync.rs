//! Content synchronization with the readiness handshake.
//!
//! A freshly created panel cannot receive messages until its page has
//! attached a listener, which it announces with `webviewReady`. Snapshots
//! sent before that are held back and flushed on readiness. If the page
//! never announces itself, a single fallback deadline delivers the latest
//! snapshot anyway.
//!
//! The dispatcher is driven by an injected clock: callers pass `now` and
//! poll [`SyncDispatcher::tick`] at or after [`SyncDispatcher::next_deadline`].

use std::time::{Duration, Instant};

use abcode_common::DocumentSnapshot;
use tracing::{debug, warn};

use crate::ipc::OutboundMessage;
use crate::manager::Panel;

/// What the host believes about the page's listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Page is loading; messages would be lost.
    Loading,
    /// Fallback deadline elapsed without a ready signal.
    Assumed,
    /// The page sent `webviewReady`.
    Confirmed,
}

impl Readiness {
    pub fn can_deliver(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

pub struct SyncDispatcher {
    grace: Duration,
    readiness: Readiness,
    latest: Option<DocumentSnapshot>,
    /// `latest` has not been delivered yet.
    pending: bool,
    deadline: Option<Instant>,
    delivered: u64,
}

impl SyncDispatcher {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            readiness: Readiness::Loading,
            latest: None,
            pending: false,
            deadline: None,
            delivered: 0,
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn latest(&self) -> Option<&DocumentSnapshot> {
        self.latest.as_ref()
    }

    /// Total successful deliveries since creation.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// When [`tick`](Self::tick) next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Forget everything about the previous page. Called when a panel is
    /// created and when it is disposed; disarms the fallback.
    pub fn reset(&mut self) {
        self.readiness = Readiness::Loading;
        self.latest = None;
        self.pending = false;
        self.deadline = None;
    }

    /// The panel is gone; a late fallback must no-op.
    pub fn on_disposed(&mut self) {
        if self.pending {
            debug!("panel disposed with a pending snapshot, dropping it");
        }
        self.reset();
    }

    /// Send `snapshot` to `panel`, or hold it until the page is ready.
    ///
    /// While loading, only the newest snapshot is kept and the fallback is
    /// armed once; repeated syncs do not push it back. Returns the number of
    /// delivery attempts made.
    pub fn sync<P: Panel + ?Sized>(
        &mut self,
        panel: &P,
        snapshot: DocumentSnapshot,
        now: Instant,
    ) -> usize {
        self.latest = Some(snapshot);
        self.pending = true;

        if self.readiness.can_deliver() {
            return self.deliver(panel);
        }

        if self.deadline.is_none() {
            let deadline = now + self.grace;
            debug!(grace_ms = self.grace.as_millis() as u64, "panel loading, fallback armed");
            self.deadline = Some(deadline);
        } else {
            debug!("panel loading, snapshot queued");
        }
        0
    }

    /// The page announced its listener.
    ///
    /// Every ready signal sends the latest snapshot, if there is one: a held
    /// snapshot is flushed, and an already delivered one is sent again
    /// because a reloaded page starts out empty.
    pub fn on_ready<P: Panel + ?Sized>(&mut self, panel: &P, _now: Instant) -> usize {
        let previous = self.readiness;
        self.readiness = Readiness::Confirmed;
        self.deadline = None;

        debug!(?previous, pending = self.pending, "webviewReady received");
        self.deliver(panel)
    }

    /// Fire the fallback if its deadline has passed.
    pub fn tick<P: Panel + ?Sized>(&mut self, panel: &P, now: Instant) -> usize {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.readiness == Readiness::Loading {
                    self.readiness = Readiness::Assumed;
                }
                if self.pending {
                    debug!("ready signal not received, delivering on fallback");
                    self.deliver(panel)
                } else {
                    0
                }
            }
            _ => 0,
        }
    }

    fn deliver<P: Panel + ?Sized>(&mut self, panel: &P) -> usize {
        let Some(snapshot) = &self.latest else {
            return 0;
        };
        let message = OutboundMessage::update_code(snapshot);
        match panel.post_message(&message) {
            Ok(()) => {
                self.delivered += 1;
                debug!(
                    panel = %panel.id(),
                    kind = message.kind(),
                    file = %snapshot.display_name,
                    bytes = snapshot.content.len(),
                    "snapshot delivered"
                );
            }
            Err(e) => {
                warn!(panel = %panel.id(), error = %e, "failed to deliver snapshot");
            }
        }
        self.pending = false;
        1
    }
}
