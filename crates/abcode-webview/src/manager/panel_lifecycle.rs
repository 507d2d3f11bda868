//! Single-panel lifecycle: at most one dashboard panel exists at a time.

use abcode_common::{PanelError, PanelId};
use tracing::{debug, info, warn};

use crate::content::Document;

use super::host::{Panel, PanelHost};
use super::types::PanelOptions;

/// Result of [`PanelLifecycle::ensure_panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// A new panel was created and loaded with fresh content.
    Created(PanelId),
    /// The existing panel was brought to the foreground untouched.
    Revealed(PanelId),
}

impl Ensured {
    pub fn id(self) -> PanelId {
        match self {
            Self::Created(id) | Self::Revealed(id) => id,
        }
    }

    pub fn created(self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Owns the current panel handle.
pub struct PanelLifecycle<P: Panel> {
    options: PanelOptions,
    current: Option<P>,
    next_id: u32,
}

impl<P: Panel> PanelLifecycle<P> {
    pub fn new(options: PanelOptions) -> Self {
        Self {
            options,
            current: None,
            next_id: 1,
        }
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Reveal the current panel, or create one.
    ///
    /// `resolve` is called only when a panel is created; revealing never
    /// reloads content. If `resolve` or creation fails, no panel is
    /// recorded and the next call tries again.
    pub fn ensure_panel<H, F>(&mut self, host: &mut H, resolve: F) -> Result<Ensured, PanelError>
    where
        H: PanelHost<Panel = P>,
        F: FnOnce() -> Result<Document, PanelError>,
    {
        if let Some(panel) = &self.current {
            let id = panel.id();
            if let Err(e) = panel.reveal() {
                warn!(panel = %id, error = %e, "failed to reveal panel");
            }
            debug!(panel = %id, "revealed existing panel");
            return Ok(Ensured::Revealed(id));
        }

        let document = resolve()?;
        let id = PanelId(self.next_id);
        self.next_id += 1;

        let origin = document.origin;
        let panel = host.create_panel(id, &self.options, document)?;
        info!(panel = %id, view_type = %self.options.view_type, %origin, "panel created");
        self.current = Some(panel);
        Ok(Ensured::Created(id))
    }

    pub fn get(&self) -> Option<&P> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut P> {
        self.current.as_mut()
    }

    pub fn panel_id(&self) -> Option<PanelId> {
        self.current.as_ref().map(Panel::id)
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Clear the handle after the panel reported disposal. Returns `false`
    /// for a stale id (a panel that was already replaced).
    pub fn handle_disposed(&mut self, id: PanelId) -> bool {
        if self.panel_id() != Some(id) {
            debug!(panel = %id, "ignoring disposal of stale panel");
            return false;
        }
        self.current = None;
        info!(panel = %id, "panel disposed");
        true
    }

    /// Close the current panel from the host side.
    pub fn dispose(&mut self) -> Option<PanelId> {
        let mut panel = self.current.take()?;
        let id = panel.id();
        panel.dispose();
        info!(panel = %id, "panel closed");
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use abcode_common::ContentOrigin;

    use super::*;
    use crate::events::PanelEvent;
    use crate::test_support::{bundled_doc, FakeHost, FakePanel};

    fn lifecycle() -> PanelLifecycle<FakePanel> {
        PanelLifecycle::new(PanelOptions::default())
    }

    #[test]
    fn first_call_creates_with_resolved_content() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();

        let ensured = lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();
        assert_eq!(ensured, Ensured::Created(PanelId(1)));
        assert!(lc.is_open());
        assert_eq!(host.log().created.len(), 1);
        assert_eq!(host.log().created[0].1.origin, ContentOrigin::Bundled);
    }

    #[test]
    fn second_call_reveals_without_resolving() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();
        lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();

        let ensured = lc
            .ensure_panel(&mut host, || panic!("content must not be reloaded"))
            .unwrap();
        assert_eq!(ensured, Ensured::Revealed(PanelId(1)));
        assert!(!ensured.created());
        assert_eq!(host.log().created.len(), 1);
        assert_eq!(host.log().reveals, vec![PanelId(1)]);
    }

    #[test]
    fn reveal_failure_still_reuses_panel() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();
        lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();
        host.fail_reveal(true);

        let ensured = lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();
        assert_eq!(ensured, Ensured::Revealed(PanelId(1)));
        assert_eq!(host.log().created.len(), 1);
    }

    #[test]
    fn resolve_failure_records_no_panel() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();

        let err = lc
            .ensure_panel(&mut host, || {
                Err(PanelError::MissingIndex("media/dist/index.html".into()))
            })
            .unwrap_err();
        assert!(matches!(err, PanelError::MissingIndex(_)));
        assert!(!lc.is_open());
        assert!(host.log().created.is_empty());
    }

    #[test]
    fn create_failure_records_no_panel() {
        let mut host = FakeHost::new();
        host.fail_create(true);
        let mut lc = lifecycle();

        assert!(lc.ensure_panel(&mut host, || Ok(bundled_doc())).is_err());
        assert!(!lc.is_open());

        host.fail_create(false);
        let ensured = lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();
        assert!(ensured.created());
    }

    #[test]
    fn disposal_then_ensure_creates_fresh_panel() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();
        lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();

        lc.get().unwrap().close_by_user();
        for event in host.events().drain() {
            if let PanelEvent::Disposed { panel_id } = event {
                assert!(lc.handle_disposed(panel_id));
            }
        }
        assert!(!lc.is_open());

        let ensured = lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();
        assert_eq!(ensured, Ensured::Created(PanelId(2)));
        assert_eq!(host.log().created.len(), 2);
    }

    #[test]
    fn stale_disposal_is_ignored() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();
        lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();

        assert!(!lc.handle_disposed(PanelId(42)));
        assert!(lc.is_open());
    }

    #[test]
    fn dispose_closes_and_reports_once() {
        let mut host = FakeHost::new();
        let mut lc = lifecycle();
        lc.ensure_panel(&mut host, || Ok(bundled_doc())).unwrap();

        assert_eq!(lc.dispose(), Some(PanelId(1)));
        assert_eq!(lc.dispose(), None);
        assert_eq!(host.log().disposed, vec![PanelId(1)]);
        let disposed = host
            .events()
            .drain()
            .into_iter()
            .filter(|e| matches!(e, PanelEvent::Disposed { .. }))
            .count();
        assert_eq!(disposed, 1);
    }
}
