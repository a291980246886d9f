//! Render scheduling.
//!
//! [`OverlaySession`] ties the overlays to the host's signals. It follows a
//! "record, then flush" flow:
//!
//! 1. On [`mount`](OverlaySession::mount) the session subscribes one listener per consumer
//!    (horizontal ruler, vertical ruler, heading index) to the host's [`SignalHub`]. Listeners
//!    only record which work a [`RenderTrigger`] calls for.
//! 2. The host calls [`flush`](OverlaySession::flush) from its frame callback. Recorded work
//!    runs to completion there, in a fixed order. Geometry is resolved before drawing. For the
//!    vertical ruler the height resync happens before tick computation.
//! 3. Search input goes through [`search`](OverlaySession::search) into a debouncer. The host
//!    calls [`tick`](OverlaySession::tick) once [`next_deadline`](OverlaySession::next_deadline)
//!    passes to run the scan and apply the resulting highlight set.
//! 4. [`teardown`](OverlaySession::teardown) cancels the pending scan and disposes every
//!    subscription.
//!
//! # Example
//!
//! ```rust
//! use editor_overlay::{OverlayConfig, OverlaySession, RenderTrigger, SignalHub};
//!
//! let mut hub = SignalHub::new();
//! let mut session = OverlaySession::new(OverlayConfig::default());
//!
//! session.mount(&mut hub);
//! assert_eq!(hub.listener_count(), 3);
//!
//! hub.emit(&RenderTrigger::Scroll);
//! assert!(session.has_pending_work());
//!
//! session.teardown(&mut hub);
//! assert_eq!(hub.listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Instant;

use crate::config::OverlayConfig;
use crate::debounce::Debouncer;
use crate::decorations::{DecorationDispatcher, HighlightSet};
use crate::host::{DocumentTree, DocumentView, RenderSurface, TransactionSink};
use crate::outline::{self, HeadingEntry};
use crate::ruler::{HorizontalRuler, RulerFrame, VerticalRuler};
use crate::search::{self, SearchOptions};
use crate::signals::{SignalHub, Subscription};

/// Why a redraw or rescan was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTrigger {
    /// The window (or the overlay's container) was resized.
    Resize,
    /// The nearest scrollable ancestor scrolled.
    Scroll,
    /// Document content changed.
    ContentUpdate,
    /// The selection changed.
    SelectionUpdate,
    /// The search query changed.
    ///
    /// Scheduling-only: none of the overlays redraw for it. The query itself reaches the
    /// session through [`OverlaySession::search`].
    SearchQueryChanged,
}

/// Work recorded by the listeners and consumed by [`OverlaySession::flush`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingWork {
    /// Redraw the horizontal ruler.
    pub horizontal: bool,
    /// Redraw the vertical ruler.
    pub vertical: bool,
    /// Resync the vertical ruler's height before redrawing it.
    pub vertical_resync: bool,
    /// Rebuild the heading index.
    pub headings: bool,
}

impl PendingWork {
    /// Everything, as needed right after mounting.
    pub fn all() -> Self {
        Self {
            horizontal: true,
            vertical: true,
            vertical_resync: true,
            headings: true,
        }
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What a [`flush`](OverlaySession::flush) did.
#[derive(Debug, Clone, Default)]
pub struct FlushReport {
    /// Frame painted on the horizontal surface.
    pub horizontal: Option<RulerFrame>,
    /// Frame painted on the vertical surface.
    pub vertical: Option<RulerFrame>,
    /// CSS height the vertical surface was resynced to.
    pub vertical_height: Option<f64>,
    /// Whether the heading index was rebuilt.
    pub headings_rebuilt: bool,
}

/// Overlay state for one mounted editor view.
#[derive(Debug)]
pub struct OverlaySession {
    config: OverlayConfig,
    horizontal: HorizontalRuler,
    vertical: VerticalRuler,
    dispatcher: DecorationDispatcher,
    search: Debouncer<String>,
    search_options: SearchOptions,
    pending: Rc<RefCell<PendingWork>>,
    subscriptions: Vec<Subscription>,
    headings: Vec<HeadingEntry>,
    mounted: bool,
}

impl OverlaySession {
    /// Create an unmounted session.
    ///
    /// A tick spacing that fails [`TickSpacing::validate`](crate::TickSpacing::validate) is
    /// logged; rulers then skip the tiers whose interval is not positive.
    pub fn new(config: OverlayConfig) -> Self {
        if let Err(err) = config.ticks.validate() {
            log::warn!("overlay session created with {err}");
        }
        Self {
            horizontal: HorizontalRuler::new(config.horizontal.clone(), config.ticks),
            vertical: VerticalRuler::new(config.vertical.clone(), config.ticks),
            dispatcher: DecorationDispatcher::new(),
            search: Debouncer::new(config.search_debounce()),
            search_options: SearchOptions::default(),
            pending: Rc::new(RefCell::new(PendingWork::default())),
            subscriptions: Vec::new(),
            headings: Vec::new(),
            mounted: false,
            config,
        }
    }

    /// Configuration the session was created with.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Options used for debounced scans.
    pub fn set_search_options(&mut self, options: SearchOptions) {
        self.search_options = options;
    }

    /// Returns `true` between `mount` and `teardown`.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Subscribe to `hub` and schedule the initial draw.
    pub fn mount(&mut self, hub: &mut SignalHub<RenderTrigger>) {
        if self.mounted {
            return;
        }

        let horizontal = self.listener(|work, trigger| match trigger {
            RenderTrigger::Resize
            | RenderTrigger::Scroll
            | RenderTrigger::ContentUpdate
            | RenderTrigger::SelectionUpdate => work.horizontal = true,
            RenderTrigger::SearchQueryChanged => {}
        });
        let vertical = self.listener(|work, trigger| match trigger {
            RenderTrigger::Resize | RenderTrigger::ContentUpdate => {
                work.vertical_resync = true;
                work.vertical = true;
            }
            RenderTrigger::Scroll | RenderTrigger::SelectionUpdate => work.vertical = true,
            RenderTrigger::SearchQueryChanged => {}
        });
        let headings = self.listener(|work, trigger| {
            if *trigger == RenderTrigger::ContentUpdate {
                work.headings = true;
            }
        });

        self.subscriptions = vec![
            hub.subscribe(horizontal),
            hub.subscribe(vertical),
            hub.subscribe(headings),
        ];
        *self.pending.borrow_mut() = PendingWork::all();
        self.mounted = true;
        log::debug!("overlay session mounted");
    }

    fn listener<F>(&self, record: F) -> impl FnMut(&RenderTrigger) + 'static
    where
        F: Fn(&mut PendingWork, &RenderTrigger) + 'static,
    {
        let pending: Weak<RefCell<PendingWork>> = Rc::downgrade(&self.pending);
        move |trigger: &RenderTrigger| {
            if let Some(pending) = pending.upgrade() {
                record(&mut pending.borrow_mut(), trigger);
            }
        }
    }

    /// Work recorded since the last flush.
    pub fn pending_work(&self) -> PendingWork {
        *self.pending.borrow()
    }

    /// Returns `true` if a flush would do anything.
    pub fn has_pending_work(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Run all recorded work.
    pub fn flush(
        &mut self,
        view: &dyn DocumentView,
        doc: &dyn DocumentTree,
        horizontal_surface: &mut dyn RenderSurface,
        vertical_surface: &mut dyn RenderSurface,
    ) -> FlushReport {
        let work = std::mem::take(&mut *self.pending.borrow_mut());
        let mut report = FlushReport::default();
        if !self.mounted || work.is_empty() {
            return report;
        }

        if work.horizontal {
            report.horizontal = Some(self.horizontal.draw(view, horizontal_surface));
        }
        if work.vertical_resync {
            report.vertical_height = Some(self.vertical.sync_height(view, vertical_surface));
        }
        if work.vertical || work.vertical_resync {
            report.vertical = Some(self.vertical.draw(view, vertical_surface));
        }
        if work.headings {
            self.headings = outline::collect_headings(doc);
            report.headings_rebuilt = true;
        }

        log::trace!("overlay flush: {work:?}");
        report
    }

    /// Queue a search for `query`. The scan runs once input has been quiet for the
    /// configured window.
    pub fn search(&mut self, query: &str, now: Instant) {
        if !self.mounted {
            log::debug!("search ignored: overlay session not mounted");
            return;
        }
        self.search.schedule(query.to_string(), now);
    }

    /// When the pending search becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Run the pending search if it is due. Returns `true` if a scan ran.
    pub fn tick(
        &mut self,
        now: Instant,
        doc: &dyn DocumentTree,
        sink: &mut dyn TransactionSink,
    ) -> bool {
        let Some(query) = self.search.poll(now) else {
            return false;
        };
        self.run_search(&query, doc, sink);
        true
    }

    /// Scan and apply immediately, bypassing the debouncer.
    pub fn search_now(
        &mut self,
        query: &str,
        doc: &dyn DocumentTree,
        sink: &mut dyn TransactionSink,
    ) {
        if !self.mounted {
            log::debug!("search ignored: overlay session not mounted");
            return;
        }
        self.search.cancel();
        self.run_search(query, doc, sink);
    }

    fn run_search(&mut self, query: &str, doc: &dyn DocumentTree, sink: &mut dyn TransactionSink) {
        match search::match_document_with(doc, query, self.search_options) {
            Ok(spans) => {
                log::debug!("search {:?}: {} matches", query, spans.len());
                self.dispatcher.apply(HighlightSet::from_spans(spans), sink);
            }
            Err(err) => {
                log::warn!("search {:?} failed: {}", query, err);
            }
        }
    }

    /// The authoritative highlight set.
    pub fn highlights(&self) -> Arc<HighlightSet> {
        self.dispatcher.current()
    }

    /// Heading index as of the last content update.
    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    /// Jump to the `index`-th heading of the index. Returns `false` if there is no such heading.
    pub fn jump_to_heading(&self, index: usize, sink: &mut dyn TransactionSink) -> bool {
        match self.headings.get(index) {
            Some(heading) => {
                outline::jump_to_heading(heading.position, sink);
                true
            }
            None => false,
        }
    }

    /// Scroll to the top of page `index`.
    pub fn jump_to_page(&self, index: usize, sink: &mut dyn TransactionSink) -> f64 {
        outline::jump_to_page(index, &self.config.pages, sink)
    }

    /// Cancel pending work and dispose every subscription.
    pub fn teardown(&mut self, hub: &mut SignalHub<RenderTrigger>) {
        if let Some(query) = self.search.cancel() {
            log::debug!("cancelled pending search {:?}", query);
        }
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose(hub);
        }
        *self.pending.borrow_mut() = PendingWork::default();
        self.mounted = false;
        log::debug!("overlay session torn down");
    }
}

impl Drop for OverlaySession {
    fn drop(&mut self) {
        if !self.subscriptions.is_empty() {
            log::warn!(
                "overlay session dropped with {} live subscriptions",
                self.subscriptions.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_routing() {
        let mut hub = SignalHub::new();
        let mut session = OverlaySession::new(OverlayConfig::default());
        session.mount(&mut hub);
        *session.pending.borrow_mut() = PendingWork::default();

        hub.emit(&RenderTrigger::Scroll);
        assert_eq!(
            session.pending_work(),
            PendingWork {
                horizontal: true,
                vertical: true,
                ..Default::default()
            }
        );

        *session.pending.borrow_mut() = PendingWork::default();
        hub.emit(&RenderTrigger::ContentUpdate);
        assert_eq!(session.pending_work(), PendingWork::all());

        *session.pending.borrow_mut() = PendingWork::default();
        hub.emit(&RenderTrigger::SearchQueryChanged);
        assert!(!session.has_pending_work());

        session.teardown(&mut hub);
    }

    #[test]
    fn test_teardown_silences_listeners() {
        let mut hub = SignalHub::new();
        let mut session = OverlaySession::new(OverlayConfig::default());
        session.mount(&mut hub);
        session.search("abc", Instant::now());

        session.teardown(&mut hub);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(session.next_deadline(), None);

        hub.emit(&RenderTrigger::Resize);
        assert!(!session.has_pending_work());
    }
}
