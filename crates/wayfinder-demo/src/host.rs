#![forbid(unsafe_code)]

//! A simulated host UI.
//!
//! Elements are laid out from the viewport by a fixed phone-style layout.
//! Each element queues the measurement tickets it receives and answers them
//! when the host is flushed, the way a real UI answers on its next layout
//! pass. An element can be told to report "not laid out yet" for its first
//! few requests, and elements can be removed to leave a dead anchor behind.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, trace};
use wayfinder::{Anchor, Measurable, MeasureOutcome, MeasureTicket, Rect, Size, Tour};

/// One element of the simulated UI.
#[derive(Debug)]
pub struct SimElement {
    name: &'static str,
    rect: Cell<Rect>,
    /// Requests still to be answered with an empty rectangle.
    unsettled: Cell<u32>,
    pending: RefCell<Vec<MeasureTicket>>,
}

impl SimElement {
    fn new(name: &'static str, rect: Rect, unsettled: u32) -> Rc<Self> {
        Rc::new(Self {
            name,
            rect: Cell::new(rect),
            unsettled: Cell::new(unsettled),
            pending: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect.get()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// The rectangle the element reports right now.
    fn report(&self) -> Rect {
        let left = self.unsettled.get();
        if left > 0 {
            self.unsettled.set(left - 1);
            Rect::default()
        } else {
            self.rect.get()
        }
    }
}

impl Measurable for SimElement {
    fn request_measure(&self, ticket: MeasureTicket) {
        trace!(element = self.name, attempt = ticket.attempt, "measure requested");
        self.pending.borrow_mut().push(ticket);
    }
}

/// Named elements plus the layout that positions them.
#[derive(Debug)]
pub struct SimHost {
    viewport: Cell<Size>,
    elements: RefCell<BTreeMap<&'static str, Rc<SimElement>>>,
}

/// Element names in the sample layout.
pub const SEARCH: &str = "search";
pub const FEED_CARD: &str = "feed-card";
pub const PROFILE_TAB: &str = "profile-tab";
pub const COMPOSE: &str = "compose";

const ELEMENTS: [&str; 4] = [SEARCH, FEED_CARD, PROFILE_TAB, COMPOSE];

/// Where `name` sits for a given viewport.
#[must_use]
pub fn layout(name: &str, viewport: Size) -> Rect {
    let (w, h) = (viewport.width, viewport.height);
    match name {
        SEARCH => Rect::new(16.0, 56.0, (w - 32.0).max(0.0), 40.0),
        FEED_CARD => Rect::new(16.0, (h * 0.35).round(), (w - 32.0).max(0.0), 140.0),
        // Right-most tab in a bottom tab bar.
        PROFILE_TAB => Rect::new(w - 72.0, h - 64.0, 64.0, 56.0),
        // Floating action button above the tab bar.
        COMPOSE => Rect::new(w - 76.0, h - 140.0, 56.0, 56.0),
        _ => Rect::default(),
    }
}

impl SimHost {
    /// A host with every sample element laid out for `viewport`.
    ///
    /// Each element answers its first `unsettled` requests with an empty
    /// rectangle.
    #[must_use]
    pub fn new(viewport: Size, unsettled: u32) -> Self {
        let elements = ELEMENTS
            .iter()
            .map(|&name| (name, SimElement::new(name, layout(name, viewport), unsettled)))
            .collect();
        Self {
            viewport: Cell::new(viewport),
            elements: RefCell::new(elements),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport.get()
    }

    #[must_use]
    pub fn element(&self, name: &str) -> Option<Rc<SimElement>> {
        self.elements.borrow().get(name).cloned()
    }

    /// A weak anchor to `name`, dangling if the element does not exist.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Anchor {
        self.element(name)
            .map(|element| Anchor::new(&element))
            .unwrap_or_else(Anchor::dangling)
    }

    /// Lay every element out again for a new viewport.
    pub fn relayout(&self, viewport: Size) {
        self.viewport.set(viewport);
        for element in self.elements.borrow().values() {
            element.rect.set(layout(element.name, viewport));
        }
        debug!(width = viewport.width, height = viewport.height, "host relayout");
    }

    /// Drop `name` from the UI. Anchors to it go dead.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.elements.borrow_mut().remove(name).is_some();
        if removed {
            debug!(element = name, "element removed");
        }
        removed
    }

    /// Answer every queued measurement request.
    ///
    /// Tickets are drained before any answer is delivered so the tour may
    /// queue new requests while this runs.
    pub fn flush(&self, tour: &Tour) -> Vec<MeasureOutcome> {
        let elements: Vec<Rc<SimElement>> = self.elements.borrow().values().cloned().collect();
        let mut outcomes = Vec::new();
        for element in elements {
            let tickets: Vec<MeasureTicket> = element.pending.borrow_mut().drain(..).collect();
            for ticket in tickets {
                outcomes.push(tour.on_measured(ticket, element.report()));
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder::{TourConfig, TourStep};
    use web_time::{Duration, Instant};

    const PHONE: Size = Size::new(375.0, 812.0);

    #[test]
    fn layout_stays_inside_viewport() {
        for viewport in [PHONE, Size::new(812.0, 375.0), Size::new(1024.0, 768.0)] {
            let bounds = Rect::new(0.0, 0.0, viewport.width, viewport.height);
            for name in ELEMENTS {
                let rect = layout(name, viewport);
                assert!(rect.is_measurable(), "{name} empty at {viewport:?}");
                assert!(bounds.contains_rect(&rect), "{name} outside {viewport:?}");
            }
        }
    }

    #[test]
    fn unknown_element_gives_dangling_anchor() {
        let host = SimHost::new(PHONE, 0);
        assert!(host.anchor(SEARCH).is_alive());
        assert!(!host.anchor("nope").is_alive());
    }

    #[test]
    fn removed_element_kills_anchor() {
        let host = SimHost::new(PHONE, 0);
        let anchor = host.anchor(COMPOSE);
        assert!(host.remove(COMPOSE));
        assert!(!anchor.is_alive());
        assert!(!host.remove(COMPOSE));
    }

    #[test]
    fn unsettled_element_reports_empty_first() {
        let element = SimElement::new("x", Rect::new(1.0, 2.0, 3.0, 4.0), 2);
        assert!(element.report().is_empty());
        assert!(element.report().is_empty());
        assert_eq!(element.report(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn relayout_moves_elements() {
        let host = SimHost::new(PHONE, 0);
        let before = host.element(PROFILE_TAB).unwrap().rect();
        host.relayout(Size::new(812.0, 375.0));
        let after = host.element(PROFILE_TAB).unwrap().rect();
        assert_ne!(before, after);
        assert_eq!(after, layout(PROFILE_TAB, Size::new(812.0, 375.0)));
    }

    #[test]
    fn flush_answers_queued_tickets() {
        let host = SimHost::new(PHONE, 0);
        let config = TourConfig::new().step(TourStep::new("s").anchor(host.anchor(SEARCH)));
        let tour = Tour::new(config, PHONE).unwrap();
        let t0 = Instant::now();

        tour.start();
        tour.tick(t0);
        tour.tick(t0 + Duration::from_millis(150));
        assert_eq!(host.element(SEARCH).unwrap().pending(), 1);

        let outcomes = host.flush(&tour);
        assert!(matches!(outcomes[..], [MeasureOutcome::Accepted(_)]));
        assert_eq!(host.element(SEARCH).unwrap().pending(), 0);
    }
}
