#![forbid(unsafe_code)]

//! The tour runtime handle.
//!
//! [`Tour`] is a cheap, cloneable, single-threaded handle. Hosts keep one
//! clone in their UI tree (usually through a
//! [`TourContext`](crate::TourContext)), drive it with navigation calls and
//! [`Tour::tick`], answer measurement requests, and draw from
//! [`Tour::snapshot`].
//!
//! # Callback ordering
//!
//! Every mutating call follows the same three phases:
//!
//! 1. commit the new state (state machine, measurement tracker, revision),
//! 2. release every internal borrow,
//! 3. invoke callbacks in event order.
//!
//! A callback may therefore call back into the tour (`next()` from an
//! `on_show`, for instance) and observe the committed state. Once a callback
//! has navigated, the outer transition's remaining callbacks are dropped and
//! the nested transition's callbacks describe the tour from then on. A
//! step's `on_hide` fires only if its `on_show` did.
//!
//! # Measurement flow
//!
//! ```text
//! step shown ─► tracker.begin ─► tick(now) ─► Measurable::request_measure(ticket)
//!                                                  │
//!          snapshot() ◄── on_measured(ticket, rect) ◄┘  (or on_measure_failed)
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use wayfinder_core::{Rect, Size, debug, debug_span, trace, warn};
use wayfinder_layout::{OverlayRegions, ScrollRequest, compute_popover_placement, overlay_regions};
use web_time::Instant;

use crate::anchor::{Anchor, AnchorRegistry};
use crate::config::{RuntimeSettings, TourConfig};
use crate::error::TourError;
use crate::measure::{MeasureOutcome, MeasurePhase, MeasureTicket, MeasurementTracker};
use crate::snapshot::{MeasureStatus, PopoverControls, StepView, TourSnapshot};
use crate::state::{TourAction, TourEvent, TourState, Transition};
use crate::step::TourStep;

struct TourInner {
    config: TourConfig,
    settings: RuntimeSettings,
    state: RefCell<TourState>,
    tracker: RefCell<MeasurementTracker>,
    anchors: RefCell<AnchorRegistry>,
    viewport: Cell<Size>,
    revision: Cell<u64>,
    /// Bumped by every committed transition.
    epoch: Cell<u64>,
    /// Step whose `on_show` fired and whose `on_hide` has not.
    shown: Cell<Option<usize>>,
}

/// Shared handle to a running tour.
#[derive(Clone)]
pub struct Tour {
    inner: Rc<TourInner>,
}

/// Non-owning handle, for callbacks and anchors that must not keep the tour
/// alive.
#[derive(Clone)]
pub struct WeakTour(Weak<TourInner>);

impl WeakTour {
    #[must_use]
    pub fn upgrade(&self) -> Option<Tour> {
        self.0.upgrade().map(|inner| Tour { inner })
    }
}

impl fmt::Debug for WeakTour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakTour")
            .field("alive", &(self.0.strong_count() > 0))
            .finish()
    }
}

impl Tour {
    /// Build a tour with default runtime settings.
    pub fn new(config: TourConfig, viewport: Size) -> Result<Self, TourError> {
        Self::with_settings(config, RuntimeSettings::default(), viewport)
    }

    /// Build a tour with explicit runtime settings.
    ///
    /// Fails with [`TourError::InvalidConfig`] listing every violation in the
    /// tour config and the settings.
    pub fn with_settings(
        config: TourConfig,
        settings: RuntimeSettings,
        viewport: Size,
    ) -> Result<Self, TourError> {
        let mut errors = Vec::new();
        for result in [
            config.validate(),
            settings.placement.validate(),
            settings.measure.validate(),
        ] {
            if let Err(violations) = result {
                errors.extend(violations);
            }
        }
        if !errors.is_empty() {
            return Err(TourError::InvalidConfig(errors));
        }

        debug!(
            steps = config.steps.len(),
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            "tour created"
        );

        let total = config.steps.len();
        Ok(Self {
            inner: Rc::new(TourInner {
                state: RefCell::new(TourState::new(total)),
                tracker: RefCell::new(MeasurementTracker::new(settings.measure)),
                anchors: RefCell::new(AnchorRegistry::new()),
                viewport: Cell::new(viewport),
                revision: Cell::new(0),
                epoch: Cell::new(0),
                shown: Cell::new(None),
                config,
                settings,
            }),
        })
    }

    #[must_use]
    pub fn downgrade(&self) -> WeakTour {
        WeakTour(Rc::downgrade(&self.inner))
    }

    /// Whether two handles refer to the same tour.
    #[must_use]
    pub fn ptr_eq(&self, other: &Tour) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn config(&self) -> &TourConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn settings(&self) -> &RuntimeSettings {
        &self.inner.settings
    }

    // ── Queries ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.state.borrow().is_active()
    }

    #[must_use]
    pub fn current_step_index(&self) -> usize {
        self.inner.state.borrow().current_step_index()
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.inner.config.steps.len()
    }

    /// The active step, `None` while inactive.
    #[must_use]
    pub fn current_step(&self) -> Option<&TourStep> {
        let index = self.inner.state.borrow().active_step()?;
        self.inner.config.steps.get(index)
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.inner.viewport.get()
    }

    /// Increases on every observable change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }

    #[must_use]
    pub fn measure_phase(&self) -> MeasurePhase {
        self.inner.tracker.borrow().phase()
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Start at the first step, or restart if already running. No-op for a
    /// tour without steps. Returns whether anything happened.
    pub fn start(&self) -> bool {
        self.transition("start", TourState::start)
    }

    /// Abort the tour (fires `on_skip`). No-op while inactive.
    pub fn stop(&self) -> bool {
        self.transition("stop", TourState::stop)
    }

    /// Advance; on the last step this completes the tour.
    pub fn next(&self) -> bool {
        self.transition("next", TourState::next)
    }

    pub fn previous(&self) -> bool {
        self.transition("previous", TourState::previous)
    }

    /// Jump to `index`. Out of range is a no-op.
    pub fn go_to_step(&self, index: usize) -> bool {
        self.transition("go_to_step", |state| state.go_to_step(index))
    }

    /// Dispatch a popover or overlay interaction.
    pub fn handle_action(&self, action: TourAction) -> bool {
        let allow_close = self.inner.config.allow_close;
        self.transition("action", |state| state.handle_action(action, allow_close))
    }

    fn transition(&self, op: &'static str, f: impl FnOnce(&mut TourState) -> Transition) -> bool {
        let _span = debug_span!("tour.transition", op).entered();

        let transition = f(&mut self.inner.state.borrow_mut());
        if transition.is_noop() {
            trace!(op, "transition ignored");
            return false;
        }
        self.remeasure_current();
        self.bump();
        self.inner.epoch.set(self.inner.epoch.get().wrapping_add(1));

        debug!(
            op,
            step = ?self.inner.state.borrow().active_step(),
            events = ?transition.events(),
            "tour transition"
        );

        self.dispatch(transition);
        true
    }

    /// Fire callbacks for `transition` until one of them navigates.
    fn dispatch(&self, transition: Transition) {
        let config = &self.inner.config;
        let epoch = self.inner.epoch.get();
        for event in transition {
            if self.inner.epoch.get() != epoch {
                trace!(?event, "callbacks superseded by a nested transition");
                break;
            }
            let callback = match event {
                TourEvent::Started => config.on_start.clone(),
                TourEvent::StepShown { index } => {
                    self.inner.shown.set(Some(index));
                    config.steps.get(index).and_then(|s| s.on_show.clone())
                }
                TourEvent::StepHidden { index } => {
                    if self.inner.shown.get() != Some(index) {
                        trace!(index, "step never shown; skipping on_hide");
                        continue;
                    }
                    self.inner.shown.set(None);
                    config.steps.get(index).and_then(|s| s.on_hide.clone())
                }
                TourEvent::Completed => config.on_complete.clone(),
                TourEvent::Skipped => config.on_skip.clone(),
            };
            if let Some(callback) = callback {
                callback(self);
            }
        }
    }

    // ── Anchors ─────────────────────────────────────────────────────────

    /// Bind an element to the step with `step_id`, overriding the step's own
    /// anchor. Re-measures if that step is showing.
    pub fn attach_anchor(&self, step_id: &str, anchor: Anchor) {
        self.inner.anchors.borrow_mut().bind(step_id, anchor);
        if self.config().step_index(step_id).is_none() {
            debug!(step_id, "anchor bound to unknown step id");
        }
        self.rebind(step_id);
    }

    /// Remove a binding made with [`attach_anchor`](Self::attach_anchor).
    pub fn detach_anchor(&self, step_id: &str) {
        if self.inner.anchors.borrow_mut().unbind(step_id).is_some() {
            self.rebind(step_id);
        }
    }

    fn rebind(&self, step_id: &str) {
        let is_current = self.current_step().is_some_and(|s| s.id == step_id);
        if is_current {
            self.remeasure_current();
            self.bump();
        }
    }

    /// Effective anchor for step `index`: registry binding first, then the
    /// step's own. Centered steps have none.
    fn anchor_for(&self, index: usize) -> Option<Anchor> {
        let step = self.inner.config.steps.get(index)?;
        if step.is_centered() {
            return None;
        }
        self.inner
            .anchors
            .borrow()
            .get(&step.id)
            .cloned()
            .or_else(|| step.anchor.clone())
    }

    /// Point the tracker at the current step, or idle it if there is nothing
    /// to measure.
    fn remeasure_current(&self) {
        let target = self
            .inner
            .state
            .borrow()
            .active_step()
            .filter(|&i| self.anchor_for(i).is_some());
        let mut tracker = self.inner.tracker.borrow_mut();
        match target {
            Some(index) => tracker.begin(index),
            None => tracker.cancel(),
        }
    }

    // ── Measurement ─────────────────────────────────────────────────────

    /// Advance measurement timers. Issues at most one request, returning its
    /// ticket. A dead anchor is reported as a failed attempt immediately, and
    /// so is a request left unanswered past the policy's `answer_timeout`.
    pub fn tick(&self, now: Instant) -> Option<MeasureTicket> {
        let expired = self.inner.tracker.borrow_mut().expire(now);
        if let Some((ticket, outcome)) = expired {
            debug!(?ticket, "measurement answer overdue; counting as failed attempt");
            self.record(ticket, outcome);
        }

        let ticket = self.inner.tracker.borrow_mut().poll(now)?;
        match self.anchor_for(ticket.step_index) {
            Some(anchor) if anchor.is_alive() => {
                trace!(?ticket, "requesting measurement");
                if anchor.request(ticket) {
                    return Some(ticket);
                }
                self.on_measure_failed(ticket);
                None
            }
            _ => {
                debug!(?ticket, "anchor gone; counting as failed attempt");
                self.on_measure_failed(ticket);
                None
            }
        }
    }

    /// Deliver a measured rectangle (viewport coordinates) for `ticket`.
    pub fn on_measured(&self, ticket: MeasureTicket, rect: Rect) -> MeasureOutcome {
        let outcome = self.inner.tracker.borrow_mut().complete(ticket, rect);
        self.record(ticket, outcome);
        outcome
    }

    /// Report that `ticket` could not be measured.
    pub fn on_measure_failed(&self, ticket: MeasureTicket) -> MeasureOutcome {
        let outcome = self.inner.tracker.borrow_mut().fail(ticket);
        self.record(ticket, outcome);
        outcome
    }

    fn record(&self, ticket: MeasureTicket, outcome: MeasureOutcome) {
        match outcome {
            MeasureOutcome::Stale => {
                trace!(?ticket, "discarding stale measurement");
            }
            MeasureOutcome::Accepted(rect) => {
                debug!(?ticket, ?rect, "anchor measured");
                self.bump();
            }
            MeasureOutcome::Retry { delay } => {
                debug!(?ticket, delay_ms = delay.as_millis() as u64, "measurement retry");
            }
            MeasureOutcome::Exhausted => {
                warn!(
                    step = ticket.step_index,
                    attempts = ticket.attempt,
                    "anchor measurement exhausted; degrading to centered popover"
                );
                self.bump();
            }
        }
    }

    /// Update the viewport. A change while a step is anchored re-measures it.
    ///
    /// The previous rectangle was measured against the old layout, so the
    /// popover is withheld until the new answer arrives.
    pub fn set_viewport(&self, viewport: Size) {
        if self.inner.viewport.get() == viewport {
            return;
        }
        self.inner.viewport.set(viewport);
        self.inner.tracker.borrow_mut().restart();
        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport changed"
        );
        self.bump();
    }

    /// Scroll needed to bring an anchor measured in content coordinates into
    /// view, per the auto-scroll settings.
    #[must_use]
    pub fn scroll_request(&self, anchor_in_content: Rect) -> Option<ScrollRequest> {
        ScrollRequest::for_anchor(anchor_in_content, &self.inner.settings.scroll)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    /// Everything the host needs to draw the current frame.
    #[must_use]
    pub fn snapshot(&self) -> TourSnapshot {
        let config = &self.inner.config;
        let state = self.inner.state.borrow().clone();
        let phase = self.inner.tracker.borrow().phase();
        let viewport = self.viewport();

        let step = state.active_step().and_then(|i| config.steps.get(i));
        let (measure_status, placement, overlay) = match step {
            None => (MeasureStatus::Unanchored, None, OverlayRegions::default()),
            Some(step) => {
                let spec = step.spotlight_spec(config.spotlight_defaults());
                let place = |anchor: Option<Rect>| {
                    compute_popover_placement(
                        anchor,
                        step.preferred_side,
                        viewport,
                        spec,
                        &self.inner.settings.placement,
                    )
                };
                match phase {
                    MeasurePhase::Resolved(rect) => {
                        let placement = place(Some(rect));
                        let overlay = overlay_regions(placement.spotlight.as_ref(), viewport);
                        (MeasureStatus::Measured, Some(placement), overlay)
                    }
                    MeasurePhase::Exhausted => (
                        MeasureStatus::Degraded,
                        Some(place(None)),
                        OverlayRegions::full(viewport),
                    ),
                    MeasurePhase::Idle => (
                        MeasureStatus::Unanchored,
                        Some(place(None)),
                        OverlayRegions::full(viewport),
                    ),
                    MeasurePhase::Waiting(_)
                    | MeasurePhase::Scheduled(_)
                    | MeasurePhase::InFlight(_) => (
                        MeasureStatus::Measuring,
                        None,
                        OverlayRegions::full(viewport),
                    ),
                }
            }
        };

        TourSnapshot {
            revision: self.revision(),
            is_active: state.is_active(),
            current_step_index: state.current_step_index(),
            current_step: step.map(StepView::from),
            total_steps: state.total_steps(),
            measure_status,
            placement,
            overlay,
            controls: PopoverControls::for_state(&state, config),
            overlay_color: config.overlay_color.clone(),
            overlay_style: config.overlay_style.clone(),
            popover_style: config.popover_style.clone(),
            animate: config.animate,
        }
    }

    fn bump(&self) {
        self.inner
            .revision
            .set(self.inner.revision.get().wrapping_add(1));
    }
}

impl fmt::Debug for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("state", &*self.inner.state.borrow())
            .field("phase", &self.inner.tracker.borrow().phase())
            .field("viewport", &self.inner.viewport.get())
            .field("revision", &self.inner.revision.get())
            .finish_non_exhaustive()
    }
}
