#![forbid(unsafe_code)]

//! Read-only view of a tour for the host renderer.
//!
//! A [`TourSnapshot`] is a plain value: it owns no handles and can be
//! serialized, diffed by `revision`, or sent to a render thread.

use serde::{Deserialize, Serialize};
use wayfinder_core::Side;
use wayfinder_layout::{OverlayRegions, PlacementResult};

use crate::config::{StyleOverrides, TourConfig};
use crate::state::TourState;
use crate::step::TourStep;

/// Where the current step's geometry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureStatus {
    /// No anchor, or a centered step: popover centered, no spotlight.
    Unanchored,
    /// Waiting for the anchor's rectangle. No placement yet.
    Measuring,
    /// Anchor measured; spotlight and popover placed around it.
    Measured,
    /// Measurement gave up; popover centered over a full overlay.
    Degraded,
}

/// Display data of the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepView {
    pub id: String,
    pub title: String,
    pub text: String,
    pub preferred_side: Side,
}

impl From<&TourStep> for StepView {
    fn from(step: &TourStep) -> Self {
        Self {
            id: step.id.clone(),
            title: step.title.clone(),
            text: step.text.clone(),
            preferred_side: step.preferred_side,
        }
    }
}

/// What the popover's controls row should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopoverControls {
    /// "2 of 5" when progress is shown.
    pub progress_label: Option<String>,
    pub show_buttons: bool,
    /// Previous is offered from the second step on.
    pub show_previous: bool,
    /// "Next", or "Done" on the last step.
    pub next_label: String,
    pub show_close: bool,
}

impl PopoverControls {
    pub const NEXT: &'static str = "Next";
    pub const DONE: &'static str = "Done";

    /// Controls for the active step; `None` while inactive.
    #[must_use]
    pub fn for_state(state: &TourState, config: &TourConfig) -> Option<Self> {
        if !state.is_active() {
            return None;
        }
        let (current, total) = state.progress();
        Some(Self {
            progress_label: config
                .show_progress
                .then(|| format!("{current} of {total}")),
            show_buttons: config.show_buttons,
            show_previous: config.show_buttons && state.can_go_back(),
            next_label: if state.is_last_step() {
                Self::DONE
            } else {
                Self::NEXT
            }
            .to_string(),
            show_close: config.allow_close,
        })
    }
}

/// Everything a host needs to draw the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourSnapshot {
    /// Increases on every observable change.
    pub revision: u64,
    pub is_active: bool,
    pub current_step_index: usize,
    pub current_step: Option<StepView>,
    pub total_steps: usize,
    pub measure_status: MeasureStatus,
    /// `None` while inactive or while the anchor is being measured.
    pub placement: Option<PlacementResult>,
    /// Dimmed bands. Empty while inactive.
    pub overlay: OverlayRegions,
    pub controls: Option<PopoverControls>,
    pub overlay_color: String,
    pub overlay_style: StyleOverrides,
    pub popover_style: StyleOverrides,
    pub animate: bool,
}

impl TourSnapshot {
    /// Whether the spotlight cutout is showing.
    #[must_use]
    pub fn has_spotlight(&self) -> bool {
        self.placement.is_some_and(|p| p.spotlight.is_some())
    }

    /// Side the popover should animate in from.
    #[must_use]
    pub fn resolved_side(&self) -> Option<Side> {
        self.placement.map(|p| p.resolved_side)
    }
}
