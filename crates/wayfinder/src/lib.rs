#![forbid(unsafe_code)]

//! Wayfinder public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! prelude for host integrations.
//!
//! ```
//! use wayfinder::prelude::*;
//!
//! let tour = Tour::new(
//!     TourConfig::new()
//!         .step(TourStep::new("intro").title("Hello").side(Side::Center)),
//!     Size::new(1024.0, 768.0),
//! )
//! .unwrap();
//! let ctx = TourContext::provide(tour);
//! ctx.tour().unwrap().start();
//! assert!(ctx.tour().unwrap().snapshot().is_active);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use wayfinder_core::{Axis, ConfigError, Rect, Side, Size};

// --- Layout re-exports -----------------------------------------------------

pub use wayfinder_layout::{
    AutoScrollConfig, AvailableSpace, OverlayRegions, PlacementConfig, PlacementResult,
    ScrollRequest, Spotlight, SpotlightSpec, compute_popover_placement, compute_spotlight,
    compute_spotlight_clamped, overlay_regions, resolve_side, scroll_offset,
};

// --- Runtime re-exports ----------------------------------------------------

pub use wayfinder_runtime::{
    Anchor, AnchorRegistry, Callback, Measurable, MeasureOutcome, MeasurePhase, MeasurePolicy,
    MeasureStatus, MeasureTicket, MeasurementTracker, PopoverControls, RuntimeSettings, StepView,
    Tour, TourAction, TourConfig, TourContext, TourError, TourEvent, TourSnapshot, TourState,
    TourStep, Transition, WeakTour,
};

/// Standard result type for wayfinder APIs.
pub type Result<T> = std::result::Result<T, TourError>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Anchor, Measurable, MeasureStatus, MeasureTicket, Rect, Result, RuntimeSettings, Side,
        Size, Tour, TourAction, TourConfig, TourContext, TourError, TourSnapshot, TourStep,
    };

    pub use crate::{core, layout, runtime};
}

pub use wayfinder_core as core;
pub use wayfinder_layout as layout;
pub use wayfinder_runtime as runtime;
