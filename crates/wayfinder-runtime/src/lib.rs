#![forbid(unsafe_code)]

//! Tour runtime: state machine, anchor measurement, and render snapshots.
//!
//! # Role in Wayfinder
//! `wayfinder-runtime` owns everything stateful about a guided tour. The
//! geometry engine (`wayfinder-layout`) stays pure; this crate decides *when*
//! to measure, *which* answers to trust, and *what* to show.
//!
//! # Key components
//! - [`TourState`]: pure step sequencing with ordered [`TourEvent`]s.
//! - [`MeasurementTracker`]: tickets, stale discard, bounded retry.
//! - [`Tour`]: the shared handle tying both to callbacks and anchors.
//! - [`TourSnapshot`]: plain-data view for the host renderer.
//! - [`TourContext`]: explicit injection with a loud missing-tour error.
//!
//! # Example
//!
//! ```
//! use wayfinder_core::Size;
//! use wayfinder_runtime::{MeasureStatus, Tour, TourConfig, TourStep};
//!
//! let config = TourConfig::new()
//!     .step(TourStep::new("welcome").title("Welcome"))
//!     .step(TourStep::new("done").title("That's it"));
//! let tour = Tour::new(config, Size::new(375.0, 812.0)).unwrap();
//!
//! tour.start();
//! let snap = tour.snapshot();
//! assert_eq!(snap.measure_status, MeasureStatus::Unanchored);
//! assert_eq!(snap.controls.unwrap().progress_label.as_deref(), Some("1 of 2"));
//! ```

pub mod anchor;
pub mod config;
pub mod context;
pub mod error;
pub mod measure;
pub mod runtime;
pub mod snapshot;
pub mod state;
pub mod step;

pub use anchor::{Anchor, AnchorRegistry, Measurable};
pub use config::{DEFAULT_OVERLAY_COLOR, RuntimeSettings, StyleOverrides, TourConfig};
pub use context::TourContext;
pub use error::TourError;
pub use measure::{
    MeasureOutcome, MeasurePhase, MeasurePolicy, MeasureTicket, MeasurementTracker,
};
pub use runtime::{Tour, WeakTour};
pub use snapshot::{MeasureStatus, PopoverControls, StepView, TourSnapshot};
pub use state::{TourAction, TourEvent, TourState, Transition};
pub use step::{Callback, TourStep};
