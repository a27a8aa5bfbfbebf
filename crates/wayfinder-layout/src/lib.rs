#![forbid(unsafe_code)]

//! Geometry engine for guided tours.
//!
//! Pure functions, no state, no side effects. Given a measured anchor
//! rectangle, a preferred side and the viewport, the engine decides:
//!
//! - where the spotlight cutout goes ([`compute_spotlight`]),
//! - which bands of the viewport stay dimmed ([`overlay_regions`]),
//! - where the popover goes and which side it actually ended up on
//!   ([`compute_popover_placement`]),
//! - how far a scroll view has to move to bring the anchor into view
//!   ([`ScrollRequest::for_anchor`]).
//!
//! # Example
//!
//! ```
//! use wayfinder_core::{Rect, Side, Size};
//! use wayfinder_layout::{PlacementConfig, SpotlightSpec, compute_popover_placement};
//!
//! let anchor = Rect::new(20.0, 700.0, 120.0, 50.0);
//! let viewport = Size::new(375.0, 800.0);
//! let result = compute_popover_placement(
//!     Some(anchor),
//!     Side::Bottom,
//!     viewport,
//!     SpotlightSpec::default(),
//!     &PlacementConfig::default(),
//! );
//! // Only 50 units below the anchor: the popover flips above it.
//! assert_eq!(result.resolved_side, Side::Top);
//! ```

pub mod config;
pub mod overlay;
pub mod placement;
pub mod scroll;
pub mod spotlight;

pub use config::{PlacementConfig, PlacementConfigParse};
pub use overlay::{OverlayRegions, overlay_regions};
pub use placement::{AvailableSpace, PlacementResult, compute_popover_placement, resolve_side};
pub use scroll::{AutoScrollConfig, ScrollRequest, scroll_offset};
pub use spotlight::{Spotlight, SpotlightSpec, compute_spotlight, compute_spotlight_clamped};
