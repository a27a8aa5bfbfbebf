#![forbid(unsafe_code)]

//! Core: geometry primitives, placement sides, and configuration helpers.
//!
//! # Role in Wayfinder
//! `wayfinder-core` is the vocabulary layer. It owns the viewport-space
//! [`Rect`](geometry::Rect) and [`Size`](geometry::Size) types, the
//! [`Side`](side::Side) a popover can be placed on, and the env parsing
//! helpers every config struct in the workspace shares.
//!
//! # How it fits in the system
//! The geometry engine (`wayfinder-layout`) consumes these types as pure
//! inputs and outputs. The tour runtime (`wayfinder-runtime`) stores measured
//! anchor rectangles as [`Rect`](geometry::Rect) values and hands them to the
//! engine whenever a snapshot is requested.

pub mod env;
pub mod geometry;
pub mod logging;
pub mod side;

pub use env::ConfigError;
pub use geometry::{Rect, Size};
pub use side::{Axis, Side};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, info_span, trace, warn};
