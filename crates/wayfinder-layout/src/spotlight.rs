#![forbid(unsafe_code)]

//! Spotlight cutout geometry.
//!
//! # Invariants
//!
//! 1. The cutout's top-left corner is never negative for `padding >= 0`.
//! 2. Width and height always grow by exactly `2 * padding`, unless the
//!    clamped variant trims them at the viewport's far edges.
//! 3. The corner radius never exceeds half of the shorter side.

use serde::{Deserialize, Serialize};
use wayfinder_core::{Rect, Size};

/// Per-step spotlight styling: breathing room and rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotlightSpec {
    pub padding: f32,
    pub corner_radius: f32,
}

impl Default for SpotlightSpec {
    fn default() -> Self {
        Self {
            padding: 8.0,
            corner_radius: 8.0,
        }
    }
}

impl SpotlightSpec {
    #[must_use]
    pub const fn new(padding: f32, corner_radius: f32) -> Self {
        Self {
            padding,
            corner_radius,
        }
    }
}

/// The region of the overlay left undimmed around the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spotlight {
    pub rect: Rect,
    pub corner_radius: f32,
}

impl Spotlight {
    /// Build the cutout for `anchor`, optionally clamped to `viewport`.
    #[must_use]
    pub fn new(anchor: Rect, spec: SpotlightSpec, viewport: Size, clamp: bool) -> Self {
        let rect = if clamp {
            compute_spotlight_clamped(anchor, spec.padding, viewport)
        } else {
            compute_spotlight(anchor, spec.padding)
        };
        let max_radius = (rect.width.min(rect.height) / 2.0).max(0.0);
        Self {
            rect,
            corner_radius: spec.corner_radius.clamp(0.0, max_radius),
        }
    }
}

/// Expand `anchor` by `padding` on all sides, pinning the top-left corner at
/// the origin. The far edges are left alone and may overflow the viewport.
#[must_use]
pub fn compute_spotlight(anchor: Rect, padding: f32) -> Rect {
    Rect::new(
        (anchor.x - padding).max(0.0),
        (anchor.y - padding).max(0.0),
        anchor.width + padding * 2.0,
        anchor.height + padding * 2.0,
    )
}

/// Like [`compute_spotlight`], then trim the right and bottom edges so the
/// cutout stays within `viewport`. Extents never go negative.
#[must_use]
pub fn compute_spotlight_clamped(anchor: Rect, padding: f32, viewport: Size) -> Rect {
    let spot = compute_spotlight(anchor, padding);
    let x = spot.x.min(viewport.width.max(0.0));
    let y = spot.y.min(viewport.height.max(0.0));
    let right = spot.right().min(viewport.width);
    let bottom = spot.bottom().min(viewport.height);
    Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
}
