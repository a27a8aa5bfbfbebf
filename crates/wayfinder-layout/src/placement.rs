#![forbid(unsafe_code)]

//! Popover placement: side selection, flipping, and cross-axis clamping.
//!
//! # Invariants
//!
//! 1. No anchor (or `Side::Center`) always yields a centered popover with
//!    `resolved_side == Center` and no spotlight.
//! 2. Flipping is single-axis: top<->bottom, left<->right. Never cascades.
//! 3. A flip only happens when the preferred side is below `min_space` AND the
//!    opposite side has strictly more room.
//! 4. The cross-axis offset lies in `[spacing, viewport - popover - spacing]`,
//!    or exactly `spacing` when that range is inverted.
//! 5. `resolved_side` is the side the popover was actually placed on.
//!
//! # Decision rule
//!
//! ```text
//! space(top)    = anchor.y
//! space(bottom) = viewport.height - anchor.bottom
//! space(left)   = anchor.x
//! space(right)  = viewport.width - anchor.right
//!
//! flip  <=>  space(preferred) < min_space  &&  space(opposite) > space(preferred)
//! ```

use serde::{Deserialize, Serialize};
use wayfinder_core::{Rect, Side, Size};

use crate::config::PlacementConfig;
use crate::spotlight::{Spotlight, SpotlightSpec};

/// Free space between the anchor and each viewport edge.
///
/// Values are negative when the anchor overflows that edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailableSpace {
    pub above: f32,
    pub below: f32,
    pub left: f32,
    pub right: f32,
}

impl AvailableSpace {
    /// Measure the space around `anchor` inside `viewport`.
    #[must_use]
    pub fn around(anchor: Rect, viewport: Size) -> Self {
        Self {
            above: anchor.y,
            below: viewport.height - anchor.bottom(),
            left: anchor.x,
            right: viewport.width - anchor.right(),
        }
    }

    /// Space on `side`; `Center` has none.
    #[must_use]
    pub fn on(&self, side: Side) -> f32 {
        match side {
            Side::Top => self.above,
            Side::Bottom => self.below,
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Center => 0.0,
        }
    }
}

/// Output of the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Cutout around the anchor; `None` when centered.
    pub spotlight: Option<Spotlight>,
    /// Popover bounding box in viewport coordinates.
    pub popover: Rect,
    /// Side after flip resolution. Drives the entry-animation direction.
    pub resolved_side: Side,
    /// Side the step asked for.
    pub preferred_side: Side,
}

impl PlacementResult {
    /// Whether the popover ended up on a different side than requested.
    #[must_use]
    pub fn flipped(&self) -> bool {
        self.resolved_side != self.preferred_side
    }
}

/// Pick the side the popover goes on, flipping across the same axis when the
/// preferred side is too tight.
#[must_use]
pub fn resolve_side(preferred: Side, space: &AvailableSpace, min_space: f32) -> Side {
    if preferred == Side::Center {
        return Side::Center;
    }
    let opposite = preferred.opposite();
    let here = space.on(preferred);
    let there = space.on(opposite);
    if here < min_space && there > here {
        opposite
    } else {
        preferred
    }
}

/// Clamp a cross-axis offset into `[spacing, extent - popover - spacing]`.
///
/// When the popover does not fit between the margins the range is inverted;
/// the lower bound wins.
fn clamp_cross(centered: f32, extent: f32, popover: f32, spacing: f32) -> f32 {
    let lo = spacing;
    let hi = extent - popover - spacing;
    if hi.is_nan() || hi < lo {
        return lo;
    }
    centered.clamp(lo, hi)
}

fn centered(preferred: Side, viewport: Size, popover: Size) -> PlacementResult {
    PlacementResult {
        spotlight: None,
        popover: Rect::new(
            (viewport.width - popover.width) / 2.0,
            (viewport.height - popover.height) / 2.0,
            popover.width,
            popover.height,
        ),
        resolved_side: Side::Center,
        preferred_side: preferred,
    }
}

/// Place the popover for a step.
///
/// `anchor` is the measured element rectangle; a missing or unmeasurable
/// anchor centers the popover. `spec` supplies the spotlight padding and
/// corner radius the popover is offset from.
#[must_use]
pub fn compute_popover_placement(
    anchor: Option<Rect>,
    preferred: Side,
    viewport: Size,
    spec: SpotlightSpec,
    config: &PlacementConfig,
) -> PlacementResult {
    let popover = config.popover_size;
    let Some(anchor) = anchor.filter(Rect::is_measurable) else {
        return centered(preferred, viewport, popover);
    };

    let space = AvailableSpace::around(anchor, viewport);
    let side = resolve_side(preferred, &space, config.min_space);
    let spotlight = Spotlight::new(anchor, spec, viewport, config.clamp_spotlight);
    let spot = spotlight.rect;
    let gap = config.spacing;

    let (x, y) = match side {
        Side::Top | Side::Bottom => {
            let x = clamp_cross(
                anchor.center_x() - popover.width / 2.0,
                viewport.width,
                popover.width,
                gap,
            );
            let y = if side == Side::Top {
                spot.y - gap - popover.height
            } else {
                spot.bottom() + gap
            };
            (x, y)
        }
        Side::Left | Side::Right => {
            let y = clamp_cross(
                anchor.center_y() - popover.height / 2.0,
                viewport.height,
                popover.height,
                gap,
            );
            let x = if side == Side::Left {
                spot.x - gap - popover.width
            } else {
                spot.right() + gap
            };
            (x, y)
        }
        Side::Center => return centered(preferred, viewport, popover),
    };

    PlacementResult {
        spotlight: Some(spotlight),
        popover: Rect::new(x, y, popover.width, popover.height),
        resolved_side: side,
        preferred_side: preferred,
    }
}
