#![forbid(unsafe_code)]

//! Decompose the dimmed overlay into rectangles around the cutout.
//!
//! Hosts without a mask primitive draw the overlay as four bands (top,
//! bottom, left, right) framing the spotlight. The bands tile the viewport
//! minus the cutout exactly: they never overlap each other or the cutout.

use serde::{Deserialize, Serialize};
use wayfinder_core::{Rect, Size};

use crate::spotlight::Spotlight;

/// Dimmed regions of the overlay.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlayRegions {
    /// Visible cutout (spotlight clipped to the viewport), if any.
    pub cutout: Option<Rect>,
    /// Dimmed rectangles, in top, bottom, left, right order. Empty bands are
    /// omitted.
    pub dimmed: Vec<Rect>,
}

impl OverlayRegions {
    /// A single uniform dimmed rectangle covering the viewport.
    #[must_use]
    pub fn full(viewport: Size) -> Self {
        let full = Rect::from_size(viewport);
        Self {
            cutout: None,
            dimmed: if full.is_empty() { Vec::new() } else { vec![full] },
        }
    }

    /// Total dimmed area.
    #[must_use]
    pub fn dimmed_area(&self) -> f32 {
        self.dimmed.iter().map(Rect::area).sum()
    }

    /// Whether a point falls inside the cutout (interactions pass through).
    #[must_use]
    pub fn is_in_cutout(&self, x: f32, y: f32) -> bool {
        self.cutout.is_some_and(|c| c.contains(x, y))
    }
}

/// Compute the dimmed bands for `spotlight` within `viewport`.
///
/// With no spotlight, or a spotlight entirely off-screen, the overlay is a
/// single full-viewport rectangle.
#[must_use]
pub fn overlay_regions(spotlight: Option<&Spotlight>, viewport: Size) -> OverlayRegions {
    let screen = Rect::from_size(viewport);
    let Some(cutout) = spotlight.and_then(|s| s.rect.intersection_opt(&screen)) else {
        return OverlayRegions::full(viewport);
    };

    let bands = [
        Rect::new(0.0, 0.0, viewport.width, cutout.y),
        Rect::new(
            0.0,
            cutout.bottom(),
            viewport.width,
            viewport.height - cutout.bottom(),
        ),
        Rect::new(0.0, cutout.y, cutout.x, cutout.height),
        Rect::new(
            cutout.right(),
            cutout.y,
            viewport.width - cutout.right(),
            cutout.height,
        ),
    ];

    OverlayRegions {
        cutout: Some(cutout),
        dimmed: bands.into_iter().filter(|b| !b.is_empty()).collect(),
    }
}
