//! Property-based invariant tests for the wayfinder-layout placement engine.
//!
//! These tests verify structural invariants that must hold for **any**
//! combination of anchor, viewport, padding and preferred side:
//!
//! 1. Spotlight top-left is never negative for non-negative padding.
//! 2. Unclamped spotlight extents grow by exactly twice the padding.
//! 3. Clamped spotlight always lies inside the viewport.
//! 4. Flips stay on the preferred side's axis.
//! 5. A flip implies the preferred side was too tight and the opposite roomier.
//! 6. Cross-axis offset respects the spacing margins (or pins to spacing).
//! 7. No anchor / center side always centers without a spotlight.
//! 8. Overlay bands never overlap the cutout and tile the viewport.
//! 9. Placement is deterministic.

use proptest::prelude::*;
use wayfinder_core::{Rect, Side, Size};
use wayfinder_layout::{
    AvailableSpace, PlacementConfig, SpotlightSpec, compute_popover_placement, compute_spotlight,
    compute_spotlight_clamped, overlay_regions,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn viewport_strategy() -> impl Strategy<Value = Size> {
    (200.0f32..=2000.0, 200.0f32..=2000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn anchor_strategy() -> impl Strategy<Value = Rect> {
    (-200.0f32..=2000.0, -200.0f32..=2000.0, 1.0f32..=600.0, 1.0f32..=600.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Top),
        Just(Side::Bottom),
        Just(Side::Left),
        Just(Side::Right),
        Just(Side::Center),
    ]
}

fn spec_strategy() -> impl Strategy<Value = SpotlightSpec> {
    (0.0f32..=40.0, 0.0f32..=40.0).prop_map(|(p, r)| SpotlightSpec::new(p, r))
}

fn config_strategy() -> impl Strategy<Value = PlacementConfig> {
    (
        50.0f32..=500.0,
        50.0f32..=400.0,
        0.0f32..=32.0,
        0.0f32..=400.0,
        any::<bool>(),
    )
        .prop_map(|(w, h, spacing, min_space, clamp)| {
            PlacementConfig::default()
                .popover_size(Size::new(w, h))
                .spacing(spacing)
                .min_space(min_space)
                .clamp_spotlight(clamp)
        })
}

const EPS: f32 = 1e-3;

// ═════════════════════════════════════════════════════════════════════════
// 1–3. Spotlight geometry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn spotlight_origin_never_negative(anchor in anchor_strategy(), padding in 0.0f32..=64.0) {
        let spot = compute_spotlight(anchor, padding);
        prop_assert!(spot.x >= 0.0);
        prop_assert!(spot.y >= 0.0);
    }

    #[test]
    fn spotlight_extent_grows_by_twice_padding(anchor in anchor_strategy(), padding in 0.0f32..=64.0) {
        let spot = compute_spotlight(anchor, padding);
        prop_assert!((spot.width - (anchor.width + 2.0 * padding)).abs() < EPS);
        prop_assert!((spot.height - (anchor.height + 2.0 * padding)).abs() < EPS);
    }

    #[test]
    fn clamped_spotlight_inside_viewport(
        anchor in anchor_strategy(),
        padding in 0.0f32..=64.0,
        viewport in viewport_strategy(),
    ) {
        let spot = compute_spotlight_clamped(anchor, padding, viewport);
        prop_assert!(spot.x >= 0.0 && spot.y >= 0.0);
        prop_assert!(spot.width >= 0.0 && spot.height >= 0.0);
        prop_assert!(spot.right() <= viewport.width + EPS);
        prop_assert!(spot.bottom() <= viewport.height + EPS);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Flip rule
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flip_stays_on_axis(
        anchor in anchor_strategy(),
        side in side_strategy(),
        viewport in viewport_strategy(),
        spec in spec_strategy(),
        config in config_strategy(),
    ) {
        let r = compute_popover_placement(Some(anchor), side, viewport, spec, &config);
        if side == Side::Center {
            prop_assert_eq!(r.resolved_side, Side::Center);
        } else {
            prop_assert!(r.resolved_side == side || r.resolved_side == side.opposite());
            prop_assert_eq!(r.resolved_side.axis(), side.axis());
        }
    }

    #[test]
    fn flip_only_when_justified(
        anchor in anchor_strategy(),
        side in side_strategy(),
        viewport in viewport_strategy(),
        config in config_strategy(),
    ) {
        let r = compute_popover_placement(Some(anchor), side, viewport, SpotlightSpec::default(), &config);
        let space = AvailableSpace::around(anchor, viewport);
        if r.flipped() && side != Side::Center {
            prop_assert!(space.on(side) < config.min_space);
            prop_assert!(space.on(side.opposite()) > space.on(side));
        }
        if space.on(side) >= config.min_space {
            prop_assert_eq!(r.resolved_side, side);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Cross-axis clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cross_axis_respects_margins(
        anchor in anchor_strategy(),
        side in prop_oneof![Just(Side::Top), Just(Side::Bottom), Just(Side::Left), Just(Side::Right)],
        viewport in viewport_strategy(),
        config in config_strategy(),
    ) {
        let r = compute_popover_placement(Some(anchor), side, viewport, SpotlightSpec::default(), &config);
        let (offset, extent, size) = match r.resolved_side {
            Side::Top | Side::Bottom => (r.popover.x, viewport.width, config.popover_size.width),
            _ => (r.popover.y, viewport.height, config.popover_size.height),
        };
        let hi = extent - size - config.spacing;
        if hi >= config.spacing {
            prop_assert!(offset >= config.spacing - EPS);
            prop_assert!(offset <= hi + EPS);
        } else {
            prop_assert!((offset - config.spacing).abs() < EPS);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Centering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_anchor_always_centers(
        side in side_strategy(),
        viewport in viewport_strategy(),
        config in config_strategy(),
    ) {
        let r = compute_popover_placement(None, side, viewport, SpotlightSpec::default(), &config);
        prop_assert_eq!(r.resolved_side, Side::Center);
        prop_assert!(r.spotlight.is_none());
        let cx = r.popover.center_x();
        let cy = r.popover.center_y();
        prop_assert!((cx - viewport.width / 2.0).abs() < EPS);
        prop_assert!((cy - viewport.height / 2.0).abs() < EPS);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Overlay tiling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlay_bands_tile_viewport(
        anchor in anchor_strategy(),
        viewport in viewport_strategy(),
        spec in spec_strategy(),
        config in config_strategy(),
    ) {
        let r = compute_popover_placement(Some(anchor), Side::Bottom, viewport, spec, &config);
        let regions = overlay_regions(r.spotlight.as_ref(), viewport);
        let cutout_area = regions.cutout.map_or(0.0, |c| c.area());
        let total = regions.dimmed_area() + cutout_area;
        let expected = viewport.width * viewport.height;
        prop_assert!((total - expected).abs() <= expected * 1e-4);
        if let Some(cutout) = regions.cutout {
            for band in &regions.dimmed {
                prop_assert!(band.intersection_opt(&cutout).is_none());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placement_is_deterministic(
        anchor in anchor_strategy(),
        side in side_strategy(),
        viewport in viewport_strategy(),
        spec in spec_strategy(),
        config in config_strategy(),
    ) {
        let a = compute_popover_placement(Some(anchor), side, viewport, spec, &config);
        let b = compute_popover_placement(Some(anchor), side, viewport, spec, &config);
        prop_assert_eq!(a, b);
    }
}

// ── Reference scenarios ─────────────────────────────────────────────────

#[test]
fn reference_flip_scenario() {
    let r = compute_popover_placement(
        Some(Rect::new(100.0, 700.0, 100.0, 50.0)),
        Side::Bottom,
        Size::new(375.0, 800.0),
        SpotlightSpec::default(),
        &PlacementConfig::default(),
    );
    assert_eq!(r.resolved_side, Side::Top);
}

#[test]
fn reference_clamp_scenario() {
    let r = compute_popover_placement(
        Some(Rect::new(10.0, 100.0, 20.0, 20.0)),
        Side::Bottom,
        Size::new(375.0, 812.0),
        SpotlightSpec::default(),
        &PlacementConfig::default(),
    );
    assert_eq!(r.popover.x, 16.0);
}
