//! Property-based invariant tests for `Rect`.
//!
//! Coordinates are drawn from whole numbers so every sum and halving below is
//! exact in `f32`, and equality can be asserted without tolerances.
//!
//! 1. `inflate(a)` grows each dimension by `2a` and keeps the center.
//! 2. A non-negative inflate of a measurable rect contains the original.
//! 3. `intersection_opt` is symmetric.
//! 4. An intersection, when present, is measurable and inside both inputs.
//! 5. A measurable rect intersected with itself is itself.
//! 6. Rects separated along an axis never intersect.
//! 7. `is_measurable` holds exactly for finite rects with positive size.

use proptest::prelude::*;
use wayfinder_core::Rect;

// ── Strategies ──────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f32> {
    (-1000i32..1000).prop_map(|v| v as f32)
}

fn extent() -> impl Strategy<Value = f32> {
    (1i32..500).prop_map(|v| v as f32)
}

fn measurable_rect() -> impl Strategy<Value = Rect> {
    (coord(), coord(), extent(), extent()).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

/// Any component may be non-finite, zero or negative.
fn any_component() -> impl Strategy<Value = f32> {
    prop_oneof![
        4 => (-500i32..500).prop_map(|v| v as f32),
        1 => Just(0.0f32),
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Inflate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inflate_grows_around_center(r in measurable_rect(), a in -50i32..50) {
        let a = a as f32;
        let grown = r.inflate(a);
        prop_assert_eq!(grown.width, r.width + 2.0 * a);
        prop_assert_eq!(grown.height, r.height + 2.0 * a);
        prop_assert_eq!(grown.center_x(), r.center_x());
        prop_assert_eq!(grown.center_y(), r.center_y());
    }

    #[test]
    fn non_negative_inflate_contains_original(r in measurable_rect(), a in 0i32..50) {
        let grown = r.inflate(a as f32);
        prop_assert!(grown.is_measurable());
        prop_assert!(grown.contains_rect(&r));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-6. Intersection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersection_is_symmetric(a in measurable_rect(), b in measurable_rect()) {
        prop_assert_eq!(a.intersection_opt(&b), b.intersection_opt(&a));
    }

    #[test]
    fn intersection_lies_inside_both(a in measurable_rect(), b in measurable_rect()) {
        match a.intersection_opt(&b) {
            Some(i) => {
                prop_assert!(i.is_measurable());
                prop_assert!(a.contains_rect(&i));
                prop_assert!(b.contains_rect(&i));
                prop_assert_eq!(a.intersection(&b), i);
            }
            None => prop_assert!(a.intersection(&b).is_empty()),
        }
    }

    #[test]
    fn self_intersection_is_identity(r in measurable_rect()) {
        prop_assert_eq!(r.intersection_opt(&r), Some(r));
    }

    #[test]
    fn separated_rects_never_intersect(
        a in measurable_rect(),
        gap in 0i32..100,
        y in coord(),
        w in extent(),
        h in extent(),
    ) {
        // `b` starts at or beyond `a`'s exclusive right edge.
        let b = Rect::new(a.right() + gap as f32, y, w, h);
        prop_assert_eq!(a.intersection_opt(&b), None);
        prop_assert_eq!(b.intersection_opt(&a), None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Measurability
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn measurable_iff_finite_and_positive(
        x in any_component(),
        y in any_component(),
        w in any_component(),
        h in any_component(),
    ) {
        let r = Rect::new(x, y, w, h);
        let expected = [x, y, w, h].iter().all(|v| v.is_finite()) && w > 0.0 && h > 0.0;
        prop_assert_eq!(r.is_measurable(), expected);
    }

    #[test]
    fn generated_rects_are_measurable(r in measurable_rect()) {
        prop_assert!(r.is_measurable());
        prop_assert!(r.area() > 0.0);
    }
}
