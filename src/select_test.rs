#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use uuid::Uuid;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn bb(x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
    BoundingBox::new(x, y, w, h)
}

fn bounds_approx_eq(a: &BoundingBox, b: &BoundingBox) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.width, b.width) && approx_eq(a.height, b.height)
}

fn selected(bounds: BoundingBox) -> Selection {
    let mut sel = Selection::new();
    sel.set_selection(vec![Uuid::new_v4()], Some(bounds));
    sel
}

// =============================================================
// Selection membership
// =============================================================

#[test]
fn new_selection_is_empty() {
    let sel = Selection::new();
    assert!(sel.is_empty());
    assert!(sel.bounds().is_none());
    assert_eq!(sel.rotation(), 0.0);
}

#[test]
fn set_selection_replaces_membership() {
    let mut sel = Selection::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    sel.set_selection(vec![a], Some(bb(0.0, 0.0, 10.0, 10.0)));
    sel.set_selection(vec![b], Some(bb(5.0, 5.0, 10.0, 10.0)));
    assert!(!sel.contains(&a));
    assert!(sel.contains(&b));
    assert_eq!(sel.bounds(), Some(bb(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn set_selection_empty_ids_clears() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.set_selection(Vec::new(), None);
    assert!(sel.is_empty());
    assert!(sel.bounds().is_none());
}

#[test]
fn set_selection_keeps_rotation_while_nonempty() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    sel.end_transform();
    let rotation = sel.rotation();
    assert!(rotation != 0.0);

    sel.set_selection(vec![Uuid::new_v4()], Some(bb(1.0, 1.0, 5.0, 5.0)));
    assert_eq!(sel.rotation(), rotation);
}

#[test]
fn rotation_resets_only_when_emptied() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    sel.end_transform();
    assert!(sel.rotation() != 0.0);

    sel.clear();
    assert_eq!(sel.rotation(), 0.0);
}

#[test]
fn set_selection_ids_without_bounds_clears() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.set_selection(vec![Uuid::new_v4()], None);
    assert!(sel.is_empty());
    assert!(sel.bounds().is_none());
}

#[test]
fn add_to_selection_unions_bounds() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.add_to_selection(vec![Uuid::new_v4()], bb(20.0, 30.0, 10.0, 10.0));
    assert_eq!(sel.ids().len(), 2);
    assert_eq!(sel.bounds(), Some(bb(0.0, 0.0, 30.0, 40.0)));
}

#[test]
fn add_to_selection_on_empty_adopts_bounds() {
    let mut sel = Selection::new();
    sel.add_to_selection(vec![Uuid::new_v4()], bb(5.0, 5.0, 10.0, 10.0));
    assert_eq!(sel.bounds(), Some(bb(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn add_to_selection_empty_ids_is_noop() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.add_to_selection(Vec::new(), bb(100.0, 100.0, 50.0, 50.0));
    assert_eq!(sel.bounds(), Some(bb(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn remove_from_selection_keeps_bounds_while_nonempty() {
    let mut sel = Selection::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    sel.set_selection(vec![a], Some(bb(0.0, 0.0, 10.0, 10.0)));
    sel.add_to_selection(vec![b], bb(20.0, 20.0, 10.0, 10.0));

    sel.remove_from_selection(&[a]);
    assert!(sel.contains(&b));
    // Bounds are not re-queried on removal.
    assert_eq!(sel.bounds(), Some(bb(0.0, 0.0, 30.0, 30.0)));
}

#[test]
fn remove_last_member_resets_state() {
    let mut sel = Selection::new();
    let a = Uuid::new_v4();
    sel.set_selection(vec![a], Some(bb(0.0, 0.0, 10.0, 10.0)));
    sel.remove_from_selection(&[a]);
    assert!(sel.is_empty());
    assert!(sel.bounds().is_none());
    assert_eq!(sel.rotation(), 0.0);
}

// =============================================================
// Transform lifecycle
// =============================================================

#[test]
fn start_transform_requires_selection() {
    let mut sel = Selection::new();
    assert!(!sel.start_transform(Point::new(0.0, 0.0), None));
    assert!(!sel.is_transforming());
}

#[test]
fn start_transform_snapshots_originals() {
    let mut sel = selected(bb(10.0, 20.0, 100.0, 50.0));
    assert!(sel.start_transform(Point::new(0.0, 0.0), None));
    let ts = sel.transform().unwrap();
    assert_eq!(ts.op, TransformOp::Move);
    assert_eq!(ts.original_bounds, bb(10.0, 20.0, 100.0, 50.0));
    assert_eq!(ts.original_rotation, 0.0);
}

#[test]
fn start_transform_maps_handles_to_ops() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.start_transform(Point::new(0.0, 0.0), Some(Handle::Resize(ResizeAnchor::Se)));
    assert_eq!(sel.transform().unwrap().op, TransformOp::Resize(ResizeAnchor::Se));
    sel.cancel_transform();

    sel.start_transform(Point::new(0.0, 0.0), Some(Handle::Rotate));
    assert_eq!(sel.transform().unwrap().op, TransformOp::Rotate);
}

#[test]
fn start_transform_while_dragging_is_ignored() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    assert!(sel.start_transform(Point::new(0.0, 0.0), None));
    assert!(!sel.start_transform(Point::new(5.0, 5.0), Some(Handle::Rotate)));
    assert_eq!(sel.transform().unwrap().op, TransformOp::Move);
}

#[test]
fn move_translates_bounds() {
    let mut sel = selected(bb(10.0, 20.0, 100.0, 50.0));
    sel.start_transform(Point::new(0.0, 0.0), None);
    sel.update_transform(Point::new(30.0, -10.0), false);
    assert_eq!(sel.bounds(), Some(bb(40.0, 10.0, 100.0, 50.0)));
}

#[test]
fn move_recomputes_from_snapshot_not_cumulative() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.start_transform(Point::new(0.0, 0.0), None);
    sel.update_transform(Point::new(100.0, 0.0), false);
    sel.update_transform(Point::new(5.0, 5.0), false);
    assert_eq!(sel.bounds(), Some(bb(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn update_without_drag_is_noop() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.update_transform(Point::new(100.0, 100.0), false);
    assert_eq!(sel.bounds(), Some(bb(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn end_transform_commits_and_reports() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.start_transform(Point::new(0.0, 0.0), None);
    sel.update_transform(Point::new(5.0, 5.0), false);
    let committed = sel.end_transform().unwrap();
    assert_eq!(committed.previous_bounds, bb(0.0, 0.0, 10.0, 10.0));
    assert_eq!(committed.bounds, bb(5.0, 5.0, 10.0, 10.0));
    assert!(!sel.is_transforming());
    assert_eq!(sel.bounds(), Some(bb(5.0, 5.0, 10.0, 10.0)));
}

#[test]
fn end_transform_without_drag_returns_none() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    assert!(sel.end_transform().is_none());
}

#[test]
fn cancel_transform_restores_snapshot() {
    let mut sel = selected(bb(0.0, 0.0, 10.0, 10.0));
    sel.start_transform(Point::new(0.0, 0.0), None);
    sel.update_transform(Point::new(500.0, 500.0), false);
    sel.cancel_transform();
    assert!(!sel.is_transforming());
    assert_eq!(sel.bounds(), Some(bb(0.0, 0.0, 10.0, 10.0)));
    assert_eq!(sel.rotation(), 0.0);
}

#[test]
fn cancel_transform_restores_rotation() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    assert!(sel.rotation() != 0.0);
    sel.cancel_transform();
    assert_eq!(sel.rotation(), 0.0);
}

// =============================================================
// Resize algebra: unlocked
// =============================================================

#[test]
fn resize_se_unlocked_grows_both() {
    // se from {0,0,100,50} with dx=20 dy=10 grows to {0,0,120,60}.
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::Se, 20.0, 10.0, false);
    assert!(bounds_approx_eq(&out, &bb(0.0, 0.0, 120.0, 60.0)));
}

#[test]
fn resize_nw_unlocked_moves_origin() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::Nw, 10.0, 5.0, false);
    assert!(bounds_approx_eq(&out, &bb(10.0, 5.0, 90.0, 45.0)));
}

#[test]
fn resize_n_unlocked_changes_height_only() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::N, 99.0, 10.0, false);
    assert!(bounds_approx_eq(&out, &bb(0.0, 10.0, 100.0, 40.0)));
}

#[test]
fn resize_e_unlocked_changes_width_only() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::E, 15.0, 99.0, false);
    assert!(bounds_approx_eq(&out, &bb(0.0, 0.0, 115.0, 50.0)));
}

#[test]
fn resize_s_unlocked_grows_height() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::S, 0.0, 25.0, false);
    assert!(bounds_approx_eq(&out, &bb(0.0, 0.0, 100.0, 75.0)));
}

#[test]
fn resize_w_unlocked_moves_west_edge() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::W, 20.0, 0.0, false);
    assert!(bounds_approx_eq(&out, &bb(20.0, 0.0, 80.0, 50.0)));
}

#[test]
fn resize_ne_unlocked() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::Ne, 20.0, -10.0, false);
    assert!(bounds_approx_eq(&out, &bb(0.0, -10.0, 120.0, 60.0)));
}

#[test]
fn resize_sw_unlocked() {
    let out = resize_bounds(&bb(0.0, 0.0, 100.0, 50.0), ResizeAnchor::Sw, -20.0, 10.0, false);
    assert!(bounds_approx_eq(&out, &bb(-20.0, 0.0, 120.0, 60.0)));
}

#[test]
fn opposite_corner_stays_fixed_for_nw() {
    let base = bb(10.0, 10.0, 100.0, 50.0);
    let out = resize_bounds(&base, ResizeAnchor::Nw, 7.0, 3.0, false);
    assert!(approx_eq(out.right(), base.right()));
    assert!(approx_eq(out.bottom(), base.bottom()));
}

// =============================================================
// Resize algebra: aspect-locked
// =============================================================

#[test]
fn aspect_lock_preserves_ratio_for_all_anchors() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    let ar = base.width / base.height;
    for anchor in ResizeAnchor::ALL {
        let out = resize_bounds(&base, anchor, 12.0, 6.0, true);
        assert!(
            approx_eq(out.width / out.height, ar),
            "anchor {anchor:?} broke the ratio: {} x {}",
            out.width,
            out.height
        );
    }
}

#[test]
fn aspect_lock_preserves_ratio_shrinking() {
    let base = bb(0.0, 0.0, 80.0, 40.0);
    let ar = 2.0;
    for anchor in ResizeAnchor::ALL {
        let out = resize_bounds(&base, anchor, -6.0, -3.0, true);
        assert!(approx_eq(out.width / out.height, ar), "anchor {anchor:?}");
    }
}

#[test]
fn aspect_lock_se_uses_average_delta() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // avg = (20 + 10) / 2 = 15 → width 115, height 57.5.
    let out = resize_bounds(&base, ResizeAnchor::Se, 20.0, 10.0, true);
    assert!(bounds_approx_eq(&out, &bb(0.0, 0.0, 115.0, 57.5)));
}

#[test]
fn aspect_lock_nw_anchors_south_east() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // avg = (10 + 10) / 2 = 10 → width 90, height 45; x = 10, y = 10/ar = 5.
    let out = resize_bounds(&base, ResizeAnchor::Nw, 10.0, 10.0, true);
    assert!(bounds_approx_eq(&out, &bb(10.0, 5.0, 90.0, 45.0)));
    assert!(approx_eq(out.right(), base.right()));
    assert!(approx_eq(out.bottom(), base.bottom()));
}

#[test]
fn aspect_lock_n_recenters_width() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // dy = 10 → height 40, width 80, x recentered to 10.
    let out = resize_bounds(&base, ResizeAnchor::N, 0.0, 10.0, true);
    assert!(bounds_approx_eq(&out, &bb(10.0, 10.0, 80.0, 40.0)));
    assert!(approx_eq(out.center().x, base.center().x));
}

#[test]
fn aspect_lock_e_recenters_height() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // dx = 20 → width 120, height 60, y recentered to -5.
    let out = resize_bounds(&base, ResizeAnchor::E, 20.0, 0.0, true);
    assert!(bounds_approx_eq(&out, &bb(0.0, -5.0, 120.0, 60.0)));
    assert!(approx_eq(out.center().y, base.center().y));
}

#[test]
fn aspect_lock_ne_anchors_bottom() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // avg = (20 − (−10)) / 2 = 15 → width 115, height 57.5, y = 50 − 57.5.
    let out = resize_bounds(&base, ResizeAnchor::Ne, 20.0, -10.0, true);
    assert!(bounds_approx_eq(&out, &bb(0.0, -7.5, 115.0, 57.5)));
    assert!(approx_eq(out.bottom(), base.bottom()));
}

#[test]
fn aspect_lock_sw_anchors_east() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // avg = (20 + 10) / 2 = 15 → width 115, x = 100 − 115 = −15.
    let out = resize_bounds(&base, ResizeAnchor::Sw, -20.0, 10.0, true);
    assert!(bounds_approx_eq(&out, &bb(-15.0, 0.0, 115.0, 57.5)));
    assert!(approx_eq(out.right(), base.right()));
}

// =============================================================
// Minimum-size clamp
// =============================================================

#[test]
fn clamp_floors_width_from_east() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    let out = resize_bounds(&base, ResizeAnchor::E, -95.0, 0.0, false);
    let out = clamp_min_size(out, &base, ResizeAnchor::E);
    assert_eq!(out.width, 10.0);
    assert_eq!(out.x, 0.0);
}

#[test]
fn clamp_floors_width_from_west_pins_east_edge() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    let out = resize_bounds(&base, ResizeAnchor::W, 95.0, 0.0, false);
    let out = clamp_min_size(out, &base, ResizeAnchor::W);
    assert_eq!(out.width, 10.0);
    assert!(approx_eq(out.right(), base.right()));
}

#[test]
fn clamp_floors_height_from_north_pins_south_edge() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    let out = resize_bounds(&base, ResizeAnchor::N, 0.0, 45.0, false);
    let out = clamp_min_size(out, &base, ResizeAnchor::N);
    assert_eq!(out.height, 10.0);
    assert!(approx_eq(out.bottom(), base.bottom()));
}

#[test]
fn clamp_handles_inverted_drag_past_opposite_edge() {
    let base = bb(0.0, 0.0, 100.0, 50.0);
    // Drag the se corner far past the nw corner: both dims go negative.
    let out = resize_bounds(&base, ResizeAnchor::Se, -500.0, -500.0, false);
    let out = clamp_min_size(out, &base, ResizeAnchor::Se);
    assert_eq!(out.width, 10.0);
    assert_eq!(out.height, 10.0);
}

#[test]
fn min_size_invariant_over_resize_sequence() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Resize(ResizeAnchor::Se)));
    for step in 0..50 {
        let reach = f64::from(step) * 10.0;
        sel.update_transform(Point::new(100.0 - reach, 50.0 - reach), false);
        let b = sel.bounds().unwrap();
        assert!(b.width >= 10.0 && b.height >= 10.0, "step {step}: {b:?}");
    }
}

#[test]
fn controller_resize_applies_clamp() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    sel.start_transform(Point::new(0.0, 0.0), Some(Handle::Resize(ResizeAnchor::W)));
    sel.update_transform(Point::new(99.0, 0.0), false);
    let b = sel.bounds().unwrap();
    assert_eq!(b.width, 10.0);
    assert!(approx_eq(b.right(), 100.0));
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotate_quarter_turn() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    // From due east of center (50, 50) to due south: +90° in screen axes.
    sel.update_transform(Point::new(50.0, 100.0), false);
    assert!(approx_eq(sel.rotation(), FRAC_PI_2));
}

#[test]
fn rotate_accumulates_on_existing_rotation() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    sel.end_transform();

    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    assert!(approx_eq(sel.rotation(), PI));
}

#[test]
fn rotate_does_not_touch_bounds() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    assert_eq!(sel.bounds(), Some(bb(0.0, 0.0, 100.0, 100.0)));
}

#[test]
fn rotate_snap_rounds_to_fifteen_degrees() {
    // Raw 7° snaps down to 0°; raw 10° snaps up to 15°.
    assert!(approx_eq(snap_rotation(7.0_f64.to_radians()), 0.0));
    assert!(approx_eq(snap_rotation(10.0_f64.to_radians()), 15.0_f64.to_radians()));
}

#[test]
fn rotate_snap_handles_negative_angles() {
    assert!(approx_eq(snap_rotation((-7.0_f64).to_radians()), 0.0));
    assert!(approx_eq(snap_rotation((-10.0_f64).to_radians()), (-15.0_f64).to_radians()));
}

#[test]
fn rotate_with_constrain_snaps() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    // 10° raw rotation around the center.
    let angle = 10.0_f64.to_radians();
    let target = Point::new(50.0 + 50.0 * angle.cos(), 50.0 + 50.0 * angle.sin());
    sel.update_transform(target, true);
    assert!(approx_eq(sel.rotation(), 15.0_f64.to_radians()));
}

#[test]
fn normalize_angle_maps_into_pi_range() {
    assert!(approx_eq(normalize_angle(0.0), 0.0));
    assert!(approx_eq(normalize_angle(PI + 0.5), -PI + 0.5));
    assert!(approx_eq(normalize_angle(-PI - 0.5), PI - 0.5));
    assert!(approx_eq(normalize_angle(3.0 * TAU + 0.25), 0.25));
}

#[test]
fn normalize_angle_does_not_affect_stored_rotation() {
    let mut sel = selected(bb(0.0, 0.0, 100.0, 100.0));
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(50.0, 100.0), false);
    sel.end_transform();
    sel.start_transform(Point::new(100.0, 50.0), Some(Handle::Rotate));
    sel.update_transform(Point::new(0.0, 50.0), false);
    // Stored rotation is continuous/unbounded; display normalization is
    // a separate helper.
    assert!(approx_eq(sel.rotation(), 3.0 * FRAC_PI_2));
    assert!(sel.rotation() > PI);
}

// =============================================================
// Handle placement
// =============================================================

#[test]
fn placements_empty_without_selection() {
    let sel = Selection::new();
    assert!(sel.handle_placements(&Camera::default()).is_empty());
}

#[test]
fn placements_have_nine_handles() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let placements = sel.handle_placements(&Camera::default());
    assert_eq!(placements.len(), 9);
    assert!(placements.iter().any(|p| p.handle == Handle::Rotate));
}

#[test]
fn placements_convert_to_screen_space() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let cam = Camera { x: 0.0, y: 0.0, zoom: 2.0 };
    let placements = sel.handle_placements(&cam);
    let se = placements
        .iter()
        .find(|p| p.handle == Handle::Resize(ResizeAnchor::Se))
        .unwrap();
    assert!(approx_eq(se.screen.x, 200.0));
    assert!(approx_eq(se.screen.y, 100.0));
}

#[test]
fn rotate_handle_sits_above_top_midpoint() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let placements = sel.handle_placements(&Camera::default());
    let rotate = placements.iter().find(|p| p.handle == Handle::Rotate).unwrap();
    assert!(approx_eq(rotate.screen.x, 50.0));
    assert!(approx_eq(rotate.screen.y, -24.0));
}

#[test]
fn placements_carry_cursor_hints() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let placements = sel.handle_placements(&Camera::default());
    let n = placements
        .iter()
        .find(|p| p.handle == Handle::Resize(ResizeAnchor::N))
        .unwrap();
    assert_eq!(n.cursor, "ns-resize");
    let nw = placements
        .iter()
        .find(|p| p.handle == Handle::Resize(ResizeAnchor::Nw))
        .unwrap();
    assert_eq!(nw.cursor, "nwse-resize");
}

// =============================================================
// Hit testing
// =============================================================

#[test]
fn hit_test_none_without_selection() {
    let sel = Selection::new();
    assert!(sel.hit_test(Point::new(0.0, 0.0), &Camera::default()).is_none());
}

#[test]
fn hit_test_finds_corner_handle() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let hit = sel.hit_test(Point::new(100.0, 50.0), &Camera::default());
    assert_eq!(hit, Some(SelectionHit::Handle(Handle::Resize(ResizeAnchor::Se))));
}

#[test]
fn hit_test_handle_wins_over_body() {
    // The nw handle sits on the body's corner; the handle must win.
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let hit = sel.hit_test(Point::new(1.0, 1.0), &Camera::default());
    assert_eq!(hit, Some(SelectionHit::Handle(Handle::Resize(ResizeAnchor::Nw))));
}

#[test]
fn hit_test_body_inside_bounds() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let hit = sel.hit_test(Point::new(50.0, 25.0), &Camera::default());
    assert_eq!(hit, Some(SelectionHit::Body));
}

#[test]
fn hit_test_misses_outside() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    assert!(sel.hit_test(Point::new(300.0, 300.0), &Camera::default()).is_none());
}

#[test]
fn hit_test_rotate_handle() {
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let hit = sel.hit_test(Point::new(50.0, -24.0), &Camera::default());
    assert_eq!(hit, Some(SelectionHit::Handle(Handle::Rotate)));
}

#[test]
fn hit_test_within_hit_box_slop() {
    // Hit box is max(8, 8/zoom) * 1.5 = 12 wide at zoom 1: ±6 around the
    // handle center.
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let hit = sel.hit_test(Point::new(105.0, 55.0), &Camera::default());
    assert_eq!(hit, Some(SelectionHit::Handle(Handle::Resize(ResizeAnchor::Se))));
    assert!(sel.hit_test(Point::new(107.0, 57.0), &Camera::default()).is_none());
}

#[test]
fn hit_test_grows_hit_box_when_zoomed_out() {
    // At zoom 0.5 the hit box is max(8, 16) * 1.5 = 24 screen px: ±12.
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let cam = Camera { x: 0.0, y: 0.0, zoom: 0.5 };
    // Se handle sits at screen (50, 25).
    let hit = sel.hit_test(Point::new(60.0, 35.0), &cam);
    assert_eq!(hit, Some(SelectionHit::Handle(Handle::Resize(ResizeAnchor::Se))));
}

#[test]
fn hit_test_uses_screen_space_for_handles() {
    // At zoom 4 the handle hit box stays 12 screen px; a point 5 screen px
    // from the corner still hits even though that is barely 1.25 canvas
    // units.
    let sel = selected(bb(0.0, 0.0, 100.0, 50.0));
    let cam = Camera { x: 0.0, y: 0.0, zoom: 4.0 };
    let hit = sel.hit_test(Point::new(405.0, 205.0), &cam);
    assert_eq!(hit, Some(SelectionHit::Handle(Handle::Resize(ResizeAnchor::Se))));
}
