#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_new_and_default() {
    let p = pt(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
    assert_eq!(Point::default(), pt(0.0, 0.0));
}

#[test]
fn point_offset_adds_components() {
    assert_eq!(pt(1.0, 2.0).offset(10.0, -5.0), pt(11.0, -3.0));
}

// =============================================================
// distance
// =============================================================

#[test]
fn distance_three_four_five() {
    assert_eq!(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0);
}

#[test]
fn distance_is_symmetric() {
    let a = pt(-7.0, 2.5);
    let b = pt(4.0, -9.0);
    assert!(approx_eq(distance(a, b), distance(b, a)));
}

#[test]
fn distance_to_self_is_zero() {
    let a = pt(12.0, 34.0);
    assert_eq!(distance(a, a), 0.0);
}

// =============================================================
// angle
// =============================================================

#[test]
fn angle_cardinal_directions() {
    let c = pt(10.0, 10.0);
    assert!(approx_eq(angle(c, pt(20.0, 10.0)), 0.0));
    assert!(approx_eq(angle(c, pt(10.0, 20.0)), 90.0));
    assert!(approx_eq(angle(c, pt(0.0, 10.0)), 180.0));
    assert!(approx_eq(angle(c, pt(10.0, 0.0)), -90.0));
}

#[test]
fn angle_diagonal() {
    assert!(approx_eq(angle(pt(0.0, 0.0), pt(1.0, 1.0)), 45.0));
}

// =============================================================
// snap_to_45
// =============================================================

#[test]
fn snap_rounds_to_nearest_multiple() {
    assert_eq!(snap_to_45(37.0), 45.0);
    assert_eq!(snap_to_45(20.0), 0.0);
    assert_eq!(snap_to_45(68.0), 90.0);
    assert_eq!(snap_to_45(-37.0), -45.0);
    assert_eq!(snap_to_45(-20.0), 0.0);
}

#[test]
fn snap_exact_multiples_unchanged() {
    for k in -8..=8 {
        let a = f64::from(k) * 45.0;
        assert_eq!(snap_to_45(a), a);
    }
}

#[test]
fn snap_halfway_rounds_up() {
    assert_eq!(snap_to_45(22.5), 45.0);
    assert_eq!(snap_to_45(-22.5), 0.0);
}

// =============================================================
// normalize_degrees
// =============================================================

#[test]
fn normalize_keeps_in_range_values() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(359.5), 359.5);
}

#[test]
fn normalize_wraps_full_turns() {
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(725.0), 5.0);
}

#[test]
fn normalize_large_negative() {
    assert_eq!(normalize_degrees(10.0 - 730.0 + 360.0), 0.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(-1000.0), 80.0);
}

#[test]
fn normalize_tiny_negative_stays_below_360() {
    let r = normalize_degrees(-1e-20);
    assert!((0.0..360.0).contains(&r));
}

// =============================================================
// rotate_about
// =============================================================

#[test]
fn rotate_about_quarter_turn_is_clockwise_on_screen() {
    let r = rotate_about(pt(10.0, 0.0), pt(0.0, 0.0), 90.0);
    assert!(approx_eq(r.x, 0.0));
    assert!(approx_eq(r.y, 10.0));
}

#[test]
fn rotate_about_zero_is_identity() {
    let p = pt(3.0, -4.0);
    assert_eq!(rotate_about(p, pt(1.0, 1.0), 0.0), p);
}

#[test]
fn rotate_about_preserves_distance_to_center() {
    let c = pt(5.0, 5.0);
    let p = pt(12.0, -3.0);
    let r = rotate_about(p, c, 137.0);
    assert!(approx_eq(distance(c, p), distance(c, r)));
}
