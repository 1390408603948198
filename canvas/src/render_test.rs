#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn cover_crop_landscape_takes_center_square() {
    assert_eq!(cover_crop(400.0, 200.0), Some((100.0, 0.0, 200.0)));
}

#[test]
fn cover_crop_portrait_takes_center_square() {
    assert_eq!(cover_crop(120.0, 300.0), Some((0.0, 90.0, 120.0)));
}

#[test]
fn cover_crop_square_is_whole_bitmap() {
    assert_eq!(cover_crop(64.0, 64.0), Some((0.0, 0.0, 64.0)));
}

#[test]
fn cover_crop_rejects_empty_bitmap() {
    assert_eq!(cover_crop(0.0, 100.0), None);
    assert_eq!(cover_crop(100.0, 0.0), None);
}

#[test]
fn empty_cache_has_nothing_ready() {
    let cache = ImageCache::new();
    assert!(cache.ready("/image/a.jpg").is_none());
}
