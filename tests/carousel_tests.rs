// Host-side tests for the photo carousel and its asset board.

use std::collections::HashSet;

use scene_core::{AssetBoard, AssetStatus, Carousel, CarouselParams, PhotoManifest};

#[test]
fn scrolls_at_fixed_speed() {
    let mut c = Carousel::new(CarouselParams::default());
    let offset = c.tick(0.5, 2000.0);
    assert!((offset - 30.0).abs() < 1e-4);
}

#[test]
fn wraps_at_midpoint() {
    let mut c = Carousel::new(CarouselParams { speed: 100.0 });
    let mut last = 0.0;
    let mut wrapped = false;
    for _ in 0..200 {
        let o = c.tick(0.1, 1000.0);
        assert!(o < 500.0);
        if o < last {
            wrapped = true;
            assert_eq!(o, 0.0);
        }
        last = o;
    }
    assert!(wrapped);
}

#[test]
fn hover_pauses_and_resumes() {
    let mut c = Carousel::new(CarouselParams::default());
    c.tick(0.1, 2000.0);
    let held = c.offset();
    c.set_hovering(true);
    assert_eq!(c.tick(1.0, 2000.0), held);
    c.set_hovering(false);
    assert!(c.tick(0.1, 2000.0) > held);
}

#[test]
fn stop_is_final() {
    let mut c = Carousel::new(CarouselParams::default());
    c.tick(0.2, 2000.0);
    c.stop();
    let held = c.offset();
    assert!(!c.is_running());
    assert_eq!(c.tick(1.0, 2000.0), held);
}

#[test]
fn empty_track_stays_at_zero() {
    let mut c = Carousel::new(CarouselParams::default());
    assert_eq!(c.tick(0.5, 0.0), 0.0);
    assert_eq!(c.tick(f32::NAN, 1000.0), 0.0);
}

#[test]
fn manifest_naming() {
    let m = PhotoManifest::default();
    assert_eq!(m.numbers().count(), 13);
    assert_eq!(m.path(1), "photos/photo1.jpg");
    assert_eq!(m.alt(13), "Memory 13");
    assert_eq!(m.placeholder_label(4), "Add photo4.jpg");
}

#[test]
fn carousel_items_repeat_once_with_unique_keys() {
    let items = PhotoManifest::default().carousel_items();
    assert_eq!(items.len(), 26);
    let keys: HashSet<_> = items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys.len(), 26);
    let (first, second) = items.split_at(13);
    assert!(first
        .iter()
        .zip(second)
        .all(|(a, b)| a.number == b.number));
}

#[test]
fn missing_photo_becomes_label() {
    let mut board = AssetBoard::new(PhotoManifest::default());
    assert_eq!(board.status(3), Some(AssetStatus::Pending));
    board.mark_loaded(1);
    assert_eq!(board.status(1), Some(AssetStatus::Loaded));

    assert_eq!(board.mark_missing(3), "Add photo3.jpg");
    assert_eq!(board.mark_missing(3), "Add photo3.jpg");
    assert_eq!(board.status(3), Some(AssetStatus::Missing));
    assert_eq!(board.missing_count(), 1);

    assert_eq!(board.status(0), None);
    assert_eq!(board.status(14), None);
}
