// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use scene_core::FrameTime;

fn t(delta: f32) -> FrameTime {
    FrameTime::new(1.0, delta)
}

#[test]
fn move_maps_to_ndc() {
    let mut p = PointerState::default();
    p.on_move(50.0, 25.0, 100.0, 100.0);
    let ndc = p.ndc.unwrap();
    assert!((ndc - Vec2::new(0.0, 0.5)).length() < 1e-6);
}

#[test]
fn leaving_clears_pointer() {
    let mut p = PointerState::default();
    p.on_move(10.0, 10.0, 100.0, 100.0);
    p.on_leave();
    assert!(p.ndc.is_none());
    assert!(p.frame_input(t(0.016), 1.0).pointer.is_none());
}

#[test]
fn off_canvas_move_has_no_pointer() {
    let mut p = PointerState::default();
    p.on_move(150.0, 10.0, 100.0, 100.0);
    assert!(p.ndc.is_none());
    p.on_move(10.0, 10.0, 0.0, 100.0);
    assert!(p.ndc.is_none());
}

#[test]
fn drag_accumulates_until_drained() {
    let mut p = PointerState::default();
    p.on_down(50.0, 50.0, 100.0, 100.0);
    p.on_move(60.0, 50.0, 100.0, 100.0);
    p.on_move(75.0, 50.0, 100.0, 100.0);

    let first = p.frame_input(t(0.016), 1.0);
    assert!(first.pointer_down);
    let d = first.drag_delta.unwrap();
    assert!((d - Vec2::new(0.5, 0.0)).length() < 1e-5);

    let second = p.frame_input(t(0.016), 1.0);
    assert_eq!(second.drag_delta, Some(Vec2::ZERO));
}

#[test]
fn moves_without_button_are_not_drags() {
    let mut p = PointerState::default();
    p.on_move(10.0, 10.0, 100.0, 100.0);
    p.on_move(90.0, 90.0, 100.0, 100.0);
    let input = p.frame_input(t(0.016), 1.0);
    assert!(!input.pointer_down);
    assert!(input.drag_delta.is_none());
}

#[test]
fn release_ends_drag() {
    let mut p = PointerState::default();
    p.on_down(50.0, 50.0, 100.0, 100.0);
    p.on_move(70.0, 50.0, 100.0, 100.0);
    p.on_up();
    let input = p.frame_input(t(0.016), 1.0);
    assert!(!input.pointer_down);
    assert!(input.drag_delta.is_none());
}

#[test]
fn long_frames_are_clamped() {
    assert_eq!(clamp_delta(t(5.0)).delta, constants::MAX_FRAME_DELTA_SEC);
    assert_eq!(clamp_delta(t(0.016)).delta, 0.016);
    let bad = FrameTime {
        elapsed: f32::INFINITY,
        delta: f32::NAN,
    };
    assert_eq!(clamp_delta(bad), FrameTime::new(0.0, 0.0));
}

#[test]
fn aspect_handles_zero_height() {
    assert_eq!(aspect_of(1920, 1080), 1920.0 / 1080.0);
    assert_eq!(aspect_of(800, 0), 1.0);
}

#[test]
fn key_mapping() {
    assert_eq!(key_action("Enter"), Some(KeyAction::ToggleFullscreen));
    assert_eq!(key_action("Escape"), Some(KeyAction::ExitFullscreen));
    assert_eq!(key_action("a"), None);
}
