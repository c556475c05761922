// Stage: event handling, relayout, hinge and section wiring.

use scene_core::constants::*;
use scene_core::*;

fn stage() -> Stage {
    Stage::new(SceneConfig::default(), Viewport::new(1200.0, 800.0)).unwrap()
}

#[test]
fn new_stage_resolves_initial_layout() {
    let s = stage();
    let l = s.layout().unwrap();
    assert!((l.camera_aspect - 1.5).abs() < 1e-6);
    assert!(l.texture_fit.is_none());
    let plane = s.scene.get(s.handles.video_plane).unwrap().transform;
    assert_eq!(plane.scale.y, FIT_CONSTANT);
    assert_eq!(plane.position.x, l.plane_x);
    let hinge = s.scene.get(s.handles.hinge).unwrap().transform;
    assert_eq!(hinge.position.x, l.hinge_x);
}

#[test]
fn scroll_swings_hinge_and_enters_section() {
    let mut s = stage();
    let outcome = s
        .handle_events([InputEvent::Scroll { scroll_y: 800.0 }])
        .unwrap();
    assert_eq!(outcome.sections_entered, 1);
    assert!(!outcome.layout_changed);
    assert_eq!(s.active_tweens(), 1);
    let hinge = s.scene.get(s.handles.hinge).unwrap().transform;
    assert_eq!(hinge.rotation.y, 800.0 / HINGE_SCROLL_DIVISOR);
    assert_eq!(s.input.scroll.current_section(), 1);
}

#[test]
fn tick_moves_camera_with_scroll() {
    let mut s = stage();
    s.handle_events([InputEvent::Scroll { scroll_y: 1600.0 }])
        .unwrap();
    s.tick(0.5).unwrap();
    let cam = s.scene.get(s.handles.camera).unwrap().transform;
    assert_eq!(cam.position.y, -2.0 * OBJECTS_DISTANCE);
}

#[test]
fn resize_recomputes_projection() {
    let mut s = stage();
    let outcome = s
        .handle_events([InputEvent::Resize {
            width: 400.0,
            height: 800.0,
        }])
        .unwrap();
    assert!(outcome.layout_changed);
    assert!((s.layout().unwrap().camera_aspect - 0.5).abs() < 1e-6);
    match &s.scene.get(s.handles.camera).unwrap().kind {
        NodeKind::Camera(c) => assert!((c.aspect - 0.5).abs() < 1e-6),
        other => panic!("camera expected, got {:?}", other),
    }
}

#[test]
fn empty_resize_keeps_previous_layout() {
    let mut s = stage();
    let before = *s.layout().unwrap();
    let outcome = s
        .handle_events([InputEvent::Resize {
            width: 0.0,
            height: 0.0,
        }])
        .unwrap();
    assert!(!outcome.layout_changed);
    assert_eq!(*s.layout().unwrap(), before);
}

#[test]
fn video_loaded_sets_texture_fit() {
    let mut s = stage();
    s.video_texture.needs_update = false;
    let outcome = s
        .handle_events([InputEvent::VideoLoaded {
            width: 1920,
            height: 1080,
        }])
        .unwrap();
    assert!(outcome.video_ready);
    assert!(outcome.layout_changed);
    assert!(s.video_texture.take_needs_update());
    assert_eq!(s.video_texture.size, VideoSize::new(1920, 1080));
    let fit = s.layout().unwrap().texture_fit.unwrap();
    assert_eq!(s.video_texture.fit, fit);
    // 16:9 video on a 3:2 camera crops horizontally
    assert!(fit.repeat.x < 1.0);
    assert_eq!(fit.repeat.y, 1.0);
}

#[test]
fn video_without_size_is_ignored() {
    let mut s = stage();
    let outcome = s
        .handle_events([InputEvent::VideoLoaded {
            width: 0,
            height: 0,
        }])
        .unwrap();
    assert!(!outcome.video_ready);
    assert!(!outcome.layout_changed);
    assert!(s.video_texture.size.is_none());
}

#[test]
fn section_tween_finishes_on_top_of_idle_rotation() {
    let mut s = stage();
    s.handle_events([InputEvent::Scroll { scroll_y: 800.0 }])
        .unwrap();
    let mut t = 0.0;
    while t < 3.0 {
        t += 0.1;
        s.tick(t).unwrap();
    }
    assert_eq!(s.active_tweens(), 0);
    let r = s.scene.get(s.handles.sections[1]).unwrap().transform.rotation;
    let idle = glam::Vec3::new(t * ROTATION_RATE_X, t * ROTATION_RATE_Y, 0.0);
    assert!((r - idle - SECTION_TWEEN_DELTA).abs().max_element() < 1e-3);
}

#[test]
fn cursor_moves_feed_parallax() {
    let mut s = stage();
    s.handle_events([InputEvent::CursorMove {
        client_x: 1200.0,
        client_y: 0.0,
    }])
    .unwrap();
    s.tick(10.0).unwrap();
    let group = s.scene.get(s.handles.camera_group).unwrap().transform;
    assert_eq!(group.position.x, 0.25);
    assert_eq!(group.position.y, 0.25);
}

/// Dot of the screen's world normal with the ray from its hinged edge to the camera.
fn screen_facing(s: &Stage) -> f32 {
    let plane = s.scene.world_matrix(s.handles.video_plane).unwrap();
    let normal = plane.transform_vector3(glam::Vec3::Z).normalize();
    let edge = s
        .scene
        .world_matrix(s.handles.hinge)
        .unwrap()
        .transform_point3(glam::Vec3::ZERO);
    let cam = s
        .scene
        .world_matrix(s.handles.camera)
        .unwrap()
        .transform_point3(glam::Vec3::ZERO);
    normal.dot(cam - edge)
}

#[test]
fn screen_turns_its_back_past_three_quarter_swing() {
    let mut s = Stage::new(SceneConfig::default(), Viewport::new(1600.0, 900.0)).unwrap();
    assert!(screen_facing(&s) > 0.0);
    let scroll_y = HINGE_SCROLL_DIVISOR * (1.5 * std::f32::consts::PI + 0.2);
    s.handle_events([InputEvent::Scroll { scroll_y }]).unwrap();
    // the back face is what the camera sees now, and the video pipeline culls it
    assert!(screen_facing(&s) < 0.0);
}
