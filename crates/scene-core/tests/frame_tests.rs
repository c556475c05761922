// Per-frame camera motion, parallax smoothing and section rotation.

use glam::{Vec2, Vec3};
use scene_core::constants::{OBJECTS_DISTANCE, ROTATION_RATE_X, ROTATION_RATE_Y};
use scene_core::frame::*;
use scene_core::*;

#[test]
fn camera_descends_one_section_per_viewport() {
    assert_eq!(camera_height(0.0, 800.0, 4.0), 0.0);
    assert_eq!(camera_height(800.0, 800.0, 4.0), -4.0);
    assert_eq!(camera_height(1200.0, 800.0, 4.0), -6.0);
    assert_eq!(camera_height(500.0, 0.0, 4.0), 0.0);
}

#[test]
fn parallax_target_inverts_vertical_axis() {
    let t = parallax_target(CursorState { x: 0.5, y: 0.5 });
    assert_eq!(t, Vec2::new(0.25, -0.25));
}

#[test]
fn smoothing_moves_part_way() {
    // 5 per second over 0.1 s covers half the gap
    let next = smooth_towards(Vec2::ZERO, Vec2::new(1.0, -1.0), 0.1);
    assert!((next - Vec2::new(0.5, -0.5)).length() < 1e-6);
}

#[test]
fn smoothing_never_overshoots_on_long_frames() {
    let target = Vec2::new(0.2, 0.3);
    assert_eq!(smooth_towards(Vec2::ZERO, target, 1.0), target);
    assert_eq!(smooth_towards(Vec2::ZERO, target, 0.0), Vec2::ZERO);
}

#[test]
fn parallax_converges_monotonically() {
    let target = parallax_target(CursorState { x: -0.4, y: 0.3 });
    let mut pos = Vec2::ZERO;
    let mut last = (target - pos).length();
    for _ in 0..120 {
        pos = smooth_towards(pos, target, 1.0 / 60.0);
        let d = (target - pos).length();
        assert!(d < last);
        last = d;
    }
    assert!(last < 1e-3);
}

#[test]
fn frame_delta_is_never_negative() {
    let mut u = FrameUpdater::new();
    assert_eq!(u.delta(1.0), 1.0);
    assert_eq!(u.delta(0.5), 0.0);
    assert!((u.delta(1.25) - 0.25).abs() < 1e-6);
}

#[test]
fn update_drives_camera_group_and_sections() {
    let (mut scene, handles) = build_scene(&SceneConfig::default(), 1.5).unwrap();
    let mut updater = FrameUpdater::new();
    let snapshot = InputSnapshot {
        viewport: Viewport::new(1200.0, 800.0),
        scroll_y: 800.0,
        current_section: 1,
        cursor: CursorState { x: 0.5, y: -0.5 },
    };

    let dt = updater
        .update(2.0, &snapshot, OBJECTS_DISTANCE, &mut scene, &handles)
        .unwrap();
    assert_eq!(dt, 2.0);

    let camera = scene.get(handles.camera).unwrap().transform;
    assert_eq!(camera.position.y, -OBJECTS_DISTANCE);

    // a 2 s frame saturates the smoothing
    let group = scene.get(handles.camera_group).unwrap().transform;
    assert_eq!(group.position, Vec3::new(0.25, 0.25, 0.0));

    for &section in &handles.sections {
        let r = scene.get(section).unwrap().transform.rotation;
        assert!((r.x - 2.0 * ROTATION_RATE_X).abs() < 1e-6);
        assert!((r.y - 2.0 * ROTATION_RATE_Y).abs() < 1e-6);
        assert_eq!(r.z, 0.0);
    }
}

#[test]
fn section_rotation_grows_monotonically() {
    let (mut scene, handles) = build_scene(&SceneConfig::default(), 1.0).unwrap();
    let mut updater = FrameUpdater::new();
    let snapshot = InputSnapshot {
        viewport: Viewport::new(800.0, 800.0),
        scroll_y: 0.0,
        current_section: 0,
        cursor: CursorState::default(),
    };
    let mut last = 0.0;
    for frame in 1..=30 {
        updater
            .update(frame as f32 / 60.0, &snapshot, OBJECTS_DISTANCE, &mut scene, &handles)
            .unwrap();
        let y = scene.get(handles.sections[1]).unwrap().transform.rotation.y;
        assert!(y > last);
        last = y;
    }
}
