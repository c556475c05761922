// Section-change tweens and their easing curve.

use glam::Vec3;
use scene_core::constants::{SECTION_TWEEN_DELTA, SECTION_TWEEN_DURATION_SEC};
use scene_core::*;

fn assert_vec_close(a: Vec3, b: Vec3) {
    assert!((a - b).abs().max_element() < 1e-4, "{:?} != {:?}", a, b);
}

fn scene_with_node() -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let id = scene
        .insert("spinner", NodeKind::Group, Transform::default(), None)
        .unwrap();
    (scene, id)
}

#[test]
fn power2_in_out_endpoints() {
    assert_eq!(power2_in_out(0.0), 0.0);
    assert_eq!(power2_in_out(1.0), 1.0);
    assert!((power2_in_out(0.5) - 0.5).abs() < 1e-6);
    // out-of-range progress is clamped
    assert_eq!(power2_in_out(-1.0), 0.0);
    assert_eq!(power2_in_out(2.0), 1.0);
}

#[test]
fn power2_in_out_is_monotonic_and_slow_at_ends() {
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = power2_in_out(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
    assert!(power2_in_out(0.1) < 0.1);
    assert!(power2_in_out(0.9) > 0.9);
}

#[test]
fn finished_tween_adds_exactly_its_delta() {
    let (_, id) = scene_with_node();
    let mut tween = RotationTween::new(id, Vec3::new(6.0, 3.0, 1.5), 1.5);
    let mut total = Vec3::ZERO;
    let mut steps = 0;
    while !tween.is_complete() && steps < 1000 {
        total += tween.step(1.0 / 60.0);
        steps += 1;
    }
    assert!(tween.is_complete());
    assert_vec_close(total, Vec3::new(6.0, 3.0, 1.5));
    // stepping past the end adds nothing more
    assert_vec_close(tween.step(0.5), Vec3::ZERO);
}

#[test]
fn long_frame_lands_on_the_end() {
    let (_, id) = scene_with_node();
    let mut tween = RotationTween::new(id, Vec3::X, 1.0);
    assert_vec_close(tween.step(5.0), Vec3::X);
    assert!(tween.is_complete());
}

#[test]
fn section_entered_spins_by_standard_delta() {
    let (mut scene, id) = scene_with_node();
    let mut animator = SectionAnimator::new();
    animator.section_entered(id);
    assert_eq!(animator.active(), 1);

    let mut t = 0.0;
    while t < SECTION_TWEEN_DURATION_SEC + 0.1 {
        animator.advance(0.05, &mut scene).unwrap();
        t += 0.05;
    }
    assert_eq!(animator.active(), 0);
    assert_vec_close(scene.get(id).unwrap().transform.rotation, SECTION_TWEEN_DELTA);
}

#[test]
fn overlapping_tweens_stack() {
    let (mut scene, id) = scene_with_node();
    let mut animator = SectionAnimator::new();
    animator.section_entered(id);
    animator.advance(0.5, &mut scene).unwrap();
    animator.section_entered(id);
    assert_eq!(animator.active(), 2);
    for _ in 0..100 {
        animator.advance(0.05, &mut scene).unwrap();
    }
    assert_eq!(animator.active(), 0);
    assert_vec_close(
        scene.get(id).unwrap().transform.rotation,
        SECTION_TWEEN_DELTA * 2.0,
    );
}

#[test]
fn tween_on_missing_node_reports_error() {
    let (mut scene, id) = scene_with_node();
    let mut other = Scene::new();
    // ids from another scene are unknown here once past its length
    for name in ["a", "b"] {
        other
            .insert(name, NodeKind::Group, Transform::default(), None)
            .unwrap();
    }
    let foreign = other.find("b").unwrap();
    let mut animator = SectionAnimator::new();
    animator.section_entered(foreign);
    assert_eq!(
        animator.advance(0.1, &mut scene),
        Err(SceneError::UnknownNode(foreign))
    );
    assert!(scene.get(id).is_ok());
}

#[test]
fn missing_node_does_not_stall_other_tweens() {
    let (mut scene, id) = scene_with_node();
    let mut other = Scene::new();
    for name in ["a", "b"] {
        other
            .insert(name, NodeKind::Group, Transform::default(), None)
            .unwrap();
    }
    let foreign = other.find("b").unwrap();
    let mut animator = SectionAnimator::new();
    animator.section_entered(foreign);
    animator.section_entered(id);
    assert_eq!(
        animator.advance(0.05, &mut scene),
        Err(SceneError::UnknownNode(foreign))
    );
    for _ in 0..100 {
        let _ = animator.advance(0.05, &mut scene);
    }
    // both tweens ran out and the valid node still got its full spin
    assert_eq!(animator.active(), 0);
    assert_vec_close(scene.get(id).unwrap().transform.rotation, SECTION_TWEEN_DELTA);
}
