// Scene construction: node hierarchy, section placement, particle scatter.

use glam::Vec3;
use scene_core::constants::*;
use scene_core::*;

#[test]
fn hierarchy_matches_camera_rig() {
    let (scene, h) = build_scene(&SceneConfig::default(), 16.0 / 9.0).unwrap();
    let parent = |id: NodeId| scene.get(id).unwrap().parent();
    assert_eq!(parent(h.camera_group), None);
    assert_eq!(parent(h.camera), Some(h.camera_group));
    assert_eq!(parent(h.hinge), Some(h.camera_group));
    assert_eq!(parent(h.video_plane), Some(h.hinge));
    assert_eq!(scene.find("video-plane"), Some(h.video_plane));

    let cam = scene.get(h.camera).unwrap();
    assert_eq!(cam.transform.position, Vec3::new(0.0, 0.0, CAMERA_Z));
    match &cam.kind {
        NodeKind::Camera(c) => {
            assert!((c.aspect - 16.0 / 9.0).abs() < 1e-6);
            assert!((c.fovy_radians - CAMERA_FOV_DEG.to_radians()).abs() < 1e-6);
        }
        other => panic!("camera expected, got {:?}", other),
    }
}

#[test]
fn sections_are_stacked_and_offset() {
    let config = SceneConfig::default();
    let (scene, h) = build_scene(&config, 1.0).unwrap();
    for (i, &id) in h.sections.iter().enumerate() {
        let node = scene.get(id).unwrap();
        assert_eq!(node.parent(), None);
        assert_eq!(
            node.transform.position,
            Vec3::new(SECTION_OFFSETS_X[i], -OBJECTS_DISTANCE * i as f32, 0.0)
        );
    }
    // the first section is carried by the video screen
    assert_eq!(scene.get(h.sections[0]).unwrap().kind, NodeKind::Group);
    assert!(matches!(
        scene.get(h.sections[1]).unwrap().kind,
        NodeKind::Mesh {
            shape: SectionShape::Cone,
            ..
        }
    ));
    assert!(matches!(
        scene.get(h.sections[2]).unwrap().kind,
        NodeKind::Mesh {
            shape: SectionShape::TorusKnot,
            ..
        }
    ));
}

#[test]
fn section_shapes_are_configurable() {
    let config = SceneConfig {
        section_shapes: [SectionShape::Torus, SectionShape::Cone, SectionShape::Empty],
        ..SceneConfig::default()
    };
    let (scene, h) = build_scene(&config, 1.0).unwrap();
    assert!(matches!(
        scene.get(h.sections[0]).unwrap().kind,
        NodeKind::Mesh {
            shape: SectionShape::Torus,
            ..
        }
    ));
    assert_eq!(scene.get(h.sections[2]).unwrap().kind, NodeKind::Group);
}

#[test]
fn light_points_at_origin() {
    let (scene, h) = build_scene(&SceneConfig::default(), 1.0).unwrap();
    let light = scene.get(h.light).unwrap();
    assert_eq!(light.transform.position, LIGHT_POSITION);
    match &light.kind {
        NodeKind::DirectionalLight {
            intensity, target, ..
        } => {
            assert_eq!(*intensity, LIGHT_INTENSITY);
            assert_eq!(*target, Vec3::ZERO);
        }
        other => panic!("light expected, got {:?}", other),
    }
}

#[test]
fn particles_fill_the_section_column() {
    let positions = scatter_particles(PARTICLE_COUNT, OBJECTS_DISTANCE, 7);
    assert_eq!(positions.len(), PARTICLE_COUNT);
    let top = OBJECTS_DISTANCE * 0.5;
    let bottom = top - OBJECTS_DISTANCE * SECTION_COUNT as f32;
    let half_spread = PARTICLE_SPREAD * 0.5;
    for p in &positions {
        assert!(p.x >= -half_spread && p.x <= half_spread);
        assert!(p.z >= -half_spread && p.z <= half_spread);
        assert!(p.y <= top && p.y >= bottom);
    }
}

#[test]
fn particle_scatter_is_seeded() {
    let a = scatter_particles(50, OBJECTS_DISTANCE, 1);
    let b = scatter_particles(50, OBJECTS_DISTANCE, 1);
    let c = scatter_particles(50, OBJECTS_DISTANCE, 2);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(scatter_particles(0, OBJECTS_DISTANCE, 1).is_empty());
}

#[test]
fn particle_node_carries_configured_count() {
    let config = SceneConfig::default().with_seed(99);
    let (scene, h) = build_scene(&config, 1.0).unwrap();
    match &scene.get(h.particles).unwrap().kind {
        NodeKind::Particles { positions, size, .. } => {
            assert_eq!(positions.len(), config.particle_count);
            assert_eq!(*size, PARTICLE_SIZE);
            assert_eq!(
                positions,
                &scatter_particles(config.particle_count, config.objects_distance, 99)
            );
        }
        other => panic!("particles expected, got {:?}", other),
    }
}
