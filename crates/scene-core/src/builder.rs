//! One-shot construction of the scene content.

use glam::Vec3;
use rand::prelude::*;

use crate::color::linear_from_srgb8;
use crate::config::SceneConfig;
use crate::constants::*;
use crate::geometry::SectionShape;
use crate::scene::{NodeId, NodeKind, PerspectiveCamera, Scene, SceneError, Transform};

/// Ids of the nodes the layout resolver and frame updater touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneHandles {
    pub camera_group: NodeId,
    pub camera: NodeId,
    pub hinge: NodeId,
    pub video_plane: NodeId,
    pub sections: [NodeId; SECTION_COUNT],
    pub light: NodeId,
    pub particles: NodeId,
}

const SECTION_NAMES: [&str; SECTION_COUNT] = ["section-0", "section-1", "section-2"];

pub fn build_scene(
    config: &SceneConfig,
    aspect: f32,
) -> Result<(Scene, SceneHandles), SceneError> {
    let mut scene = Scene::new();

    // Camera group carries the parallax offset. The hinge lives inside it so
    // the video screen is not affected by parallax relative to the camera.
    let camera_group = scene.insert("camera-group", NodeKind::Group, Transform::default(), None)?;
    let hinge = scene.insert(
        "video-hinge",
        NodeKind::Group,
        Transform::default(),
        Some(camera_group),
    )?;
    let video_plane = scene.insert(
        "video-plane",
        NodeKind::VideoPlane {
            tint: linear_from_srgb8(VIDEO_TINT),
        },
        Transform::default(),
        Some(hinge),
    )?;
    let camera = scene.insert(
        "camera",
        NodeKind::Camera(PerspectiveCamera {
            fovy_radians: config.camera.fov_deg.to_radians(),
            aspect,
            znear: config.camera.near,
            zfar: config.camera.far,
        }),
        Transform::from_position(Vec3::new(0.0, 0.0, config.camera.distance)),
        Some(camera_group),
    )?;

    let material = linear_from_srgb8(FLORAL_WHITE);
    let mut sections = [camera_group; SECTION_COUNT];
    for (i, shape) in config.section_shapes.iter().enumerate() {
        let kind = match shape {
            SectionShape::Empty => NodeKind::Group,
            _ => NodeKind::Mesh {
                shape: *shape,
                color: material,
            },
        };
        let position = Vec3::new(
            SECTION_OFFSETS_X[i],
            -config.objects_distance * i as f32,
            0.0,
        );
        sections[i] = scene.insert(
            SECTION_NAMES[i],
            kind,
            Transform::from_position(position),
            None,
        )?;
    }

    let light = scene.insert(
        "directional-light",
        NodeKind::DirectionalLight {
            color: linear_from_srgb8(LIGHT_COLOR),
            intensity: LIGHT_INTENSITY,
            target: Vec3::ZERO,
        },
        Transform::from_position(LIGHT_POSITION),
        None,
    )?;

    let positions = scatter_particles(
        config.particle_count,
        config.objects_distance,
        config.particle_seed,
    );
    let particles = scene.insert(
        "particles",
        NodeKind::Particles {
            positions,
            color: linear_from_srgb8(FLORAL_WHITE),
            size: PARTICLE_SIZE,
        },
        Transform::default(),
        None,
    )?;

    log::info!(
        "[scene] built {} nodes, {} particles, seed={}",
        scene.len(),
        config.particle_count,
        config.particle_seed
    );

    Ok((
        scene,
        SceneHandles {
            camera_group,
            camera,
            hinge,
            video_plane,
            sections,
            light,
            particles,
        },
    ))
}

/// Spread particles over the full depth of the stacked sections.
pub fn scatter_particles(count: usize, objects_distance: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let depth = objects_distance * SECTION_COUNT as f32;
    (0..count)
        .map(|_| {
            let x = (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD;
            let y = objects_distance * 0.5 - rng.gen::<f32>() * depth;
            let z = (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD;
            Vec3::new(x, y, z)
        })
        .collect()
}
