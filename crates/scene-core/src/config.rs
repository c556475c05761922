//! Build-time scene configuration.

use crate::constants::*;
use crate::geometry::SectionShape;

/// Camera placement and projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the camera from its group along +Z.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_Z,
        }
    }
}

/// Everything the scene builder needs to lay out the page.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub objects_distance: f32,
    pub section_shapes: [SectionShape; SECTION_COUNT],
    pub particle_count: usize,
    pub particle_seed: u64,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            objects_distance: OBJECTS_DISTANCE,
            // first section is carried by the video screen
            section_shapes: [
                SectionShape::Empty,
                SectionShape::Cone,
                SectionShape::TorusKnot,
            ],
            particle_count: PARTICLE_COUNT,
            particle_seed: PARTICLE_SEED,
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.particle_seed = seed;
        self
    }
}
