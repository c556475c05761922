//! Per-frame camera motion and continuous section rotation.

use glam::Vec2;

use crate::builder::SceneHandles;
use crate::constants::{PARALLAX_AMOUNT, ROTATION_RATE_X, ROTATION_RATE_Y, SMOOTHING_RATE};
use crate::input::{CursorState, InputSnapshot};
use crate::scene::{Scene, SceneError};

/// Camera height for a scroll offset: one viewport of scroll descends one section.
#[inline]
pub fn camera_height(scroll_y: f32, viewport_height: f32, objects_distance: f32) -> f32 {
    if viewport_height > 0.0 {
        -scroll_y / viewport_height * objects_distance
    } else {
        0.0
    }
}

#[inline]
pub fn parallax_target(cursor: CursorState) -> Vec2 {
    Vec2::new(cursor.x * PARALLAX_AMOUNT, -cursor.y * PARALLAX_AMOUNT)
}

/// First-order low-pass step towards `target`. The blend factor is capped at
/// 1 so a long frame lands on the target instead of overshooting it.
#[inline]
pub fn smooth_towards(current: Vec2, target: Vec2, dt_sec: f32) -> Vec2 {
    let alpha = (SMOOTHING_RATE * dt_sec).clamp(0.0, 1.0);
    current + (target - current) * alpha
}

#[derive(Debug, Default)]
pub struct FrameUpdater {
    previous_elapsed: f32,
}

impl FrameUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; never negative.
    pub fn delta(&mut self, elapsed_sec: f32) -> f32 {
        let dt = (elapsed_sec - self.previous_elapsed).max(0.0);
        self.previous_elapsed = self.previous_elapsed.max(elapsed_sec);
        dt
    }

    /// Apply one frame of motion. Returns the frame delta in seconds.
    pub fn update(
        &mut self,
        elapsed_sec: f32,
        input: &InputSnapshot,
        objects_distance: f32,
        scene: &mut Scene,
        handles: &SceneHandles,
    ) -> Result<f32, SceneError> {
        let dt = self.delta(elapsed_sec);

        scene.transform_mut(handles.camera)?.position.y =
            camera_height(input.scroll_y, input.viewport.height, objects_distance);

        let group = scene.transform_mut(handles.camera_group)?;
        let next = smooth_towards(group.position.truncate(), parallax_target(input.cursor), dt);
        group.position.x = next.x;
        group.position.y = next.y;

        for &section in &handles.sections {
            let rotation = &mut scene.transform_mut(section)?.rotation;
            rotation.x += dt * ROTATION_RATE_X;
            rotation.y += dt * ROTATION_RATE_Y;
        }
        Ok(dt)
    }
}
