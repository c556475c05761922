//! Viewport-responsive layout: camera aspect and video-plane fit.
//!
//! The video plane is stretched to cover the whole frustum, so its aspect is
//! always the camera aspect. To keep the video undistorted the texture is
//! cropped (through its repeat factors) on whichever axis would otherwise be
//! squashed, symmetrically around the texture centre.

use glam::Vec2;
use thiserror::Error;

use crate::constants::{FIT_CONSTANT, TEXTURE_CENTER};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect(&self) -> Result<f32, LayoutError> {
        if self.is_empty() {
            return Err(LayoutError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.width / self.height)
    }
}

/// Native video dimensions, known once the element has loaded data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoSize {
    width: u32,
    height: u32,
}

impl VideoSize {
    /// `None` until both dimensions are reported.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("viewport has no area ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },
}

/// Texture coordinate transform: `uv' = (uv - center) * repeat + center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureFit {
    pub repeat: Vec2,
    pub center: Vec2,
}

impl Default for TextureFit {
    fn default() -> Self {
        Self {
            repeat: Vec2::ONE,
            center: Vec2::from_array(TEXTURE_CENTER),
        }
    }
}

impl TextureFit {
    /// Crop whichever texture axis would be distorted on a plane of `camera_aspect`.
    pub fn cover(texture_aspect: f32, camera_aspect: f32) -> Self {
        let aspect_meta = texture_aspect / camera_aspect;
        let repeat = if texture_aspect <= camera_aspect {
            Vec2::new(1.0, aspect_meta)
        } else {
            Vec2::new(1.0 / aspect_meta, 1.0)
        };
        Self {
            repeat,
            ..Self::default()
        }
    }

    #[inline]
    pub fn apply(&self, uv: Vec2) -> Vec2 {
        (uv - self.center) * self.repeat + self.center
    }
}

/// Everything that depends on the viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub camera_aspect: f32,
    pub plane_scale: Vec2,
    /// Hinge x, parked on the left edge of the frustum.
    pub hinge_x: f32,
    /// Plane x inside the hinge, so the hinge sits on the plane's left edge.
    pub plane_x: f32,
    /// `None` while the video size is still unknown.
    pub texture_fit: Option<TextureFit>,
}

/// Pure layout resolution; identical inputs give bit-identical outputs.
pub fn resolve(viewport: Viewport, video: Option<VideoSize>) -> Result<Layout, LayoutError> {
    let camera_aspect = viewport.aspect()?;
    let plane_scale = Vec2::new(FIT_CONSTANT * camera_aspect, FIT_CONSTANT);
    let half_width = plane_scale.x * 0.5;
    Ok(Layout {
        camera_aspect,
        plane_scale,
        hinge_x: -half_width,
        plane_x: half_width,
        texture_fit: video.map(|v| TextureFit::cover(v.aspect(), camera_aspect)),
    })
}

/// Texture transform state consumed by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VideoTexture {
    pub fit: TextureFit,
    pub size: Option<VideoSize>,
    /// Set whenever `fit` changes; the renderer clears it after upload.
    pub needs_update: bool,
}

impl VideoTexture {
    pub fn take_needs_update(&mut self) -> bool {
        std::mem::take(&mut self.needs_update)
    }
}
