//! Owns the scene and the state that drives it.
//!
//! The host feeds drained input events into [`Stage::handle_events`] and calls
//! [`Stage::tick`] once per display frame; the renderer then reads the scene.

use crate::animator::SectionAnimator;
use crate::builder::{build_scene, SceneHandles};
use crate::config::SceneConfig;
use crate::constants::{HINGE_SCROLL_DIVISOR, SECTION_COUNT};
use crate::frame::FrameUpdater;
use crate::input::{InputEvent, InputState};
use crate::layout::{self, Layout, LayoutError, VideoSize, VideoTexture, Viewport};
use crate::scene::{Scene, SceneError};

/// What the host has to react to after a batch of events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventOutcome {
    /// Layout was recomputed; resize surfaces and projection.
    pub layout_changed: bool,
    /// The video reported its size; playback may start.
    pub video_ready: bool,
    pub sections_entered: usize,
}

pub struct Stage {
    pub scene: Scene,
    pub handles: SceneHandles,
    pub input: InputState,
    pub video_texture: VideoTexture,
    config: SceneConfig,
    layout: Option<Layout>,
    animator: SectionAnimator,
    updater: FrameUpdater,
}

impl Stage {
    /// Build the scene and resolve the initial layout. A video size is not
    /// expected yet; the texture fit waits for it.
    pub fn new(config: SceneConfig, viewport: Viewport) -> Result<Self, SceneError> {
        let aspect = viewport.aspect().unwrap_or(1.0);
        let (scene, handles) = build_scene(&config, aspect)?;
        let mut stage = Self {
            scene,
            handles,
            input: InputState::new(viewport, SECTION_COUNT),
            video_texture: VideoTexture::default(),
            config,
            layout: None,
            animator: SectionAnimator::new(),
            updater: FrameUpdater::new(),
        };
        stage.relayout()?;
        Ok(stage)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn active_tweens(&self) -> usize {
        self.animator.active()
    }

    /// Apply queued events in arrival order.
    pub fn handle_events<I>(&mut self, events: I) -> Result<EventOutcome, SceneError>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut outcome = EventOutcome::default();
        let mut layout_dirty = false;
        for event in events {
            match event {
                InputEvent::Resize { width, height } => {
                    self.input.viewport.on_resize(width, height);
                    layout_dirty = true;
                }
                InputEvent::Scroll { scroll_y } => {
                    self.scene.transform_mut(self.handles.hinge)?.rotation.y =
                        scroll_y / HINGE_SCROLL_DIVISOR;
                    let height = self.input.viewport.viewport.height;
                    if let Some(section) = self.input.scroll.on_scroll(scroll_y, height) {
                        log::info!("[section] entered {}", section);
                        self.animator.section_entered(self.handles.sections[section]);
                        outcome.sections_entered += 1;
                    }
                }
                InputEvent::CursorMove { client_x, client_y } => {
                    let viewport = self.input.viewport.viewport;
                    self.input.cursor.on_move(client_x, client_y, viewport);
                }
                InputEvent::VideoLoaded { width, height } => match VideoSize::new(width, height) {
                    Some(size) => {
                        log::info!("[video] loaded {}x{}", width, height);
                        self.input.video = Some(size);
                        self.video_texture.size = Some(size);
                        outcome.video_ready = true;
                        layout_dirty = true;
                    }
                    None => log::warn!("[video] loaded without a size ({}x{})", width, height),
                },
            }
        }
        if layout_dirty {
            outcome.layout_changed = self.relayout()?;
        }
        Ok(outcome)
    }

    /// Advance one display frame.
    pub fn tick(&mut self, elapsed_sec: f32) -> Result<(), SceneError> {
        let snapshot = self.input.snapshot();
        let dt = self.updater.update(
            elapsed_sec,
            &snapshot,
            self.config.objects_distance,
            &mut self.scene,
            &self.handles,
        )?;
        self.animator.advance(dt, &mut self.scene)
    }

    /// Resolve and apply the layout for the current viewport and video size.
    /// An empty viewport keeps the previous layout and returns `false`.
    fn relayout(&mut self) -> Result<bool, SceneError> {
        let resolved = layout::resolve(self.input.viewport.viewport, self.input.video);
        match resolved {
            Ok(l) => {
                self.apply_layout(&l)?;
                self.layout = Some(l);
                Ok(true)
            }
            Err(LayoutError::EmptyViewport { width, height }) => {
                log::warn!("[layout] skipped for empty viewport {}x{}", width, height);
                Ok(false)
            }
        }
    }

    fn apply_layout(&mut self, l: &Layout) -> Result<(), SceneError> {
        self.scene.set_camera_aspect(self.handles.camera, l.camera_aspect)?;

        let plane = self.scene.transform_mut(self.handles.video_plane)?;
        plane.scale.x = l.plane_scale.x;
        plane.scale.y = l.plane_scale.y;
        plane.position.x = l.plane_x;
        self.scene.transform_mut(self.handles.hinge)?.position.x = l.hinge_x;

        if let Some(fit) = l.texture_fit {
            self.video_texture.fit = fit;
        }
        self.video_texture.needs_update = true;
        log::debug!(
            "[layout] aspect={:.3} plane=({:.3},{:.3}) repeat={:?}",
            l.camera_aspect,
            l.plane_scale.x,
            l.plane_scale.y,
            l.texture_fit.map(|f| f.repeat)
        );
        Ok(())
    }
}
