//! Input sampling.
//!
//! DOM listeners only push [`InputEvent`]s into an [`InputQueue`]; the frame
//! loop drains it once per frame. Each state record below has exactly one
//! writer event.

use smallvec::SmallVec;

use crate::layout::{VideoSize, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Resize { width: f32, height: f32 },
    Scroll { scroll_y: f32 },
    CursorMove { client_x: f32, client_y: f32 },
    VideoLoaded { width: u32, height: u32 },
}

/// FIFO of host events awaiting the next frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: SmallVec<[InputEvent; 8]>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> SmallVec<[InputEvent; 8]> {
        std::mem::take(&mut self.events)
    }
}

/// Written by resize events only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub viewport: Viewport,
}

impl ViewportState {
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }
}

/// Written by scroll events only. Tracks which section is in view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub scroll_y: f32,
    current_section: usize,
    section_count: usize,
}

impl ScrollState {
    pub fn new(section_count: usize) -> Self {
        Self {
            scroll_y: 0.0,
            current_section: 0,
            section_count,
        }
    }

    #[inline]
    pub fn current_section(&self) -> usize {
        self.current_section
    }

    /// Section whose band contains `scroll_y`, clamped to the valid range.
    pub fn section_for(&self, scroll_y: f32, viewport_height: f32) -> Option<usize> {
        if self.section_count == 0 || !(viewport_height > 0.0) || !scroll_y.is_finite() {
            return None;
        }
        let raw = (scroll_y / viewport_height).round();
        let last = (self.section_count - 1) as f32;
        Some(raw.clamp(0.0, last) as usize)
    }

    /// Record a new scroll offset. Returns the entered section when a
    /// boundary was crossed.
    pub fn on_scroll(&mut self, scroll_y: f32, viewport_height: f32) -> Option<usize> {
        self.scroll_y = scroll_y;
        let next = self.section_for(scroll_y, viewport_height)?;
        if next == self.current_section {
            return None;
        }
        self.current_section = next;
        Some(next)
    }
}

/// Written by mouse-move events only. Normalized to \[-0.5, 0.5\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorState {
    pub x: f32,
    pub y: f32,
}

impl CursorState {
    pub fn on_move(&mut self, client_x: f32, client_y: f32, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        self.x = client_x / viewport.width - 0.5;
        self.y = client_y / viewport.height - 0.5;
    }
}

/// Immutable per-frame view of the input state handed to the frame updater.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSnapshot {
    pub viewport: Viewport,
    pub scroll_y: f32,
    pub current_section: usize,
    pub cursor: CursorState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    pub viewport: ViewportState,
    pub scroll: ScrollState,
    pub cursor: CursorState,
    pub video: Option<VideoSize>,
}

impl InputState {
    pub fn new(viewport: Viewport, section_count: usize) -> Self {
        Self {
            viewport: ViewportState { viewport },
            scroll: ScrollState::new(section_count),
            cursor: CursorState::default(),
            video: None,
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            viewport: self.viewport.viewport,
            scroll_y: self.scroll.scroll_y,
            current_section: self.scroll.current_section(),
            cursor: self.cursor,
        }
    }
}
