// Host-page wiring and renderer tuning for the web frontend.

// DOM
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const VIDEO_ELEMENT_ID: &str = "video";

// Assets
pub const GRADIENT_TEXTURE_URL: &str = "textures/gradients/3.jpg";

// Canvas backing store never exceeds 2 device pixels per CSS pixel
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// HTMLMediaElement.readyState at which a frame can be sampled (HAVE_CURRENT_DATA)
pub const VIDEO_HAVE_CURRENT_DATA: u16 = 2;

// Renderer
pub const CLEAR_ALPHA: f64 = 0.0; // transparent so the page background shows through
