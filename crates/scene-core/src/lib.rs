pub mod animator;
pub mod builder;
pub mod color;
pub mod config;
pub mod constants;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod scene;
pub mod stage;

pub use animator::*;
pub use builder::*;
pub use config::*;
pub use geometry::{MeshData, SectionShape, Vertex};
pub use input::*;
pub use layout::*;
pub use scene::*;
pub use stage::*;

// Shaders bundled as string constants
pub static TOON_WGSL: &str = include_str!("../shaders/toon.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static VIDEO_WGSL: &str = include_str!("../shaders/video.wgsl");
