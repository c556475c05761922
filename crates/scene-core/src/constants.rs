use glam::Vec3;

// Shared layout/motion tuning constants for the scroll-driven scene.

// Scene layout
pub const OBJECTS_DISTANCE: f32 = 4.0; // vertical gap between stacked sections
pub const SECTION_COUNT: usize = 3;
pub const SECTION_OFFSETS_X: [f32; SECTION_COUNT] = [0.0, -2.0, 2.0];

// Camera
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 6.0;

// Video plane fit; trial-and-error number so the plane covers the frustum at CAMERA_Z
pub const FIT_CONSTANT: f32 = 1.892 * 2.0;
pub const TEXTURE_CENTER: [f32; 2] = [0.5, 0.5];

// Scroll / cursor response
pub const HINGE_SCROLL_DIVISOR: f32 = 200.0; // hinge yaw = scroll_y / divisor
pub const PARALLAX_AMOUNT: f32 = 0.5;
pub const SMOOTHING_RATE: f32 = 5.0; // per second

// Continuous rotation of section objects (radians per second)
pub const ROTATION_RATE_X: f32 = 0.1;
pub const ROTATION_RATE_Y: f32 = 0.12;

// Section-change spin
pub const SECTION_TWEEN_DURATION_SEC: f32 = 1.5;
pub const SECTION_TWEEN_DELTA: Vec3 = Vec3::new(6.0, 3.0, 1.5);

// Particles
pub const PARTICLE_COUNT: usize = 200;
pub const PARTICLE_SPREAD: f32 = 10.0;
pub const PARTICLE_SIZE: f32 = 0.03;
pub const PARTICLE_SEED: u64 = 42;

// Lighting
pub const LIGHT_POSITION: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const LIGHT_INTENSITY: f32 = 3.0;

// sRGB palette
pub const FLORAL_WHITE: [u8; 3] = [0xff, 0xfa, 0xf0];
pub const LIGHT_COLOR: [u8; 3] = [0xff, 0xff, 0xff];
pub const VIDEO_TINT: [u8; 3] = [0xd3, 0xd3, 0xd3]; // darkened a bit so page text stays readable

// Gradient-map fallback used until the gradient image arrives (3 toon bands)
pub const GRADIENT_FALLBACK: [u8; 3] = [0x40, 0x90, 0xff];
