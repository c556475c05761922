//! sRGB palette decoding. Colours are authored as 8-bit sRGB and shaded in linear light.

use glam::Vec3;

/// Convert one sRGB-encoded channel in \[0, 1\] to linear light.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear colour from an 8-bit sRGB triple such as `#fffaf0`.
#[inline]
pub fn linear_from_srgb8(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(
        srgb_to_linear(rgb[0] as f32 / 255.0),
        srgb_to_linear(rgb[1] as f32 / 255.0),
        srgb_to_linear(rgb[2] as f32 / 255.0),
    )
}
