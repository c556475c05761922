// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn renderer_constants_are_sane() {
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!((0.0..=1.0).contains(&CLEAR_ALPHA));
    // HAVE_NOTHING = 0, HAVE_METADATA = 1, HAVE_CURRENT_DATA = 2
    assert_eq!(VIDEO_HAVE_CURRENT_DATA, 2);
}

#[test]
fn dom_lookups_are_well_formed() {
    assert!(CANVAS_SELECTOR.starts_with("canvas."));
    assert!(!VIDEO_ELEMENT_ID.starts_with('#'));
    assert!(GRADIENT_TEXTURE_URL.ends_with(".jpg"));
    assert!(!GRADIENT_TEXTURE_URL.starts_with('/'));
}
