//! The fixed 16-entry sprite palette.
//!
//! Indices 0-14 are a 15-step grayscale ramp; index 15 is the transparent
//! sentinel. The table never changes at runtime, so it is built once on
//! first use and shared read-only by every conversion.

use std::sync::OnceLock;

use crate::formats::sprite::TRANSPARENT_PIXEL;

pub type Rgba = [u8; 4];

pub const PALETTE_SIZE: usize = 16;

fn table() -> &'static [Rgba; PALETTE_SIZE] {
    static TABLE: OnceLock<[Rgba; PALETTE_SIZE]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut colors = [[0u8; 4]; PALETTE_SIZE];
        for (i, color) in colors.iter_mut().enumerate().take(15) {
            let gray = (i * 255 / 14) as u8;
            *color = [gray, gray, gray, 255];
        }
        colors[TRANSPARENT_PIXEL as usize] = [0, 0, 0, 0];
        colors
    })
}

/// RGBA color for a palette index. Indices are 4-bit by construction.
pub fn color_of(index: u8) -> Rgba {
    table()[index as usize & 0xF]
}

/// Exact reverse lookup for an opaque color. There is no nearest-match
/// fallback: anything off the ramp has no index.
pub fn index_of(r: u8, g: u8, b: u8) -> Option<u8> {
    table()[..15]
        .iter()
        .position(|&[pr, pg, pb, _]| (pr, pg, pb) == (r, g, b))
        .map(|i| i as u8)
}
