use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the NSP and TOSTEXT codecs and their file drivers.
///
/// Structural violations abort the operation that found them; recoverable
/// conditions (length clamps, single bad table entries) never surface here,
/// they are logged and carried as per-entry results instead.
#[derive(Debug, Error)]
pub enum TosError {
    #[error("sprite {slot}: data truncated, needed {needed} more byte(s) at offset {offset}")]
    SpriteTruncated {
        slot: usize,
        offset: usize,
        needed: usize,
    },

    #[error("header truncated: {len} byte(s), expected at least {expected}")]
    HeaderTruncated { len: usize, expected: usize },

    #[error("sprite {slot}: dimensions {width}x{height} do not fit in a byte")]
    OversizedSprite {
        slot: usize,
        width: u16,
        height: u16,
    },

    #[error("first offset {offset:#06x} is beyond the end of the table ({len} bytes)")]
    BadFirstOffset { offset: u16, len: usize },

    #[error("entry {index} at offset {offset} does not fit in the 16-bit offset range")]
    TableTooLarge { index: usize, offset: usize },

    #[error("no exact palette match for rgb({r},{g},{b}) at ({x},{y}) in {file:?}")]
    PaletteMismatch {
        r: u8,
        g: u8,
        b: u8,
        x: u32,
        y: u32,
        file: PathBuf,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
