use std::io::{self, Cursor};

use crate::binary_utils::read_u8;

/// Palette index 15 is reserved to mean "no color / fully transparent".
pub const TRANSPARENT_PIXEL: u8 = 0xF;

/// Byte stored for a 1x1 slot that holds no sprite at all.
pub const EMPTY_SPRITE_MARKER: u8 = 0xFF;

/// One sprite from an NSP container: a small indexed-color bitmap whose
/// pixels are 4-bit palette indices, packed two per byte on disk.
///
/// `pitch` is the row stride of the pixel buffer: the width rounded up to
/// even, so rows always pack into whole bytes. Odd-width sprites carry one
/// transparent padding column per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u16,
    height: u16,
    pitch: u16,
    pixels: Vec<u8>,
    is_empty: bool,
}

impl Sprite {
    pub fn new(width: u16, height: u16) -> Self {
        let pitch = width + (width & 1);
        Sprite {
            width,
            height,
            pitch,
            pixels: vec![TRANSPARENT_PIXEL; pitch as usize * height as usize],
            is_empty: false,
        }
    }

    /// The reserved 1x1 sentinel for a slot with no sprite in it.
    pub fn empty() -> Self {
        let mut sprite = Sprite::new(1, 1);
        sprite.is_empty = true;
        sprite
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pitch(&self) -> u16 {
        self.pitch
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Number of bytes this sprite's packed body occupies on disk.
    pub fn encoded_len(&self) -> usize {
        if self.width == 1 && self.height == 1 {
            1
        } else {
            // Pitch is even, so this divides exactly.
            self.pitch as usize * self.height as usize / 2
        }
    }

    /// Out-of-range coordinates read as 0, matching the original format's
    /// lenient lookup.
    pub fn get_pixel(&self, x: u16, y: u16) -> u8 {
        if x < self.pitch && y < self.height {
            self.pixels[y as usize * self.pitch as usize + x as usize]
        } else {
            0
        }
    }

    /// Out-of-range writes are silently ignored.
    pub fn set_pixel(&mut self, x: u16, y: u16, value: u8) {
        if x < self.pitch && y < self.height {
            self.pixels[y as usize * self.pitch as usize + x as usize] = value;
        }
    }

    /// Unpacks this sprite's pixel data from the cursor.
    ///
    /// 1x1 slots are special-cased: a single byte, `0xFF` marking an empty
    /// slot, anything else carrying the pixel in its high nibble. Every
    /// other size consumes `pitch * height / 2` bytes, high nibble first.
    pub fn load(&mut self, cursor: &mut Cursor<&[u8]>) -> io::Result<()> {
        if self.width == 1 && self.height == 1 {
            let value = read_u8(cursor)?;
            if value == EMPTY_SPRITE_MARKER {
                self.is_empty = true;
                self.pixels[0] = TRANSPARENT_PIXEL;
            } else {
                self.pixels[0] = value >> 4;
            }
            return Ok(());
        }

        for pair in 0..self.pixels.len() / 2 {
            let byte = read_u8(cursor)?;
            self.pixels[pair * 2] = byte >> 4;
            self.pixels[pair * 2 + 1] = byte & 0xF;
        }
        Ok(())
    }

    /// Packs this sprite's pixel data onto the end of `out`.
    ///
    /// The non-empty 1x1 case writes `pixel << 4` with a zero low nibble;
    /// that asymmetry is how the original files are laid out, so it is
    /// reproduced rather than normalized.
    pub fn save(&self, out: &mut Vec<u8>) {
        if self.width == 1 && self.height == 1 {
            if self.is_empty {
                out.push(EMPTY_SPRITE_MARKER);
            } else {
                out.push(self.pixels[0] << 4);
            }
            return;
        }

        for y in 0..self.height {
            let row = y as usize * self.pitch as usize;
            for x in (0..self.pitch as usize).step_by(2) {
                let high = self.pixels[row + x];
                let low = if x + 1 < self.pitch as usize {
                    self.pixels[row + x + 1]
                } else {
                    TRANSPARENT_PIXEL
                };
                out.push((high << 4) | low);
            }
        }
    }
}
