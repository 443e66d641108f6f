//! NSP sprite container framing.
//!
//! # Layout
//! ```text
//! 0x000..0x0C0: 96 x { width: u8, height: u8 }
//! 0x0C0..EOF:   96 packed pixel bodies in slot order, each
//!               pitch * height / 2 bytes (1 byte for 1x1 slots)
//! ```
//!
//! Bodies carry no length prefix; each one's size is derived from its own
//! header entry, so they are consumed strictly sequentially.

use std::io::Cursor;

use crate::binary_utils::{read_u8, remaining};
use crate::error::TosError;
use crate::formats::sprite::Sprite;

/// Every non-empty NSP container holds exactly this many sprite slots.
pub const SPRITE_COUNT: usize = 96;

/// Two header bytes (width, height) per slot.
pub const HEADER_SIZE: usize = SPRITE_COUNT * 2;

/// Decodes a whole container blob into its 96 sprites, in slot order.
/// An empty blob is a valid container with no sprites.
pub fn decode(data: &[u8]) -> Result<Vec<Sprite>, TosError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    if data.len() < HEADER_SIZE {
        return Err(TosError::HeaderTruncated {
            len: data.len(),
            expected: HEADER_SIZE,
        });
    }

    let mut cursor = Cursor::new(data);

    let mut sprites = Vec::with_capacity(SPRITE_COUNT);
    for _ in 0..SPRITE_COUNT {
        let width = read_u8(&mut cursor)? as u16;
        let height = read_u8(&mut cursor)? as u16;
        sprites.push(Sprite::new(width, height));
    }

    for (slot, sprite) in sprites.iter_mut().enumerate() {
        let needed = sprite.encoded_len();
        let available = remaining(&cursor);
        if available < needed {
            return Err(TosError::SpriteTruncated {
                slot,
                offset: cursor.position() as usize,
                needed: needed - available,
            });
        }
        sprite.load(&mut cursor)?;
    }

    Ok(sprites)
}

/// Encodes sprites back into a container blob: the full header first, then
/// every packed body in the same order.
pub fn encode(sprites: &[Sprite]) -> Result<Vec<u8>, TosError> {
    let mut out = Vec::with_capacity(
        sprites.len() * 2 + sprites.iter().map(Sprite::encoded_len).sum::<usize>(),
    );

    for (slot, sprite) in sprites.iter().enumerate() {
        if sprite.width() > 0xFF || sprite.height() > 0xFF {
            return Err(TosError::OversizedSprite {
                slot,
                width: sprite.width(),
                height: sprite.height(),
            });
        }
        out.push(sprite.width() as u8);
        out.push(sprite.height() as u8);
    }

    for sprite in sprites {
        sprite.save(&mut out);
    }

    Ok(out)
}
