//! Adapter between sprite pixel-index buffers and RGBA raster images.
//!
//! Rasters are written as lossless PNG; every pixel is either fully
//! transparent or an exact palette color, and anything else coming back in
//! is rejected rather than quantized.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::TosError;
use crate::formats::sprite::{Sprite, TRANSPARENT_PIXEL};
use crate::graphics::palette;

/// Renders a sprite's visible pixels (the padding column is skipped).
/// Empty slots render as a single transparent pixel.
pub fn sprite_to_image(sprite: &Sprite) -> RgbaImage {
    if sprite.is_empty() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        return image;
    }

    let mut image = RgbaImage::new(sprite.width() as u32, sprite.height() as u32);
    for y in 0..sprite.height() {
        for x in 0..sprite.width() {
            let value = sprite.get_pixel(x, y);
            let color = if value == TRANSPARENT_PIXEL {
                [0, 0, 0, 0]
            } else {
                palette::color_of(value)
            };
            image.put_pixel(x as u32, y as u32, Rgba(color));
        }
    }
    image
}

/// Rebuilds a sprite from a raster image. A 1x1 fully transparent image is
/// the empty-slot sentinel; any other pixel must be transparent or an exact
/// palette color.
pub fn image_to_sprite(image: &RgbaImage, source: &Path) -> Result<Sprite, TosError> {
    if image.width() == 1 && image.height() == 1 && image.get_pixel(0, 0).0[3] == 0 {
        return Ok(Sprite::empty());
    }

    // Oversized dimensions are caught when the container is encoded; the
    // clamp just keeps the u16 cast from wrapping first.
    let width = image.width().min(u16::MAX as u32) as u16;
    let height = image.height().min(u16::MAX as u32) as u16;

    let mut sprite = Sprite::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            sprite.set_pixel(x as u16, y as u16, TRANSPARENT_PIXEL);
        } else {
            let index = palette::index_of(r, g, b).ok_or(TosError::PaletteMismatch {
                r,
                g,
                b,
                x,
                y,
                file: source.to_path_buf(),
            })?;
            sprite.set_pixel(x as u16, y as u16, index);
        }
    }
    // Sprite::new starts fully transparent, so any odd-width padding column
    // is already the sentinel.
    Ok(sprite)
}

pub fn write_sprite(path: &Path, sprite: &Sprite) -> Result<(), TosError> {
    sprite_to_image(sprite).save(path)?;
    Ok(())
}

pub fn read_sprite(path: &Path) -> Result<Sprite, TosError> {
    let image = image::open(path)?.to_rgba8();
    image_to_sprite(&image, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source() -> PathBuf {
        PathBuf::from("test.png")
    }

    #[test]
    fn test_sprite_image_roundtrip() {
        let mut sprite = Sprite::new(3, 2); // odd width
        sprite.set_pixel(0, 0, 0);
        sprite.set_pixel(1, 0, 7);
        sprite.set_pixel(2, 1, 14);

        let image = sprite_to_image(&sprite);
        assert_eq!(image.dimensions(), (3, 2));

        let rebuilt = image_to_sprite(&image, &source()).unwrap();
        assert_eq!(rebuilt, sprite);
    }

    #[test]
    fn test_empty_sentinel_is_one_transparent_pixel() {
        let image = sprite_to_image(&Sprite::empty());
        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.get_pixel(0, 0).0[3], 0);

        let rebuilt = image_to_sprite(&image, &source()).unwrap();
        assert!(rebuilt.is_empty());
    }

    #[test]
    fn test_off_palette_color_is_rejected() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        match image_to_sprite(&image, &source()).unwrap_err() {
            TosError::PaletteMismatch { r, g, b, x, y, .. } => {
                assert_eq!((r, g, b), (10, 20, 30));
                assert_eq!((x, y), (1, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_transparent_pixels_map_to_sentinel() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        let sprite = image_to_sprite(&image, &source()).unwrap();
        assert_eq!(sprite.get_pixel(0, 0), 14);
        assert_eq!(sprite.get_pixel(1, 0), TRANSPARENT_PIXEL);
        assert!(!sprite.is_empty());
    }
}
