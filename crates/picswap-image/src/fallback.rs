use std::sync::OnceLock;

use image::{DynamicImage, Rgb, RgbImage};

/// Well-known name of the image used when no other image can be loaded.
pub const DEFAULT_IMAGE_NAME: &str = "default_image";

/// Width and height of the default image, in pixels.
pub const DEFAULT_IMAGE_SIZE: u32 = 1024;

const BAND: u32 = 128;

// Rendered once and cloned afterwards.
static DEFAULT_IMAGE: OnceLock<DynamicImage> = OnceLock::new();

/// Returns the default image.
///
/// The image is deterministic: a red/green gradient over a checkerboard of blue
/// bands, so that every tile of any reasonable grid looks different.
#[must_use]
pub fn default_image() -> DynamicImage {
    DEFAULT_IMAGE.get_or_init(render_default_image).clone()
}

fn render_default_image() -> DynamicImage {
    let size = DEFAULT_IMAGE_SIZE;
    let image = RgbImage::from_fn(size, size, |x, y| {
        let blue = if (x / BAND + y / BAND) % 2 == 0 { 64 } else { 192 };
        Rgb([ramp(x, size), ramp(y, size), blue])
    });
    DynamicImage::ImageRgb8(image)
}

fn ramp(value: u32, size: u32) -> u8 {
    let scaled = u64::from(value) * 255 / u64::from(size.saturating_sub(1).max(1));
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use image::GenericImageView as _;

    use super::*;

    #[test]
    fn test_default_image_is_deterministic() {
        let a = default_image();
        let b = render_default_image();
        assert_eq!(a.dimensions(), (DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE));
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_default_image_corners() {
        let image = default_image();
        let last = DEFAULT_IMAGE_SIZE - 1;
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 64, 255]);
        assert_eq!(image.get_pixel(last, 0).0, [255, 0, 192, 255]);
        assert_eq!(image.get_pixel(last, last).0, [255, 255, 64, 255]);
    }
}
