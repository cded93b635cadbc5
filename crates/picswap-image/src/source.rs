use std::{fmt, path::PathBuf};

use image::DynamicImage;
use picswap_core::{TileRect, TileSource};

use crate::{DEFAULT_IMAGE_NAME, DEFAULT_IMAGE_URL, default_image};

/// Where to get a puzzle image from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageDescriptor {
    /// Download from an HTTP(S) URL.
    Url(String),
    /// Read from a local file.
    File(PathBuf),
    /// Use the default image directly.
    Default,
}

impl Default for ImageDescriptor {
    fn default() -> Self {
        Self::Url(DEFAULT_IMAGE_URL.to_owned())
    }
}

impl fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Default => f.write_str(DEFAULT_IMAGE_NAME),
        }
    }
}

/// How a [`LoadedImage`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ImageOrigin {
    /// Downloaded from a URL.
    Remote,
    /// Read from a local file.
    File,
    /// The default image, either requested or substituted after a failure.
    Fallback,
}

/// A decoded image ready to be cut into tiles.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// The pixels.
    pub image: DynamicImage,
    /// Where the pixels came from.
    pub origin: ImageOrigin,
}

impl LoadedImage {
    /// Wraps the default image.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            image: default_image(),
            origin: ImageOrigin::Fallback,
        }
    }
}

impl TileSource for LoadedImage {
    type Region = DynamicImage;

    fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    fn crop(&self, rect: TileRect) -> DynamicImage {
        self.image.crop_imm(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Capability to produce a puzzle image.
///
/// Implementations never fail: any problem is absorbed by returning the
/// default image. Fetching may block on I/O, so callers that must stay
/// responsive run it on a background thread.
pub trait ImageSource {
    /// Produces the image described by `descriptor`, or the default image.
    fn fetch_image(&self, descriptor: &ImageDescriptor) -> LoadedImage;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn fetch_image(&self, descriptor: &ImageDescriptor) -> LoadedImage {
        (**self).fetch_image(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use picswap_core::{GridSize, partition};

    use super::*;

    #[test]
    fn test_crop_tiles_from_loaded_image() {
        let loaded = LoadedImage::fallback();
        let rects = partition(loaded.image.width(), loaded.image.height(), GridSize::DEFAULT);
        let tiles: Vec<_> = rects.iter().map(|&rect| loaded.crop(rect)).collect();

        assert_eq!(tiles.len(), 9);
        for tile in &tiles {
            assert_eq!((tile.width(), tile.height()), (341, 341));
        }
        assert_ne!(tiles[0].as_bytes(), tiles[1].as_bytes());
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(ImageDescriptor::default().to_string(), DEFAULT_IMAGE_URL);
        assert_eq!(ImageDescriptor::Default.to_string(), DEFAULT_IMAGE_NAME);
        assert_eq!(
            ImageDescriptor::File(PathBuf::from("cat.png")).to_string(),
            "cat.png"
        );
    }
}
