//! Sources that can be cut into tiles.

use crate::TileRect;

/// Anything with known pixel dimensions that can be cropped into tile regions.
///
/// The tile engine is generic over the region type, so a source can yield
/// real image crops, texture handles, or nothing but the rectangle itself.
pub trait TileSource {
    /// The content of one cropped tile.
    type Region;

    /// Returns `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Crops the region covered by `rect`.
    ///
    /// `rect` always lies within [`dimensions`](Self::dimensions).
    fn crop(&self, rect: TileRect) -> Self::Region;
}

/// A source without pixel data, yielding each tile's rectangle as its content.
///
/// Useful for headless sessions and tests where only geometry matters.
///
/// # Examples
///
/// ```
/// use picswap_core::{Extent, TileRect, TileSource};
///
/// let extent = Extent::new(9, 9);
/// assert_eq!(extent.dimensions(), (9, 9));
/// assert_eq!(extent.crop(TileRect::new(3, 0, 3, 3)), TileRect::new(3, 0, 3, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent {
    /// Creates an extent of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl TileSource for Extent {
    type Region = TileRect;

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn crop(&self, rect: TileRect) -> TileRect {
        rect
    }
}

impl<S: TileSource + ?Sized> TileSource for &S {
    type Region = S::Region;

    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn crop(&self, rect: TileRect) -> Self::Region {
        (**self).crop(rect)
    }
}
