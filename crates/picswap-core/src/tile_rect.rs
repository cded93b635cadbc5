//! Tile rectangles and image partitioning.

use crate::GridSize;

/// A rectangular region of a source image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TileRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the two rectangles share at least one pixel.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let span = |start: u32, len: u32| (u64::from(start), u64::from(start) + u64::from(len));
        let (ax0, ax1) = span(self.x, self.width);
        let (bx0, bx1) = span(other.x, other.width);
        let (ay0, ay1) = span(self.y, self.height);
        let (by0, by1) = span(other.y, other.height);
        !self.is_empty() && !other.is_empty() && ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }
}

/// Splits a `width` × `height` image into `grid` tiles in row-major order.
///
/// Every tile has the same size: `width / columns` by `height / rows`, using
/// integer division. Tile `(row, col)` starts at `(col × tile_width, row ×
/// tile_height)`. Pixels left over on the right and bottom edges when the
/// image does not divide evenly belong to no tile. An image smaller than the
/// grid yields empty rectangles.
///
/// # Examples
///
/// ```
/// use picswap_core::{GridSize, TileRect, partition};
///
/// let grid = GridSize::try_new(2, 3).unwrap();
/// let rects = partition(31, 20, grid);
/// assert_eq!(rects.len(), 6);
/// assert_eq!(rects[0], TileRect::new(0, 0, 10, 10));
/// assert_eq!(rects[2], TileRect::new(20, 0, 10, 10));
/// assert_eq!(rects[3], TileRect::new(0, 10, 10, 10));
/// ```
#[must_use]
pub fn partition(width: u32, height: u32, grid: GridSize) -> Vec<TileRect> {
    let tile_width = width / dimension_divisor(grid.columns());
    let tile_height = height / dimension_divisor(grid.rows());

    (0..grid.tile_count())
        .map(|position| {
            let (row, col) = grid.row_col(position);
            TileRect::new(
                offset(col, tile_width),
                offset(row, tile_height),
                tile_width,
                tile_height,
            )
        })
        .collect()
}

// More divisions than `u32::MAX` cannot fit even one pixel per tile.
fn dimension_divisor(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn offset(index: usize, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    u32::try_from(index)
        .ok()
        .and_then(|index| index.checked_mul(size))
        .unwrap_or(u32::MAX)
}
