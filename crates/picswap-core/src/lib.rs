//! Core data structures for picture tile puzzles.
//!
//! This crate provides the small vocabulary shared by puzzle generation, the
//! tile engine, and image loading.
//!
//! # Overview
//!
//! 1. **Grid geometry**
//!    - [`grid_size`]: Number of rows and columns of a puzzle, never zero.
//!    - [`tile_rect`]: Row-major partition of an image into tile rectangles.
//!
//! 2. **Identity**
//!    - [`tile_id`]: Opaque, unique tile identifiers.
//!
//! 3. **Sources**
//!    - [`source`]: The [`TileSource`] trait for anything that can be cut into
//!      tiles, plus [`Extent`], a content-free source for headless use.
//!
//! # Examples
//!
//! ```
//! use picswap_core::{GridSize, TileRect, partition};
//!
//! let rects = partition(9, 9, GridSize::DEFAULT);
//! assert_eq!(rects.len(), 9);
//! assert_eq!(rects[4], TileRect::new(3, 3, 3, 3));
//! ```

pub mod grid_size;
pub mod source;
pub mod tile_id;
pub mod tile_rect;

pub use self::{
    grid_size::{GridSize, ParseGridSizeError},
    source::{Extent, TileSource},
    tile_id::TileId,
    tile_rect::{TileRect, partition},
};
