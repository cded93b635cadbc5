use picswap_core::{TileId, TileRect};

/// One rectangular, identity-bearing piece of the puzzle image.
///
/// The fixed flag is owned by the engine: it is recomputed after every
/// reordering and cannot be set from outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile<T> {
    id: TileId,
    home: usize,
    rect: TileRect,
    content: T,
    is_fixed: bool,
}

impl<T> Tile<T> {
    pub(crate) fn new(home: usize, rect: TileRect, content: T) -> Self {
        Self {
            id: TileId::new_random(),
            home,
            rect,
            content,
            is_fixed: false,
        }
    }

    /// Returns the tile's unique identifier.
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Returns the position this tile occupies in the solved arrangement.
    #[must_use]
    pub fn home(&self) -> usize {
        self.home
    }

    /// Returns the source rectangle this tile was cut from.
    #[must_use]
    pub fn rect(&self) -> TileRect {
        self.rect
    }

    /// Returns the tile's visual payload.
    #[must_use]
    pub fn content(&self) -> &T {
        &self.content
    }

    /// Returns `true` if the tile currently sits at its solved position.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.is_fixed
    }

    pub(crate) fn set_fixed(&mut self, is_fixed: bool) {
        self.is_fixed = is_fixed;
    }
}
