//! Tile identity.

use uuid::Uuid;

/// An opaque, unique tile identifier.
///
/// Identifiers are assigned when a tile is cut from its source image and are
/// never reassigned. Two tiles compare equal by identity only through their
/// ids; the tile content plays no part.
///
/// # Examples
///
/// ```
/// use picswap_core::TileId;
///
/// let a = TileId::new_random();
/// let b = TileId::new_random();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct TileId(Uuid);

impl TileId {
    /// Generates a fresh random (v4) identifier.
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for TileId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
