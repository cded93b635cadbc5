/// Errors returned by tile engine queries and constructors.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// A position index was outside the puzzle.
    #[display("position {position} is out of range for {len} tiles")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of tiles in the puzzle.
        len: usize,
    },
    /// An arrangement was not a permutation of the puzzle's positions.
    #[display("arrangement is not a permutation of 0..{len}")]
    InvalidArrangement {
        /// Number of tiles in the puzzle.
        len: usize,
    },
    /// The session has no puzzle yet.
    #[display("no puzzle has been started")]
    NotStarted,
}

/// Reasons a swap is refused.
///
/// A refused swap leaves the puzzle untouched and notifies nobody.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum SwapBlockReason {
    /// Both positions are the same.
    #[display("cannot swap a tile with itself")]
    SamePosition,
    /// A position is outside the puzzle.
    #[display("position {position} is out of range for {len} tiles")]
    OutOfRange {
        /// Offending position.
        position: usize,
        /// Number of tiles in the puzzle.
        len: usize,
    },
    /// The tile at a position is already in place and locked.
    #[display("tile at position {position} is fixed")]
    FixedTile {
        /// Position of the fixed tile.
        position: usize,
    },
    /// The session has no puzzle yet.
    #[display("no puzzle has been started")]
    NotStarted,
}
