//! Tile engine for picture swap puzzles.
//!
//! A [`Puzzle`] owns one session's state: the tiles cut from a source image,
//! their current arrangement, and the immutable solved arrangement they are
//! measured against. Tiles that reach their solved position become *fixed* and
//! can no longer be moved, so progress is monotonic.
//!
//! [`PuzzleSession`] wraps the current puzzle, replaces it wholesale when a new
//! image is loaded, and notifies subscribers after every state change.
//!
//! # Example
//!
//! ```
//! use picswap_core::{Extent, GridSize};
//! use picswap_game::PuzzleSession;
//!
//! let mut session = PuzzleSession::new();
//! session.initialize(&Extent::new(9, 9), GridSize::DEFAULT);
//!
//! let puzzle = session.puzzle().expect("session was initialized");
//! assert_eq!(puzzle.tile_count(), 9);
//! ```

mod error;
mod puzzle;
mod session;
mod tile;

pub use self::{
    error::{GameError, SwapBlockReason},
    puzzle::{Puzzle, SwapOperation},
    session::{ListenerId, PuzzleEvent, PuzzleSession},
    tile::Tile,
};
