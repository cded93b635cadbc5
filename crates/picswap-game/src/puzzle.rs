use picswap_core::{GridSize, TileId, TileSource, partition};
use picswap_generator::{GeneratedShuffle, PuzzleSeed, ShuffleGenerator};

use crate::{GameError, SwapBlockReason, Tile};

/// The state of one puzzle: tiles in their current arrangement, measured
/// against the solved arrangement fixed at creation.
///
/// Positions are row-major indices in `0..tile_count()`. The current and the
/// solved arrangement always hold the same set of tile identities; tiles are
/// never added, removed, or duplicated after creation.
///
/// # Example
///
/// ```
/// use picswap_core::{Extent, GridSize, TileRect};
/// use picswap_game::Puzzle;
///
/// // Present the nine tiles of a 9×9 image in reverse order.
/// let order: Vec<usize> = (0..9).rev().collect();
/// let mut puzzle = Puzzle::from_arrangement(&Extent::new(9, 9), GridSize::DEFAULT, &order)?;
///
/// assert_eq!(puzzle.tile(0).map(|t| *t.content()), Some(TileRect::new(6, 6, 3, 3)));
/// // The centre tile is already home, so it is fixed.
/// assert!(puzzle.is_at_correct_position(4)?);
/// assert!(puzzle.swap(4, 0).is_err());
///
/// puzzle.swap(0, 8).unwrap();
/// assert!(puzzle.tile(0).unwrap().is_fixed());
/// # Ok::<(), picswap_game::GameError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle<T> {
    grid: GridSize,
    tiles: Vec<Tile<T>>,
    solved: Vec<TileId>,
    seed: Option<PuzzleSeed>,
    moves: usize,
}

/// Effect of an accepted swap, as predicted by
/// [`Puzzle::swap_capability`] and reported by [`Puzzle::swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOperation {
    /// First swapped position.
    pub first: usize,
    /// Second swapped position.
    pub second: usize,
    /// How many of the two tiles land on their solved position (0 to 2).
    pub newly_fixed: usize,
    /// Whether the swap leaves every tile fixed.
    pub completes_puzzle: bool,
}

impl<T> Puzzle<T> {
    /// Cuts `source` into `grid` tiles and shuffles them uniformly at random.
    ///
    /// Tiles that happen to land on their solved position start out fixed.
    #[must_use]
    pub fn new<S>(source: &S, grid: GridSize) -> Self
    where
        S: TileSource<Region = T> + ?Sized,
    {
        Self::from_shuffle(source, grid, ShuffleGenerator::new().generate(grid))
    }

    /// Cuts `source` into `grid` tiles and shuffles them as determined by `seed`.
    #[must_use]
    pub fn with_seed<S>(source: &S, grid: GridSize, seed: PuzzleSeed) -> Self
    where
        S: TileSource<Region = T> + ?Sized,
    {
        Self::from_shuffle(
            source,
            grid,
            ShuffleGenerator::new().generate_with_seed(grid, seed),
        )
    }

    /// Cuts `source` into `grid` tiles and presents them in the given order.
    ///
    /// `order[position]` is the solved position of the tile placed at
    /// `position`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArrangement`] if `order` is not a
    /// permutation of `0..grid.tile_count()`.
    pub fn from_arrangement<S>(source: &S, grid: GridSize, order: &[usize]) -> Result<Self, GameError>
    where
        S: TileSource<Region = T> + ?Sized,
    {
        let len = grid.tile_count();
        if !is_permutation(order, len) {
            return Err(GameError::InvalidArrangement { len });
        }
        Ok(Self::arrange(source, grid, order, None))
    }

    fn from_shuffle<S>(source: &S, grid: GridSize, shuffle: GeneratedShuffle) -> Self
    where
        S: TileSource<Region = T> + ?Sized,
    {
        let GeneratedShuffle { order, seed } = shuffle;
        Self::arrange(source, grid, &order, Some(seed))
    }

    // `order` must be a permutation of the grid's positions.
    fn arrange<S>(source: &S, grid: GridSize, order: &[usize], seed: Option<PuzzleSeed>) -> Self
    where
        S: TileSource<Region = T> + ?Sized,
    {
        let (width, height) = source.dimensions();
        let mut tiles: Vec<_> = partition(width, height, grid)
            .into_iter()
            .enumerate()
            .map(|(home, rect)| Tile::new(home, rect, source.crop(rect)))
            .collect();
        let solved = tiles.iter().map(Tile::id).collect();

        let mut presented_at = vec![0; order.len()];
        for (position, &home) in order.iter().enumerate() {
            presented_at[home] = position;
        }
        tiles.sort_by_key(|tile| presented_at[tile.home()]);

        let mut this = Self {
            grid,
            tiles,
            solved,
            seed,
            moves: 0,
        };
        this.recompute_fixed();

        log::debug!(
            "created {grid} puzzle from {width}x{height} source: {} of {} tiles in place",
            this.fixed_count(),
            this.tile_count(),
        );
        this
    }

    /// Returns the grid size.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns the number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the seed the arrangement was shuffled from, if it was shuffled.
    #[must_use]
    pub fn seed(&self) -> Option<PuzzleSeed> {
        self.seed
    }

    /// Returns the number of accepted swaps so far.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns the tiles in their current arrangement.
    #[must_use]
    pub fn tiles(&self) -> &[Tile<T>] {
        &self.tiles
    }

    /// Returns the tile currently at `position`.
    #[must_use]
    pub fn tile(&self, position: usize) -> Option<&Tile<T>> {
        self.tiles.get(position)
    }

    /// Returns the tile identities in their solved arrangement.
    #[must_use]
    pub fn solved_order(&self) -> &[TileId] {
        &self.solved
    }

    /// Returns the current position of the tile with identity `id`.
    #[must_use]
    pub fn position_of(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id() == id)
    }

    /// Returns the solved position of the tile at each current position.
    #[must_use]
    pub fn arrangement(&self) -> Vec<usize> {
        self.tiles.iter().map(Tile::home).collect()
    }

    /// Returns the number of tiles on their solved position.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_fixed()).count()
    }

    /// Returns `true` if the tile at `position` is the one that belongs there.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PositionOutOfRange`] if `position` is outside the
    /// puzzle.
    pub fn is_at_correct_position(&self, position: usize) -> Result<bool, GameError> {
        match (self.tiles.get(position), self.solved.get(position)) {
            (Some(tile), Some(&id)) => Ok(tile.id() == id),
            _ => Err(GameError::PositionOutOfRange {
                position,
                len: self.tile_count(),
            }),
        }
    }

    /// Returns `true` if every tile is fixed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(Tile::is_fixed)
    }

    /// Reports whether the tiles at `first` and `second` may be swapped, and
    /// what the swap would do, without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`SwapBlockReason::SamePosition`] if both positions are equal,
    /// [`SwapBlockReason::OutOfRange`] if either is outside the puzzle, or
    /// [`SwapBlockReason::FixedTile`] if either tile is fixed.
    pub fn swap_capability(
        &self,
        first: usize,
        second: usize,
    ) -> Result<SwapOperation, SwapBlockReason> {
        if first == second {
            return Err(SwapBlockReason::SamePosition);
        }
        for position in [first, second] {
            if !self.grid.contains(position) {
                return Err(SwapBlockReason::OutOfRange {
                    position,
                    len: self.tile_count(),
                });
            }
        }
        for position in [first, second] {
            if self.tiles[position].is_fixed() {
                return Err(SwapBlockReason::FixedTile { position });
            }
        }

        let newly_fixed = usize::from(self.tiles[first].id() == self.solved[second])
            + usize::from(self.tiles[second].id() == self.solved[first]);
        Ok(SwapOperation {
            first,
            second,
            newly_fixed,
            completes_puzzle: self.fixed_count() + newly_fixed == self.tile_count(),
        })
    }

    /// Swaps the tiles at `first` and `second`.
    ///
    /// Identity and content travel together. Fixed state is recomputed for the
    /// whole arrangement afterwards. A refused swap changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the same block reasons as [`swap_capability`](Self::swap_capability).
    pub fn swap(&mut self, first: usize, second: usize) -> Result<SwapOperation, SwapBlockReason> {
        let operation = self.swap_capability(first, second)?;

        self.tiles.swap(first, second);
        self.moves += 1;
        self.recompute_fixed();

        log::debug!(
            "swapped positions {first} and {second}: {} of {} tiles in place",
            self.fixed_count(),
            self.tile_count(),
        );
        Ok(operation)
    }

    fn recompute_fixed(&mut self) {
        for (tile, &id) in self.tiles.iter_mut().zip(&self.solved) {
            tile.set_fixed(tile.id() == id);
        }
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &home in order {
        match seen.get_mut(home) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
