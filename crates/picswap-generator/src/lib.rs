//! Shuffle generation for picture tile puzzles.
//!
//! A fresh puzzle presents its tiles in a uniformly random order. This crate
//! produces that order as a permutation of solved positions, reproducibly from
//! a [`PuzzleSeed`].
//!
//! # Examples
//!
//! ```
//! use picswap_core::GridSize;
//! use picswap_generator::{PuzzleSeed, ShuffleGenerator};
//!
//! let generator = ShuffleGenerator::new();
//! let shuffle = generator.generate(GridSize::DEFAULT);
//! assert_eq!(shuffle.order.len(), 9);
//!
//! // The same seed always yields the same order.
//! let replay = generator.generate_with_seed(GridSize::DEFAULT, shuffle.seed);
//! assert_eq!(replay, shuffle);
//! ```

use std::{fmt, str::FromStr};

use picswap_core::GridSize;
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;

/// Number of bytes in a [`PuzzleSeed`].
pub const SEED_LEN: usize = 32;

/// Seed that fully determines a shuffle for a given grid size.
///
/// Displayed and parsed as 64 lowercase hexadecimal characters.
///
/// # Examples
///
/// ```
/// use picswap_generator::PuzzleSeed;
///
/// let text = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";
/// let seed: PuzzleSeed = text.parse().unwrap();
/// assert_eq!(seed.to_string(), text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; SEED_LEN]);

impl PuzzleSeed {
    /// Draws a seed from the thread-local, OS-seeded generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`PuzzleSeed`] from hexadecimal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The text did not contain exactly 64 characters.
    #[display("seed must be {} hex characters, got {len}", SEED_LEN * 2)]
    InvalidLength {
        /// Number of characters found.
        len: usize,
    },
    /// A character was not a hexadecimal digit.
    #[display("invalid hex character {found:?} at offset {offset}")]
    InvalidCharacter {
        /// Offending character.
        found: char,
        /// Character offset within the text.
        offset: usize,
    },
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != SEED_LEN * 2 {
            return Err(ParseSeedError::InvalidLength { len });
        }

        let mut bytes = [0; SEED_LEN];
        let mut nibbles = s.chars().enumerate().map(|(offset, found)| {
            found
                .to_digit(16)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(ParseSeedError::InvalidCharacter { found, offset })
        });
        for byte in &mut bytes {
            // Length was checked above, so both nibbles are present.
            let high = nibbles.next().unwrap_or(Ok(0))?;
            let low = nibbles.next().unwrap_or(Ok(0))?;
            *byte = (high << 4) | low;
        }
        Ok(Self(bytes))
    }
}

/// The presentation order of a freshly shuffled puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedShuffle {
    /// `order[position]` is the solved position of the tile shown at `position`.
    ///
    /// Always a permutation of `0..grid.tile_count()`.
    pub order: Vec<usize>,
    /// Seed the order was generated from.
    pub seed: PuzzleSeed,
}

/// Generates uniformly random tile orders.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShuffleGenerator;

impl ShuffleGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates a shuffle from a fresh random seed.
    #[must_use]
    pub fn generate(&self, grid: GridSize) -> GeneratedShuffle {
        self.generate_with_seed(grid, PuzzleSeed::random())
    }

    /// Generates the shuffle determined by `seed`.
    ///
    /// Every permutation of the grid's positions is equally likely, including
    /// the identity and ones that leave some tiles in place.
    #[must_use]
    pub fn generate_with_seed(&self, grid: GridSize, seed: PuzzleSeed) -> GeneratedShuffle {
        let mut rng = Pcg64::from_seed(seed.0);
        let mut order: Vec<usize> = (0..grid.tile_count()).collect();
        order.shuffle(&mut rng);
        GeneratedShuffle { order, seed }
    }
}
