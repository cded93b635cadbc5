//! Puzzle grid dimensions.

use std::{fmt, num::NonZero, str::FromStr};

const THREE: NonZero<usize> = NonZero::new(3).unwrap();

/// The number of rows and columns a puzzle image is cut into.
///
/// Both dimensions are at least one, so every grid holds at least one tile.
/// Positions inside the grid are row-major indices in `0..tile_count()`.
///
/// # Examples
///
/// ```
/// use picswap_core::GridSize;
///
/// let grid: GridSize = "3x4".parse().unwrap();
/// assert_eq!(grid.rows(), 3);
/// assert_eq!(grid.columns(), 4);
/// assert_eq!(grid.tile_count(), 12);
/// assert_eq!(grid.row_col(5), (1, 1));
/// assert_eq!(grid.to_string(), "3x4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    rows: NonZero<usize>,
    columns: NonZero<usize>,
}

impl GridSize {
    /// The classic 3 × 3 grid.
    pub const DEFAULT: Self = Self::new(THREE, THREE);

    /// Creates a grid size from non-zero dimensions.
    #[must_use]
    pub const fn new(rows: NonZero<usize>, columns: NonZero<usize>) -> Self {
        Self { rows, columns }
    }

    /// Creates a grid size, returning `None` if either dimension is zero.
    #[must_use]
    pub fn try_new(rows: usize, columns: usize) -> Option<Self> {
        Some(Self::new(NonZero::new(rows)?, NonZero::new(columns)?))
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows.get()
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn columns(self) -> usize {
        self.columns.get()
    }

    /// Returns the number of tiles (`rows × columns`).
    #[must_use]
    pub const fn tile_count(self) -> usize {
        self.rows.get() * self.columns.get()
    }

    /// Returns `true` if `position` is a valid row-major index into this grid.
    #[must_use]
    pub const fn contains(self, position: usize) -> bool {
        position < self.tile_count()
    }

    /// Converts a row-major position into `(row, column)`.
    ///
    /// The position is not range-checked; positions past the end map to rows
    /// past the last one.
    #[must_use]
    pub const fn row_col(self, position: usize) -> (usize, usize) {
        (position / self.columns.get(), position % self.columns.get())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Error returned when parsing a [`GridSize`] from text such as `"3x3"`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridSizeError {
    /// The text was not of the form `ROWSxCOLUMNS`.
    #[display("expected ROWSxCOLUMNS, got {_0:?}")]
    Malformed(#[error(not(source))] String),
    /// A dimension was not a positive integer.
    #[display("grid dimension must be a positive integer, got {_0:?}")]
    InvalidDimension(#[error(not(source))] String),
}

impl FromStr for GridSize {
    type Err = ParseGridSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, columns) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseGridSizeError::Malformed(s.to_owned()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<NonZero<usize>>()
                .map_err(|_| ParseGridSizeError::InvalidDimension(part.to_owned()))
        };
        Ok(Self::new(parse(rows)?, parse(columns)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_three_by_three() {
        assert_eq!(GridSize::default().rows(), 3);
        assert_eq!(GridSize::default().columns(), 3);
        assert_eq!(GridSize::DEFAULT.tile_count(), 9);
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(GridSize::try_new(0, 3).is_none());
        assert!(GridSize::try_new(3, 0).is_none());
        assert_eq!(
            GridSize::try_new(2, 5).map(GridSize::tile_count),
            Some(10)
        );
    }

    #[test]
    fn test_row_col_is_row_major() {
        let grid = GridSize::try_new(2, 3).unwrap();
        let cells: Vec<_> = (0..grid.tile_count()).map(|p| grid.row_col(p)).collect();
        assert_eq!(
            cells,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert!(grid.contains(5));
        assert!(!grid.contains(6));
    }

    #[test]
    fn test_parse() {
        assert_eq!("4x2".parse::<GridSize>(), Ok(GridSize::try_new(4, 2).unwrap()));
        assert_eq!(" 5X5 ".parse::<GridSize>(), Ok(GridSize::try_new(5, 5).unwrap()));
        assert!(matches!(
            "33".parse::<GridSize>(),
            Err(ParseGridSizeError::Malformed(_))
        ));
        assert!(matches!(
            "0x3".parse::<GridSize>(),
            Err(ParseGridSizeError::InvalidDimension(_))
        ));
        assert!(matches!(
            "ax3".parse::<GridSize>(),
            Err(ParseGridSizeError::InvalidDimension(_))
        ));
    }
}
