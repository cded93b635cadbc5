//! Text rendering of the board.

use std::fmt::Write as _;

use picswap_game::Puzzle;

/// Marks a fixed tile.
const FIXED_MARK: char = '*';

/// Renders the board as rows of `position:home` cells.
///
/// Each cell shows the position a player types and, after the colon, the
/// position the tile belongs at. Fixed tiles carry a trailing `*`. The board
/// is solved when every cell reads `n:n`.
#[must_use]
pub fn render_board<T>(puzzle: &Puzzle<T>) -> String {
    let grid = puzzle.grid();
    let width = digits(puzzle.tile_count().saturating_sub(1));
    let mut out = String::new();

    for (position, tile) in puzzle.tiles().iter().enumerate() {
        let (_, column) = grid.row_col(position);
        if column > 0 {
            out.push_str("  ");
        }
        let mark = if tile.is_fixed() { FIXED_MARK } else { ' ' };
        let _ = write!(out, "{position:>width$}:{:>width$}{mark}", tile.home());
        if column + 1 == grid.columns() {
            out.truncate(out.trim_end().len());
            out.push('\n');
        }
    }
    out
}

/// One-line progress summary.
#[must_use]
pub fn render_status<T>(puzzle: &Puzzle<T>) -> String {
    format!(
        "{}/{} tiles home, {} move(s)",
        puzzle.fixed_count(),
        puzzle.tile_count(),
        puzzle.moves()
    )
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
