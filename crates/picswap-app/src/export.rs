//! PNG snapshots of a running puzzle.

use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{DynamicImage, RgbaImage, imageops};
use picswap_core::TileRect;
use picswap_game::Puzzle;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ExportError {
    #[display("cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("cannot write image: {_0}")]
    Image(#[from] image::ImageError),
}

/// File name of the composed board.
pub const BOARD_FILE: &str = "board.png";

/// Writes every tile as `tile_NN.png`, named by solved position, plus the
/// current arrangement composed into [`BOARD_FILE`]. Returns the number of
/// files written.
pub fn export_puzzle(puzzle: &Puzzle<DynamicImage>, dir: &Path) -> Result<usize, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_owned(),
        source,
    })?;

    let width = puzzle.tile_count().saturating_sub(1).to_string().len();
    for tile in puzzle.tiles() {
        let path = dir.join(format!("tile_{:0width$}.png", tile.home()));
        tile.content().save(&path)?;
    }
    compose_board(puzzle).save(dir.join(BOARD_FILE))?;

    log::info!(
        "exported {} tiles to {}",
        puzzle.tile_count(),
        dir.display()
    );
    Ok(puzzle.tile_count() + 1)
}

/// Draws each tile into the rectangle of the position it currently occupies.
#[must_use]
pub fn compose_board(puzzle: &Puzzle<DynamicImage>) -> RgbaImage {
    let mut slots = vec![TileRect::default(); puzzle.tile_count()];
    for tile in puzzle.tiles() {
        slots[tile.home()] = tile.rect();
    }
    let width = slots.iter().map(|r| r.x + r.width).max().unwrap_or(0);
    let height = slots.iter().map(|r| r.y + r.height).max().unwrap_or(0);

    let mut board = RgbaImage::new(width, height);
    for (slot, tile) in slots.iter().zip(puzzle.tiles()) {
        imageops::replace(
            &mut board,
            &tile.content().to_rgba8(),
            i64::from(slot.x),
            i64::from(slot.y),
        );
    }
    board
}
