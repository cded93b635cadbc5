use std::{num::NonZero, path::PathBuf, time::Duration};

use clap::Parser;
use picswap_core::GridSize;
use picswap_generator::PuzzleSeed;
use picswap_image::{DEFAULT_TIMEOUT, ImageDescriptor};

const DEFAULT_TIMEOUT_SECS: NonZero<u64> = NonZero::new(DEFAULT_TIMEOUT.as_secs()).unwrap();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub grid: GridSize,
    pub image: ImageDescriptor,
    pub offline: bool,
    /// Seed for the first puzzle only; later puzzles are shuffled at random.
    pub seed: Option<PuzzleSeed>,
    pub export_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize::DEFAULT,
            image: ImageDescriptor::default(),
            offline: false,
            seed: None,
            export_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Swap tiles of a shuffled picture until it is whole again.
#[derive(Debug, Parser)]
#[command(name = "picswap", author, version, about)]
pub struct Cli {
    /// Download the puzzle image from this URL.
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the puzzle image from this file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Grid size as ROWSxCOLUMNS.
    #[arg(long, value_name = "RxC", conflicts_with_all = ["rows", "columns"])]
    pub grid: Option<GridSize>,

    /// Number of tile rows.
    #[arg(long, value_name = "N")]
    pub rows: Option<NonZero<usize>>,

    /// Number of tile columns.
    #[arg(long, value_name = "N")]
    pub columns: Option<NonZero<usize>>,

    /// Replay the first puzzle's shuffle from a seed (64 hex characters).
    #[arg(long, value_name = "HEX")]
    pub seed: Option<PuzzleSeed>,

    /// Skip the network and use the default image.
    #[arg(long)]
    pub offline: bool,

    /// Write each puzzle's tiles and board as PNG files into this directory.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Give up on a download after this many seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: NonZero<u64>,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        // Rows and columns fill in whichever dimension --grid would have set.
        let grid = cli.grid.unwrap_or_else(|| {
            let rows = cli.rows.map_or(GridSize::DEFAULT.rows(), NonZero::get);
            let columns = cli.columns.map_or(GridSize::DEFAULT.columns(), NonZero::get);
            GridSize::try_new(rows, columns).unwrap_or_default()
        });
        let image = match (cli.url, cli.file) {
            (_, Some(path)) => ImageDescriptor::File(path),
            (Some(url), None) => ImageDescriptor::Url(url),
            (None, None) => ImageDescriptor::default(),
        };
        Self {
            grid,
            image,
            offline: cli.offline,
            seed: cli.seed,
            export_dir: cli.export_dir,
            timeout: Duration::from_secs(cli.timeout.get()),
        }
    }
}
