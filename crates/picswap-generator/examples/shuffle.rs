//! Example demonstrating shuffle generation.
//!
//! This example shows how to:
//! - Create a `ShuffleGenerator`
//! - Generate a random or seeded shuffle for a grid
//! - Display the seed and the presentation order as a grid
//!
//! # Usage
//!
//! ```sh
//! cargo run --example shuffle
//! ```
//!
//! Replay a shuffle from a seed on a 4x4 grid:
//!
//! ```sh
//! cargo run --example shuffle -- --grid 4x4 --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```

use clap::Parser;
use picswap_core::GridSize;
use picswap_generator::{GeneratedShuffle, PuzzleSeed, ShuffleGenerator};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid size as ROWSxCOLUMNS.
    #[arg(long, value_name = "RxC", default_value_t = GridSize::DEFAULT)]
    grid: GridSize,

    /// Seed to replay, as 64 hex characters.
    #[arg(long, value_name = "HEX")]
    seed: Option<PuzzleSeed>,
}

fn main() {
    let args = Args::parse();
    let generator = ShuffleGenerator::new();
    let shuffle = match args.seed {
        Some(seed) => generator.generate_with_seed(args.grid, seed),
        None => generator.generate(args.grid),
    };
    print_shuffle(&shuffle, args.grid);
}

fn print_shuffle(shuffle: &GeneratedShuffle, grid: GridSize) {
    println!("Seed:");
    println!("  {}", shuffle.seed);
    println!();

    let width = grid.tile_count().saturating_sub(1).to_string().len();
    println!("Order:");
    for row in shuffle.order.chunks(grid.columns()) {
        let cells: Vec<_> = row.iter().map(|home| format!("{home:>width$}")).collect();
        println!("  {}", cells.join(" "));
    }
    println!();

    let in_place = shuffle
        .order
        .iter()
        .enumerate()
        .filter(|(position, home)| position == *home)
        .count();
    println!("Tiles already in place: {in_place}");
}
