//! Picswap terminal game.
//!
//! Reads commands from standard input and prints the board to standard output.
//! Set `RUST_LOG=debug` to follow image loading and puzzle events.

use std::{io, process::ExitCode};

use clap::Parser as _;
use picswap_app::{Cli, PicswapApp, Settings};

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let settings = Settings::from(Cli::parse());
    log::info!(
        "starting picswap: {} grid, image {}",
        settings.grid,
        settings.image
    );

    let mut app = PicswapApp::new(settings);
    match app.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("picswap: {err}");
            ExitCode::FAILURE
        }
    }
}
